//! In-process persistence service.
//!
//! Holds designs, products and vocabularies in memory. Every call is
//! counted, and any call can be made to fail, so desk flows can be driven
//! without a network.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use merchdesk_core::{
    CategoryTag, ColorOption, Design, DesignId, DesignRecord, Factory, Product, ProductId,
    ProductRecord, SizeOption, Subcategory,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{GatewayError, GatewayResult, PersistenceGateway};
use crate::vocabulary::Vocabularies;

/// Status reported for injected failures.
const INJECTED_FAILURE_STATUS: u16 = 503;

/// One operation of [`PersistenceGateway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayCall {
    ListDesigns,
    CreateDesign,
    UpdateDesign,
    DeleteDesign,
    ListCategories,
    ListSubcategories,
    ListFactories,
    ListColors,
    ListSizes,
    ListProducts,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}

impl GatewayCall {
    /// Route the HTTP binding uses for this call.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::ListDesigns | Self::CreateDesign | Self::UpdateDesign | Self::DeleteDesign => {
                "api/design"
            }
            Self::ListProducts
            | Self::CreateProduct
            | Self::UpdateProduct
            | Self::DeleteProduct => "api/products",
            Self::ListCategories => "api/category",
            Self::ListSubcategories => "api/sub",
            Self::ListFactories => "api/factory",
            Self::ListColors => "api/color",
            Self::ListSizes => "api/size",
        }
    }
}

/// In-memory [`PersistenceGateway`].
///
/// Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    inner: Arc<RwLock<Store>>,
}

#[derive(Default)]
struct Store {
    designs: Vec<Design>,
    products: Vec<Product>,
    vocabularies: Vocabularies,
    failing: HashSet<GatewayCall>,
    calls: HashMap<GatewayCall, usize>,
}

impl Store {
    /// Count the call and fail it if requested.
    fn record(&mut self, call: GatewayCall) -> GatewayResult<()> {
        *self.calls.entry(call).or_insert(0) += 1;
        if self.failing.contains(&call) {
            return Err(GatewayError::Status {
                status: INJECTED_FAILURE_STATUS,
                path: call.path().to_string(),
            });
        }
        Ok(())
    }
}

fn not_found(call: GatewayCall) -> GatewayError {
    GatewayError::Status {
        status: 404,
        path: call.path().to_string(),
    }
}

fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

impl InMemoryGateway {
    /// An empty store serving `vocabularies`.
    #[must_use]
    pub fn new(vocabularies: Vocabularies) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Store {
                vocabularies,
                ..Store::default()
            })),
        }
    }

    /// Store a design directly, without counting a call.
    pub async fn insert_design(&self, record: DesignRecord) -> DesignId {
        let id = DesignId::new(mint_id());
        self.inner.write().await.designs.push(Design {
            id: id.clone(),
            record,
        });
        id
    }

    /// Store a product directly, without counting a call.
    pub async fn insert_product(&self, record: ProductRecord) -> ProductId {
        let id = ProductId::new(mint_id());
        self.inner.write().await.products.push(Product {
            id: id.clone(),
            record,
        });
        id
    }

    /// Make every later `call` fail with a 503 status.
    pub async fn fail_on(&self, call: GatewayCall) {
        self.inner.write().await.failing.insert(call);
    }

    /// Stop injecting failures.
    pub async fn clear_failures(&self) {
        self.inner.write().await.failing.clear();
    }

    /// How many times `call` has been made, failed calls included.
    pub async fn calls(&self, call: GatewayCall) -> usize {
        self.inner.read().await.calls.get(&call).copied().unwrap_or(0)
    }

    /// Total number of mutating calls made.
    pub async fn mutation_count(&self) -> usize {
        let store = self.inner.read().await;
        [
            GatewayCall::CreateDesign,
            GatewayCall::UpdateDesign,
            GatewayCall::DeleteDesign,
            GatewayCall::CreateProduct,
            GatewayCall::UpdateProduct,
            GatewayCall::DeleteProduct,
        ]
        .iter()
        .filter_map(|call| store.calls.get(call))
        .sum()
    }

    pub async fn designs(&self) -> Vec<Design> {
        self.inner.read().await.designs.clone()
    }

    pub async fn products(&self) -> Vec<Product> {
        self.inner.read().await.products.clone()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn list_designs(&self) -> GatewayResult<Vec<Design>> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::ListDesigns)?;
        Ok(store.designs.clone())
    }

    async fn create_design(&self, record: &DesignRecord) -> GatewayResult<()> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::CreateDesign)?;
        store.designs.push(Design {
            id: DesignId::new(mint_id()),
            record: record.clone(),
        });
        Ok(())
    }

    async fn update_design(&self, id: &DesignId, record: &DesignRecord) -> GatewayResult<()> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::UpdateDesign)?;
        let design = store
            .designs
            .iter_mut()
            .find(|d| &d.id == id)
            .ok_or_else(|| not_found(GatewayCall::UpdateDesign))?;
        design.record = record.clone();
        Ok(())
    }

    async fn delete_design(&self, id: &DesignId) -> GatewayResult<()> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::DeleteDesign)?;
        let before = store.designs.len();
        store.designs.retain(|d| &d.id != id);
        if store.designs.len() == before {
            return Err(not_found(GatewayCall::DeleteDesign));
        }
        Ok(())
    }

    async fn list_categories(&self) -> GatewayResult<Vec<CategoryTag>> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::ListCategories)?;
        Ok(store.vocabularies.categories.clone())
    }

    async fn list_subcategories(&self) -> GatewayResult<Vec<Subcategory>> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::ListSubcategories)?;
        Ok(store.vocabularies.subcategories.clone())
    }

    async fn list_factories(&self) -> GatewayResult<Vec<Factory>> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::ListFactories)?;
        Ok(store.vocabularies.factories.clone())
    }

    async fn list_colors(&self) -> GatewayResult<Vec<ColorOption>> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::ListColors)?;
        Ok(store.vocabularies.colors.clone())
    }

    async fn list_sizes(&self) -> GatewayResult<Vec<SizeOption>> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::ListSizes)?;
        Ok(store.vocabularies.sizes.clone())
    }

    async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::ListProducts)?;
        Ok(store.products.clone())
    }

    async fn create_product(&self, record: &ProductRecord) -> GatewayResult<()> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::CreateProduct)?;
        store.products.push(Product {
            id: ProductId::new(mint_id()),
            record: record.clone(),
        });
        Ok(())
    }

    async fn update_product(&self, id: &ProductId, record: &ProductRecord) -> GatewayResult<()> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::UpdateProduct)?;
        let product = store
            .products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| not_found(GatewayCall::UpdateProduct))?;
        product.record = record.clone();
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()> {
        let mut store = self.inner.write().await;
        store.record(GatewayCall::DeleteProduct)?;
        let before = store.products.len();
        store.products.retain(|p| &p.id != id);
        if store.products.len() == before {
            return Err(not_found(GatewayCall::DeleteProduct));
        }
        Ok(())
    }
}
