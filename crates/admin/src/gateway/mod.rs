//! Persistence service access.
//!
//! The desks talk to the persistence service only through
//! [`PersistenceGateway`]. Two implementations are provided:
//!
//! - [`HttpGateway`] - JSON over HTTP against the persistence service's `/api` routes
//! - [`InMemoryGateway`] - in-process store for tests and offline runs
//!
//! Mutating calls only report success or failure. Response bodies are not
//! interpreted; callers refetch the list afterwards.

mod http;
mod memory;

pub use http::HttpGateway;
pub use memory::{GatewayCall, InMemoryGateway};

use async_trait::async_trait;
use merchdesk_core::{
    CategoryTag, ColorOption, Design, DesignId, DesignRecord, Factory, Product, ProductId,
    ProductRecord, SizeOption, Subcategory,
};
use thiserror::Error;

/// Errors that can occur when calling the persistence service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{path} returned status {status}")]
    Status { status: u16, path: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The request URL could not be built.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Operations offered by the persistence service.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn list_designs(&self) -> GatewayResult<Vec<Design>>;

    async fn create_design(&self, record: &DesignRecord) -> GatewayResult<()>;

    async fn update_design(&self, id: &DesignId, record: &DesignRecord) -> GatewayResult<()>;

    async fn delete_design(&self, id: &DesignId) -> GatewayResult<()>;

    async fn list_categories(&self) -> GatewayResult<Vec<CategoryTag>>;

    async fn list_subcategories(&self) -> GatewayResult<Vec<Subcategory>>;

    async fn list_factories(&self) -> GatewayResult<Vec<Factory>>;

    async fn list_colors(&self) -> GatewayResult<Vec<ColorOption>>;

    /// Sizes in canonical display order.
    async fn list_sizes(&self) -> GatewayResult<Vec<SizeOption>>;

    async fn list_products(&self) -> GatewayResult<Vec<Product>>;

    async fn create_product(&self, record: &ProductRecord) -> GatewayResult<()>;

    async fn update_product(&self, id: &ProductId, record: &ProductRecord) -> GatewayResult<()>;

    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()>;
}
