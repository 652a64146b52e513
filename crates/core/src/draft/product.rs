//! Draft state for a product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::matrix::VariantSizeEntry;
use super::{ColorSelection, Draft};
use crate::pricing::discount_percent;
use crate::types::{Product, ProductId, ProductKind, ProductLayout, SizeOption};

/// A product being composed.
///
/// Both subtype sections are kept while the operator switches `kind`; only
/// the section matching `kind` is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub id: Option<ProductId>,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    /// Category name. Drives which colors are offered.
    pub category: String,
    pub subcategory: String,
    pub factory: String,
    /// Base price as typed.
    pub price: String,
    /// Discount percent as typed.
    pub discount: String,
    pub kind: ProductKind,
    /// Stock count as typed, used by single products.
    pub stock: String,
    /// Colors and size matrix, used by collections.
    pub colors: ColorSelection,
}

impl ProductDraft {
    /// Change the category.
    ///
    /// The color selection starts empty under the new category. Matrix rows
    /// are kept, so a color offered under both categories comes back with
    /// its entries when it is selected again.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
        self.colors.clear_selection();
    }

    /// Copy a persisted product into a draft for editing.
    ///
    /// Each color's rows follow `sizes` order; stored sizes that are no
    /// longer in the vocabulary are appended after them so nothing is lost.
    #[must_use]
    pub fn from_product(product: &Product, sizes: &[SizeOption]) -> Self {
        let record = &product.record;
        let mut draft = Self {
            id: Some(product.id.clone()),
            title: record.title.clone(),
            description: record.description.clone(),
            images: record.images.clone(),
            category: record.category.clone(),
            subcategory: record.subcategory.clone(),
            factory: record.factory.clone(),
            price: record.price.clone(),
            discount: recover_discount(&record.price, record.discount.as_deref()),
            kind: record.kind(),
            ..Self::default()
        };

        match &record.layout {
            ProductLayout::Single { stock } => draft.stock = stock.to_string(),
            ProductLayout::Collection { colors } => {
                for variant in colors {
                    let mut row: Vec<VariantSizeEntry> = sizes
                        .iter()
                        .map(|size| {
                            variant
                                .size_entries
                                .iter()
                                .find(|e| e.size == size.title)
                                .map_or_else(
                                    || VariantSizeEntry::blank(&size.title),
                                    |e| VariantSizeEntry {
                                        size: e.size.clone(),
                                        quantity: e.quantity.to_string(),
                                        price: e.price.to_string(),
                                    },
                                )
                        })
                        .collect();

                    row.extend(
                        variant
                            .size_entries
                            .iter()
                            .filter(|e| !sizes.iter().any(|s| s.title == e.size))
                            .map(|e| VariantSizeEntry {
                                size: e.size.clone(),
                                quantity: e.quantity.to_string(),
                                price: e.price.to_string(),
                            }),
                    );

                    draft.colors.restore(variant.color_id.clone(), row);
                }
            }
        }

        draft
    }
}

/// Stored records carry the discounted amount; drafts edit the percent.
fn recover_discount(price: &str, discounted: Option<&str>) -> String {
    let (Ok(base), Some(Ok(discounted))) = (
        price.trim().parse::<Decimal>(),
        discounted.map(|d| d.trim().parse::<Decimal>()),
    ) else {
        return String::new();
    };
    discount_percent(base, discounted).map_or_else(String::new, |p| p.to_string())
}

impl Draft for ProductDraft {
    type Id = ProductId;

    fn id(&self) -> Option<&ProductId> {
        self.id.as_ref()
    }

    fn images(&self) -> &[String] {
        &self.images
    }

    fn set_images(&mut self, urls: Vec<String>) {
        self.images = urls;
    }
}
