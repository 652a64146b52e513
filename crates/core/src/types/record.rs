//! Records exchanged with the persistence service.
//!
//! These are the exact shapes handed to (and read back from) the service.
//! Subtype-specific product fields live in [`ProductLayout`], which is
//! flattened into the record and tagged by `type`, so a single product can
//! never carry `color` and a collection can never carry `stock`.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::id::{ColorId, DesignId, ProductId};
use super::status::ProductKind;

/// Body of a design create or update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DesignRecord {
    pub title: String,
    #[serde(rename = "img", default)]
    pub images: Vec<String>,
    /// Category tag names.
    #[serde(rename = "cat", default)]
    pub tags: Vec<String>,
}

/// A design as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    pub id: DesignId,
    #[serde(flatten)]
    pub record: DesignRecord,
}

/// Body of a product create or update call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Base price with two fractional digits.
    pub price: String,
    /// Discounted price with two fractional digits, `null` when there is no
    /// discount. Always present on the wire.
    pub discount: Option<String>,
    #[serde(rename = "img", default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "sub", default)]
    pub subcategory: String,
    #[serde(default)]
    pub factory: String,
    #[serde(flatten)]
    pub layout: ProductLayout,
}

impl ProductRecord {
    #[must_use]
    pub const fn kind(&self) -> ProductKind {
        match self.layout {
            ProductLayout::Single { .. } => ProductKind::Single,
            ProductLayout::Collection { .. } => ProductKind::Collection,
        }
    }
}

/// Subtype-specific product fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductLayout {
    Single {
        #[serde(deserialize_with = "lenient_count")]
        stock: u32,
    },
    Collection {
        #[serde(rename = "color", default)]
        colors: Vec<ColorVariant>,
    },
}

/// One color of a collection with its stocked sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    #[serde(rename = "id")]
    pub color_id: ColorId,
    pub title: String,
    #[serde(rename = "code")]
    pub hex_code: String,
    #[serde(rename = "sizes", default)]
    pub size_entries: Vec<SizeEntry>,
}

/// A stocked size within a color variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEntry {
    pub size: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// A product as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub record: ProductRecord,
}

/// Older records store the stock count as text.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u32),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
