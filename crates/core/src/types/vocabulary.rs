//! Reference lists supplied by the persistence service.
//!
//! Vocabularies are read-only snapshots. Field names on the wire follow the
//! service (`code` for the hex value, `cat` for applicable categories); the
//! Rust names describe what the field holds.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ColorId, FactoryId, SizeId, SubcategoryId};

/// A category that designs are tagged with and products are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    pub id: CategoryId,
    pub name: String,
}

/// A product subcategory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
}

/// A factory that manufactures products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factory {
    pub id: FactoryId,
    pub name: String,
}

/// A color a product collection can be offered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub id: ColorId,
    pub title: String,
    /// CSS hex value, e.g. `#1f2937`.
    #[serde(rename = "code")]
    pub hex_code: String,
    /// Names of the categories this color may be used with.
    ///
    /// The service sometimes omits the list entirely; such a color applies
    /// to no category.
    #[serde(rename = "cat", default)]
    pub applicable_categories: Vec<String>,
}

impl ColorOption {
    /// Whether this color may be offered under `category`.
    #[must_use]
    pub fn applies_to(&self, category: &str) -> bool {
        self.applicable_categories.iter().any(|c| c == category)
    }
}

/// A garment size. The order of the size vocabulary is the canonical size
/// order used for every variant matrix row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeOption {
    pub id: SizeId,
    pub title: String,
}
