//! Status enums for drafts and products.

use serde::{Deserialize, Serialize};

/// How a product is stocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// One item with a single stock count.
    Single,
    /// A color × size matrix with per-variant quantity and price.
    #[default]
    Collection,
}

impl ProductKind {
    /// The wire value of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Collection => "collection",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(Self::Single),
            "collection" => Ok(Self::Collection),
            _ => Err(format!("invalid product kind: {s}")),
        }
    }
}

/// Which of the two drafts in a buffer is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DraftMode {
    #[default]
    Create,
    Edit,
}

impl std::fmt::Display for DraftMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Edit => write!(f, "edit"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_kind_parse() {
        assert_eq!("single".parse::<ProductKind>().unwrap(), ProductKind::Single);
        assert_eq!(
            "collection".parse::<ProductKind>().unwrap(),
            ProductKind::Collection
        );
        assert!("bundle".parse::<ProductKind>().is_err());
    }

    #[test]
    fn test_product_kind_defaults_to_collection() {
        assert_eq!(ProductKind::default(), ProductKind::Collection);
        assert_eq!(ProductKind::default().to_string(), "collection");
    }
}
