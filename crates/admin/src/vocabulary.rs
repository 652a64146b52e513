//! Vocabulary snapshots used by the desks.

use merchdesk_core::{CategoryTag, ColorOption, Factory, SizeOption, Subcategory};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::gateway::{GatewayResult, PersistenceGateway};

/// The externally sourced lists a product form chooses from.
///
/// Replaced wholesale on every load; never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabularies {
    pub categories: Vec<CategoryTag>,
    pub subcategories: Vec<Subcategory>,
    pub factories: Vec<Factory>,
    pub colors: Vec<ColorOption>,
    /// Canonical size order for new matrix rows.
    pub sizes: Vec<SizeOption>,
}

impl Vocabularies {
    /// Fetch all five vocabularies concurrently.
    ///
    /// A list that fails to load is logged and left empty; the others are
    /// still used.
    #[instrument(skip_all)]
    pub async fn load<G: PersistenceGateway + ?Sized>(gateway: &G) -> Self {
        let (categories, subcategories, factories, colors, sizes) = tokio::join!(
            gateway.list_categories(),
            gateway.list_subcategories(),
            gateway.list_factories(),
            gateway.list_colors(),
            gateway.list_sizes(),
        );

        let vocabularies = Self {
            categories: or_empty("category", categories),
            subcategories: or_empty("subcategory", subcategories),
            factories: or_empty("factory", factories),
            colors: or_empty("color", colors),
            sizes: or_empty("size", sizes),
        };
        tracing::debug!(
            categories = vocabularies.categories.len(),
            colors = vocabularies.colors.len(),
            sizes = vocabularies.sizes.len(),
            "Vocabularies loaded"
        );
        vocabularies
    }
}

/// Unwrap a list fetch, logging and substituting an empty list on failure.
pub(crate) fn or_empty<T>(list: &str, result: GatewayResult<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(list, error = %e, "Failed to load list, using empty list");
        Vec::new()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::gateway::{GatewayCall, InMemoryGateway};
    use crate::testing::sample_vocabularies;

    #[tokio::test]
    async fn test_load_all_lists() {
        let gateway = InMemoryGateway::new(sample_vocabularies());
        let vocabularies = Vocabularies::load(&gateway).await;
        assert_eq!(vocabularies, sample_vocabularies());
    }

    #[tokio::test]
    async fn test_failed_list_is_empty_others_loaded() {
        let gateway = InMemoryGateway::new(sample_vocabularies());
        gateway.fail_on(GatewayCall::ListColors).await;

        let vocabularies = Vocabularies::load(&gateway).await;
        assert!(vocabularies.colors.is_empty());
        assert_eq!(vocabularies.sizes, sample_vocabularies().sizes);
        assert_eq!(vocabularies.categories, sample_vocabularies().categories);
    }
}
