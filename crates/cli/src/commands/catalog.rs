//! Vocabulary commands.
//!
//! # Usage
//!
//! ```bash
//! merchdesk vocab
//! merchdesk colors --category Shirts
//! ```

use merchdesk_admin::{PersistenceGateway, Vocabularies};
use merchdesk_core::draft::available_colors;

use super::{CliError, print_json};

/// Print every vocabulary. Lists that fail to load print as empty.
pub async fn vocab<G: PersistenceGateway>(gateway: &G) -> Result<(), CliError> {
    let vocabularies = Vocabularies::load(gateway).await;
    print_json(&vocabularies)
}

/// Print the colors offered under `category`, in vocabulary order.
///
/// Unlike `vocab`, a failed color fetch is an error here: an empty answer
/// would be indistinguishable from a category with no colors.
pub async fn colors<G: PersistenceGateway>(gateway: &G, category: &str) -> Result<(), CliError> {
    let vocabulary = gateway.list_colors().await?;
    let colors = available_colors(category, &vocabulary);
    tracing::info!(category, count = colors.len(), "Colors available");
    print_json(&colors)
}
