//! Product commands.
//!
//! # Usage
//!
//! ```bash
//! merchdesk products list
//! merchdesk products delete 42
//! merchdesk products submit drafts/hoodie.json
//! ```
//!
//! A draft file is a product draft as JSON. Quantities, prices, stock and
//! the discount percent are text, exactly as an operator would type them:
//!
//! ```json
//! {
//!   "title": "Hoodie", "description": "<p>Warm</p>",
//!   "images": ["https://cdn.example.com/hoodie.png"],
//!   "category": "Hoodies", "subcategory": "Winter", "factory": "North",
//!   "price": "50", "discount": "20", "kind": "collection",
//!   "colors": {
//!     "selected": ["3"],
//!     "matrix": { "3": [{ "size": "M", "qty": "4", "price": "52.50" }] }
//!   }
//! }
//! ```

use std::path::Path;

use merchdesk_admin::{PersistenceGateway, ProductDesk};
use merchdesk_core::{ProductId, draft::ProductDraft};

use super::{CliError, print_json, read_json};

/// Print persisted products.
pub async fn list<G: PersistenceGateway>(gateway: G) -> Result<(), CliError> {
    let desk = ProductDesk::open(gateway).await;
    print_json(desk.products())
}

/// Delete a product and print the remaining ones.
pub async fn delete<G: PersistenceGateway>(gateway: G, id: &str) -> Result<(), CliError> {
    let mut desk = ProductDesk::open(gateway).await;
    desk.delete(&ProductId::new(id)).await?;
    print_json(desk.products())
}

/// Submit a draft file and print the refreshed list.
pub async fn submit<G: PersistenceGateway>(gateway: G, path: &Path) -> Result<(), CliError> {
    let draft: ProductDraft = read_json(path)?;
    let mut desk = ProductDesk::open(gateway).await;
    load_draft(&mut desk, draft)?;

    if let Some(price) = desk.discounted_price_preview() {
        tracing::info!(price, "Discounted price");
    }
    desk.submit().await?;
    print_json(desk.products())
}

/// Make `draft` the live draft, entering edit mode if it names a product.
fn load_draft<G: PersistenceGateway>(
    desk: &mut ProductDesk<G>,
    draft: ProductDraft,
) -> Result<(), CliError> {
    if let Some(id) = &draft.id {
        let product = desk
            .products()
            .iter()
            .find(|p| &p.id == id)
            .cloned()
            .ok_or_else(|| CliError::NotFound(format!("product {id}")))?;
        desk.begin_edit(&product);
    }
    *desk.draft_mut() = draft;
    Ok(())
}
