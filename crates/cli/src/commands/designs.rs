//! Design commands.
//!
//! # Usage
//!
//! ```bash
//! merchdesk designs list
//! merchdesk designs delete 12
//! merchdesk designs submit drafts/wave.json
//! ```
//!
//! A draft file is a design draft as JSON:
//!
//! ```json
//! { "title": "Wave", "images": ["https://cdn.example.com/wave.png"], "tags": ["Summer"] }
//! ```
//!
//! With an `id`, the design with that id is updated instead of created.

use std::path::Path;

use merchdesk_admin::{DesignDesk, PersistenceGateway};
use merchdesk_core::{DesignId, draft::DesignDraft};

use super::{CliError, print_json, read_json};

/// Print persisted designs.
pub async fn list<G: PersistenceGateway>(gateway: G) -> Result<(), CliError> {
    let desk = DesignDesk::open(gateway).await;
    print_json(desk.designs())
}

/// Delete a design and print the remaining ones.
pub async fn delete<G: PersistenceGateway>(gateway: G, id: &str) -> Result<(), CliError> {
    let mut desk = DesignDesk::open(gateway).await;
    desk.delete(&DesignId::new(id)).await?;
    print_json(desk.designs())
}

/// Submit a draft file and print the refreshed list.
pub async fn submit<G: PersistenceGateway>(gateway: G, path: &Path) -> Result<(), CliError> {
    let draft: DesignDraft = read_json(path)?;
    let mut desk = DesignDesk::open(gateway).await;
    load_draft(&mut desk, draft)?;

    desk.submit().await?;
    print_json(desk.designs())
}

/// Make `draft` the live draft, entering edit mode if it names a design.
fn load_draft<G: PersistenceGateway>(
    desk: &mut DesignDesk<G>,
    draft: DesignDraft,
) -> Result<(), CliError> {
    if let Some(id) = &draft.id {
        let design = desk
            .designs()
            .iter()
            .find(|d| &d.id == id)
            .cloned()
            .ok_or_else(|| CliError::NotFound(format!("design {id}")))?;
        desk.begin_edit(&design);
    }
    *desk.draft_mut() = draft;
    Ok(())
}
