//! Design desk: compose, edit and delete tagged designs.

use merchdesk_core::{
    CategoryTag, Design, DesignDraft, DesignId, DraftBuffer, RequestKind, RequestTicket,
    assemble_design,
};
use tracing::instrument;

use super::{DesignSubmission, Submission, reported};
use crate::error::{DeskError, DeskResult};
use crate::gateway::{GatewayResult, PersistenceGateway};
use crate::vocabulary::or_empty;

pub struct DesignDesk<G> {
    gateway: G,
    buffer: DraftBuffer<DesignDraft>,
    designs: Vec<Design>,
    categories: Vec<CategoryTag>,
}

impl<G: PersistenceGateway> DesignDesk<G> {
    /// A desk with empty drafts and nothing loaded.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            buffer: DraftBuffer::new(),
            designs: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// A desk with the category vocabulary and design list loaded.
    pub async fn open(gateway: G) -> Self {
        let mut desk = Self::new(gateway);
        desk.refresh_categories().await;
        desk.refresh().await;
        desk
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    #[must_use]
    pub const fn buffer(&self) -> &DraftBuffer<DesignDraft> {
        &self.buffer
    }

    #[must_use]
    pub fn designs(&self) -> &[Design] {
        &self.designs
    }

    /// Tags offered for selection.
    #[must_use]
    pub fn categories(&self) -> &[CategoryTag] {
        &self.categories
    }

    /// The live draft.
    #[must_use]
    pub fn draft(&self) -> &DesignDraft {
        self.buffer.active().into_inner()
    }

    pub fn draft_mut(&mut self) -> &mut DesignDraft {
        self.buffer.active_mut().into_inner()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft_mut().title = title.into();
    }

    /// Add or remove a tag on the live draft. Returns whether it is now set.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.draft_mut().tags.toggle(tag)
    }

    /// Load `design` into the edit draft. The create draft is kept.
    pub fn begin_edit(&mut self, design: &Design) {
        tracing::debug!(id = %design.id, "Editing design");
        self.buffer.begin_edit(DesignDraft::from_design(design));
    }

    /// Drop the edit draft and go back to the create draft.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::NotEditing` if no design is being edited.
    pub fn cancel_edit(&mut self) -> DeskResult<()> {
        if !self.buffer.is_editing() {
            return Err(DeskError::NotEditing("design".to_string()));
        }
        self.buffer.cancel_edit();
        Ok(())
    }

    /// Start an image upload for the live draft.
    pub fn begin_upload(&mut self) -> RequestTicket {
        self.buffer.issue_ticket(RequestKind::Upload)
    }

    /// Hand uploaded URLs to the draft that started the upload.
    ///
    /// Returns `false` if the upload was superseded or produced no URLs.
    pub fn finish_upload(&mut self, ticket: RequestTicket, urls: Vec<String>) -> bool {
        let applied = self.buffer.route_images(ticket, urls);
        if !applied {
            tracing::debug!(
                generation = ticket.generation(),
                "Dropping superseded or empty upload"
            );
        }
        applied
    }

    /// Validate the live draft and stamp it for sending.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Validation` if the draft cannot be submitted. No
    /// ticket is issued in that case.
    pub fn prepare_submit(&mut self) -> DeskResult<DesignSubmission> {
        let draft = self.draft();
        let record = assemble_design(draft)?;
        let target = draft.id.clone();
        let ticket = self.buffer.issue_ticket(RequestKind::Submission);
        Ok(Submission::new(ticket, target, record))
    }

    /// Apply the outcome of sending `submission`.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Gateway` if the call failed, leaving the draft as
    /// it was, or `DeskError::StaleResponse` if the request was superseded.
    pub async fn complete_submit(
        &mut self,
        submission: &DesignSubmission,
        outcome: GatewayResult<()>,
    ) -> DeskResult<()> {
        outcome.map_err(reported)?;

        let ticket = submission.ticket();
        if !self.buffer.finish_submission(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "Dropping stale design submission response"
            );
            return Err(DeskError::StaleResponse(ticket.generation()));
        }

        tracing::info!(
            title = %submission.record().title,
            updated = submission.target().is_some(),
            "Design saved"
        );
        self.refresh().await;
        Ok(())
    }

    /// Validate, send and apply the live draft.
    ///
    /// # Errors
    ///
    /// See [`Self::prepare_submit`] and [`Self::complete_submit`].
    #[instrument(skip_all, fields(mode = %self.buffer.mode()))]
    pub async fn submit(&mut self) -> DeskResult<()> {
        let submission = self.prepare_submit()?;
        let outcome = submission.send(&self.gateway).await;
        self.complete_submit(&submission, outcome).await
    }

    /// Delete a design and refetch the list.
    ///
    /// If the design is loaded for editing, the edit is cancelled.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Gateway` if the call failed.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&mut self, id: &DesignId) -> DeskResult<()> {
        self.gateway.delete_design(id).await.map_err(reported)?;

        if self.buffer.is_editing() && self.buffer.edit_draft().id.as_ref() == Some(id) {
            self.buffer.cancel_edit();
        }
        tracing::info!("Design deleted");
        self.refresh().await;
        Ok(())
    }

    /// Refetch the design list. A failed fetch leaves the list empty.
    pub async fn refresh(&mut self) {
        self.designs = or_empty("design", self.gateway.list_designs().await);
    }

    /// Refetch the tag vocabulary. A failed fetch leaves it empty.
    pub async fn refresh_categories(&mut self) {
        self.categories = or_empty("category", self.gateway.list_categories().await);
    }
}
