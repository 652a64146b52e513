//! Product desk: compose single products and color × size collections.

use merchdesk_core::draft::{EntryField, ProductDraft, available_colors};
use merchdesk_core::{
    ColorId, ColorOption, DraftBuffer, Product, ProductId, ProductKind, RequestKind, RequestTicket,
    assemble_product, preview_discount,
};
use tracing::instrument;

use super::{ProductSubmission, Submission, reported};
use crate::error::{DeskError, DeskResult};
use crate::gateway::{GatewayResult, PersistenceGateway};
use crate::vocabulary::{Vocabularies, or_empty};

pub struct ProductDesk<G> {
    gateway: G,
    buffer: DraftBuffer<ProductDraft>,
    products: Vec<Product>,
    vocabularies: Vocabularies,
}

impl<G: PersistenceGateway> ProductDesk<G> {
    /// A desk with empty drafts and nothing loaded.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            buffer: DraftBuffer::new(),
            products: Vec::new(),
            vocabularies: Vocabularies::default(),
        }
    }

    /// A desk with all vocabularies and the product list loaded.
    pub async fn open(gateway: G) -> Self {
        let mut desk = Self::new(gateway);
        desk.refresh_vocabularies().await;
        desk.refresh().await;
        desk
    }

    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    #[must_use]
    pub const fn buffer(&self) -> &DraftBuffer<ProductDraft> {
        &self.buffer
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn vocabularies(&self) -> &Vocabularies {
        &self.vocabularies
    }

    /// The live draft.
    #[must_use]
    pub fn draft(&self) -> &ProductDraft {
        self.buffer.active().into_inner()
    }

    /// The live draft, for plain field edits.
    ///
    /// Use [`Self::select_category`] rather than writing `category` here, so
    /// the color selection follows the category.
    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        self.buffer.active_mut().into_inner()
    }

    pub fn set_kind(&mut self, kind: ProductKind) {
        self.draft_mut().kind = kind;
    }

    /// Change the category. Selected colors are cleared; typed matrix rows
    /// are kept.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.draft_mut().select_category(category);
    }

    /// Colors offered for the live draft's category, in vocabulary order.
    #[must_use]
    pub fn available_colors(&self) -> Vec<&ColorOption> {
        available_colors(&self.draft().category, &self.vocabularies.colors)
    }

    /// Select or deselect a color. Returns whether it is now selected.
    ///
    /// A color selected for the first time gets one blank row per size.
    /// Deselecting always succeeds.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::ColorUnavailable` when selecting a color that is
    /// not offered for the draft's category, including when no category is
    /// chosen yet. Nothing changes in that case.
    pub fn toggle_color(&mut self, color: &ColorId) -> DeskResult<bool> {
        let draft = self.buffer.active_mut().into_inner();
        if !draft.colors.is_selected(color)
            && !available_colors(&draft.category, &self.vocabularies.colors)
                .iter()
                .any(|c| &c.id == color)
        {
            return Err(DeskError::ColorUnavailable {
                color: color.clone(),
                category: draft.category.clone(),
            });
        }
        Ok(draft.colors.toggle(color, &self.vocabularies.sizes))
    }

    /// Set the quantity or price typed for one size of one color.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Draft` if the color has no row at `index`.
    pub fn set_entry_field(
        &mut self,
        color: &ColorId,
        index: usize,
        field: EntryField,
        raw: impl Into<String>,
    ) -> DeskResult<()> {
        self.draft_mut()
            .colors
            .set_entry_field(color, index, field, raw)?;
        Ok(())
    }

    /// Forget every selected color and every typed row.
    pub fn reset_matrix(&mut self) {
        self.draft_mut().colors.reset();
    }

    /// The discounted price the live draft would be saved with, if its
    /// price and discount would both pass validation and the discount is not
    /// zero.
    #[must_use]
    pub fn discounted_price_preview(&self) -> Option<String> {
        preview_discount(self.draft())
    }

    /// Load `product` into the edit draft. The create draft is kept.
    pub fn begin_edit(&mut self, product: &Product) {
        tracing::debug!(id = %product.id, "Editing product");
        self.buffer
            .begin_edit(ProductDraft::from_product(product, &self.vocabularies.sizes));
    }

    /// Drop the edit draft and go back to the create draft.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::NotEditing` if no product is being edited.
    pub fn cancel_edit(&mut self) -> DeskResult<()> {
        if !self.buffer.is_editing() {
            return Err(DeskError::NotEditing("product".to_string()));
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
    pub fn prepare_submit(&mut self) -> DeskResult<ProductSubmission> {
        let draft = self.draft();
        let record = assemble_product(draft, &self.vocabularies.colors)?;
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
        submission: &ProductSubmission,
        outcome: GatewayResult<()>,
    ) -> DeskResult<()> {
        outcome.map_err(reported)?;

        let ticket = submission.ticket();
        if !self.buffer.finish_submission(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                "Dropping stale product submission response"
            );
            return Err(DeskError::StaleResponse(ticket.generation()));
        }

        tracing::info!(
            title = %submission.record().title,
            kind = %submission.record().kind(),
            updated = submission.target().is_some(),
            "Product saved"
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

    /// Delete a product and refetch the list.
    ///
    /// If the product is loaded for editing, the edit is cancelled.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Gateway` if the call failed.
    #[instrument(skip_all, fields(id = %id))]
    pub async fn delete(&mut self, id: &ProductId) -> DeskResult<()> {
        self.gateway.delete_product(id).await.map_err(reported)?;

        if self.buffer.is_editing() && self.buffer.edit_draft().id.as_ref() == Some(id) {
            self.buffer.cancel_edit();
        }
        tracing::info!("Product deleted");
        self.refresh().await;
        Ok(())
    }

    /// Refetch the product list. A failed fetch leaves the list empty.
    pub async fn refresh(&mut self) {
        self.products = or_empty("product", self.gateway.list_products().await);
    }

    /// Refetch all vocabularies.
    pub async fn refresh_vocabularies(&mut self) {
        self.vocabularies = Vocabularies::load(&self.gateway).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use merchdesk_core::{DraftMode, ProductLayout, ValidationError};

    use super::*;
    use crate::gateway::{GatewayCall, InMemoryGateway};
    use crate::testing::{sample_product, sample_vocabularies};

    async fn open_desk() -> (ProductDesk<InMemoryGateway>, InMemoryGateway) {
        let gateway = InMemoryGateway::new(sample_vocabularies());
        (ProductDesk::open(gateway.clone()).await, gateway)
    }

    fn fill_common(desk: &mut ProductDesk<InMemoryGateway>) {
        let draft = desk.draft_mut();
        draft.title = "Tee".to_string();
        draft.description = "<p>Cotton</p>".to_string();
        draft.images = vec!["https://cdn.test/tee.png".to_string()];
        draft.subcategory = "Summer".to_string();
        draft.factory = "North".to_string();
        draft.price = "100".to_string();
        draft.discount = "10".to_string();
    }

    #[tokio::test]
    async fn test_available_colors_follow_category() {
        let (mut desk, _) = open_desk().await;
        assert!(desk.available_colors().is_empty());

        desk.select_category("Shirts");
        let titles: Vec<&str> = desk
            .available_colors()
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Red", "Blue"]);
    }

    #[tokio::test]
    async fn test_submit_collection() {
        let (mut desk, gateway) = open_desk().await;
        fill_common(&mut desk);
        desk.select_category("Shirts");
        let red = ColorId::new("c1");
        assert!(desk.toggle_color(&red).unwrap());
        desk.set_entry_field(&red, 1, EntryField::Quantity, "0")
            .unwrap();
        desk.set_entry_field(&red, 2, EntryField::Quantity, "3")
            .unwrap();
        desk.set_entry_field(&red, 2, EntryField::Price, "9.99")
            .unwrap();
        assert_eq!(desk.discounted_price_preview().as_deref(), Some("90.00"));

        desk.submit().await.unwrap();

        let stored = gateway.products().await;
        assert_eq!(stored.len(), 1);
        let record = &stored[0].record;
        assert_eq!(record.discount.as_deref(), Some("90.00"));
        let ProductLayout::Collection { colors } = &record.layout else {
            panic!("expected a collection");
        };
        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].size_entries.len(), 1);
        assert_eq!(colors[0].size_entries[0].size, "L");
        assert_eq!(colors[0].size_entries[0].quantity, 3);
        assert_eq!(desk.draft(), &ProductDraft::default());
        assert_eq!(desk.products().len(), 1);
    }

    #[tokio::test]
    async fn test_collection_without_colors_sends_nothing() {
        let (mut desk, gateway) = open_desk().await;
        fill_common(&mut desk);
        desk.select_category("Shirts");

        let err = desk.submit().await.unwrap_err();
        assert!(matches!(
            err,
            DeskError::Validation(ValidationError::NoColorSelected)
        ));
        assert_eq!(gateway.calls(GatewayCall::CreateProduct).await, 0);
    }

    #[tokio::test]
    async fn test_single_product_submits_stock() {
        let (mut desk, gateway) = open_desk().await;
        fill_common(&mut desk);
        desk.select_category("Mugs");
        desk.set_kind(ProductKind::Single);
        desk.draft_mut().stock = "12".to_string();

        desk.submit().await.unwrap();
        let stored = gateway.products().await;
        assert_eq!(stored[0].record.layout, ProductLayout::Single { stock: 12 });
    }

    #[tokio::test]
    async fn test_retained_rows_survive_deactivation() {
        let (mut desk, _) = open_desk().await;
        desk.select_category("Shirts");
        let red = ColorId::new("c1");
        desk.toggle_color(&red).unwrap();
        desk.set_entry_field(&red, 0, EntryField::Quantity, "5")
            .unwrap();

        assert!(!desk.toggle_color(&red).unwrap());
        assert!(desk.toggle_color(&red).unwrap());
        let row = desk.draft().colors.matrix().row(&red).unwrap();
        assert_eq!(row[0].quantity, "5");

        desk.reset_matrix();
        assert!(desk.draft().colors.matrix().is_empty());
    }

    #[tokio::test]
    async fn test_set_entry_field_out_of_range() {
        let (mut desk, _) = open_desk().await;
        let err = desk
            .set_entry_field(&ColorId::new("c1"), 0, EntryField::Price, "1")
            .unwrap_err();
        assert!(matches!(err, DeskError::Draft(_)));
    }

    #[tokio::test]
    async fn test_edit_product_round_trip() {
        let (mut desk, gateway) = open_desk().await;
        let id = gateway.insert_product(sample_product()).await;
        desk.refresh().await;
        let product = desk.products()[0].clone();

        desk.begin_edit(&product);
        assert_eq!(desk.buffer().mode(), DraftMode::Edit);
        assert_eq!(desk.draft().discount, "20");
        desk.draft_mut().title = "Hoodie v2".to_string();
        desk.submit().await.unwrap();

        let stored = gateway.products().await;
        assert_eq!(stored[0].id, id);
        assert_eq!(stored[0].record.title, "Hoodie v2");
        assert_eq!(stored[0].record.discount.as_deref(), Some("40.00"));
        assert_eq!(desk.buffer().mode(), DraftMode::Create);
    }

    #[tokio::test]
    async fn test_late_upload_goes_nowhere_after_cancel() {
        let (mut desk, gateway) = open_desk().await;
        gateway.insert_product(sample_product()).await;
        desk.refresh().await;
        let product = desk.products()[0].clone();
        desk.begin_edit(&product);

        let ticket = desk.begin_upload();
        desk.cancel_edit().unwrap();
        assert!(!desk.finish_upload(ticket, vec!["late.png".to_string()]));
        assert!(desk.draft().images.is_empty());
    }

    #[tokio::test]
    async fn test_no_color_selection_without_category() {
        let (mut desk, _) = open_desk().await;
        let red = ColorId::new("c1");

        let err = desk.toggle_color(&red).unwrap_err();

        assert!(matches!(err, DeskError::ColorUnavailable { .. }));
        assert!(desk.draft().colors.selected().is_empty());
        assert!(desk.draft().colors.matrix().is_empty());
    }

    #[tokio::test]
    async fn test_color_outside_category_is_rejected() {
        let (mut desk, _) = open_desk().await;
        desk.select_category("Mugs");

        assert!(desk.toggle_color(&ColorId::new("c1")).is_err());
        assert!(desk.toggle_color(&ColorId::new("c2")).unwrap());
        assert!(desk.toggle_color(&ColorId::new("missing")).is_err());
        assert_eq!(desk.draft().colors.selected(), &[ColorId::new("c2")]);
    }

    #[tokio::test]
    async fn test_preview_follows_discount_rules() {
        let (mut desk, _) = open_desk().await;
        desk.draft_mut().price = "100".to_string();

        desk.draft_mut().discount = "150".to_string();
        assert_eq!(desk.discounted_price_preview(), None);
        desk.draft_mut().discount = "-5".to_string();
        assert_eq!(desk.discounted_price_preview(), None);
        desk.draft_mut().discount = "0".to_string();
        assert_eq!(desk.discounted_price_preview(), None);
        desk.draft_mut().discount = "100".to_string();
        assert_eq!(desk.discounted_price_preview().as_deref(), Some("0.00"));
    }

    #[tokio::test]
    async fn test_upload_during_submission_keeps_it_current() {
        let (mut desk, gateway) = open_desk().await;
        fill_common(&mut desk);
        desk.select_category("Mugs");
        desk.set_kind(ProductKind::Single);
        desk.draft_mut().title = "Mug".to_string();

        let submission = desk.prepare_submit().unwrap();
        let _upload = desk.begin_upload();
        let outcome = submission.send(desk.gateway()).await;
        desk.complete_submit(&submission, outcome).await.unwrap();

        assert_eq!(gateway.products().await.len(), 1);
        assert_eq!(desk.products().len(), 1);
        assert_eq!(desk.draft(), &ProductDraft::default());
    }
}
