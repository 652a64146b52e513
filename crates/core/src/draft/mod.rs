//! Draft buffers and the operations that edit them.
//!
//! A [`DraftBuffer`] owns two drafts of the same entity type: one for
//! creating a new entity and one for editing a persisted entity. Exactly one
//! of them is live. Switching to the other never discards the inactive one.
//!
//! Writes go through [`DraftBuffer::active_mut`], which hands out the live
//! draft tagged with its mode, and the editing operations take that draft
//! explicitly.
//!
//! # Request tickets
//!
//! Submissions and uploads are asynchronous and cannot be cancelled. Each one
//! takes a [`RequestTicket`] stamped with the buffer's generation and a serial
//! number from its own [`RequestKind`] stream. A response is applied only if
//! its ticket is still current:
//!
//! - the generation advances on every mode change and every applied
//!   submission, superseding requests of both kinds;
//! - a newer submission supersedes an older submission, and a newer upload an
//!   older upload, but an upload never supersedes a submission or the
//!   reverse.
//!
//! A late response to a superseded request is therefore dropped instead of
//! resetting or overwriting a draft it no longer belongs to.

pub mod design;
pub mod matrix;
pub mod palette;
pub mod product;
pub mod tags;

pub use design::DesignDraft;
pub use matrix::{ColorMatrix, ColorSelection, EntryField, VariantSizeEntry};
pub use palette::available_colors;
pub use product::ProductDraft;
pub use tags::TagSet;

use thiserror::Error;

use crate::types::{ColorId, DraftMode};

/// Errors raised while editing a draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    /// The matrix has no entry at that position.
    #[error("no matrix entry at index {index} for color {color}")]
    NoSuchEntry { color: ColorId, index: usize },
}

/// An entity being composed by an operator.
pub trait Draft: Default {
    /// Id of the persisted entity this draft edits.
    type Id;

    /// `Some` only for drafts loaded from a persisted entity.
    fn id(&self) -> Option<&Self::Id>;

    fn images(&self) -> &[String];

    /// Replace the image list with the result of an upload.
    fn set_images(&mut self, urls: Vec<String>);
}

/// The live draft, tagged with the mode it belongs to.
#[derive(Debug, PartialEq, Eq)]
pub enum ActiveDraft<D> {
    Create(D),
    Edit(D),
}

impl<D> ActiveDraft<D> {
    #[must_use]
    pub const fn mode(&self) -> DraftMode {
        match self {
            Self::Create(_) => DraftMode::Create,
            Self::Edit(_) => DraftMode::Edit,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> D {
        match self {
            Self::Create(d) | Self::Edit(d) => d,
        }
    }
}

/// The request streams a buffer tracks separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Submission,
    Upload,
}

/// Proof that a request was issued against a particular buffer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    kind: RequestKind,
    mode: DraftMode,
    generation: u64,
    serial: u64,
}

impl RequestTicket {
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Mode that was live when the request was issued.
    #[must_use]
    pub const fn mode(&self) -> DraftMode {
        self.mode
    }

    /// Buffer generation the request was issued in.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Position of the request within its stream.
    #[must_use]
    pub const fn serial(&self) -> u64 {
        self.serial
    }
}

/// Create and edit drafts plus the mode selecting the live one.
#[derive(Debug, Clone, Default)]
pub struct DraftBuffer<T> {
    create: T,
    edit: T,
    mode: DraftMode,
    generation: u64,
    submissions: u64,
    uploads: u64,
}

impl<T: Draft> DraftBuffer<T> {
    /// Both drafts empty, in create mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn mode(&self) -> DraftMode {
        self.mode
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, DraftMode::Edit)
    }

    /// Advances on every mode change and every applied submission.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The create draft, whether or not it is live.
    #[must_use]
    pub const fn create_draft(&self) -> &T {
        &self.create
    }

    /// The edit draft, whether or not it is live.
    #[must_use]
    pub const fn edit_draft(&self) -> &T {
        &self.edit
    }

    #[must_use]
    pub const fn active(&self) -> ActiveDraft<&T> {
        match self.mode {
            DraftMode::Create => ActiveDraft::Create(&self.create),
            DraftMode::Edit => ActiveDraft::Edit(&self.edit),
        }
    }

    pub fn active_mut(&mut self) -> ActiveDraft<&mut T> {
        match self.mode {
            DraftMode::Create => ActiveDraft::Create(&mut self.create),
            DraftMode::Edit => ActiveDraft::Edit(&mut self.edit),
        }
    }

    /// Load `draft` into the edit slot and make it live.
    ///
    /// The create draft is left exactly as it was.
    pub fn begin_edit(&mut self, draft: T) {
        self.edit = draft;
        self.mode = DraftMode::Edit;
        self.advance();
    }

    /// Discard the edit draft and return to the create draft.
    pub fn cancel_edit(&mut self) {
        self.edit = T::default();
        self.mode = DraftMode::Create;
        self.advance();
    }

    /// Issue a ticket for a request made from the current state.
    ///
    /// Any ticket of the same kind issued earlier stops being current.
    pub fn issue_ticket(&mut self, kind: RequestKind) -> RequestTicket {
        let counter = match kind {
            RequestKind::Submission => &mut self.submissions,
            RequestKind::Upload => &mut self.uploads,
        };
        *counter = counter.wrapping_add(1);
        RequestTicket {
            kind,
            mode: self.mode,
            generation: self.generation,
            serial: *counter,
        }
    }

    #[must_use]
    pub const fn is_current(&self, ticket: RequestTicket) -> bool {
        let latest = match ticket.kind {
            RequestKind::Submission => self.submissions,
            RequestKind::Upload => self.uploads,
        };
        ticket.generation == self.generation
            && ticket.serial == latest
            && matches!(
                (ticket.mode, self.mode),
                (DraftMode::Create, DraftMode::Create) | (DraftMode::Edit, DraftMode::Edit)
            )
    }

    /// Apply a successful submission.
    ///
    /// Resets the draft that was submitted; an edit submission also returns
    /// the buffer to create mode. Uploads still in flight for the submitted
    /// draft are superseded. Returns `false`, changing nothing, if the ticket
    /// is stale or was not issued for a submission.
    pub fn finish_submission(&mut self, ticket: RequestTicket) -> bool {
        if ticket.kind != RequestKind::Submission || !self.is_current(ticket) {
            return false;
        }
        match ticket.mode {
            DraftMode::Create => self.create = T::default(),
            DraftMode::Edit => {
                self.edit = T::default();
                self.mode = DraftMode::Create;
            }
        }
        self.advance();
        true
    }

    /// Route uploaded image URLs to the draft that started the upload.
    ///
    /// An empty list is ignored. Returns `false`, changing nothing, if the
    /// ticket is stale, was not issued for an upload, or there were no URLs.
    pub fn route_images(&mut self, ticket: RequestTicket, urls: Vec<String>) -> bool {
        if urls.is_empty() || ticket.kind != RequestKind::Upload || !self.is_current(ticket) {
            return false;
        }
        self.active_mut().into_inner().set_images(urls);
        true
    }

    fn advance(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}
