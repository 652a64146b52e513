//! Operator desks.
//!
//! A desk owns one [`DraftBuffer`](merchdesk_core::DraftBuffer), the
//! persisted list and the vocabularies it needs, and a gateway. User events
//! are synchronous calls that edit the live draft; network calls are the
//! only suspension points.
//!
//! # Submitting
//!
//! `submit` runs three steps, which are also exposed separately so other
//! events can happen while a request is in flight:
//!
//! 1. `prepare_submit` validates the live draft and returns a
//!    [`Submission`] stamped with a request ticket. Nothing is sent if
//!    validation fails.
//! 2. [`Submission::send`] performs the create or update call.
//! 3. `complete_submit` applies the outcome. A success whose ticket is still
//!    current resets the submitted draft and refetches the list; a success
//!    whose ticket was superseded changes nothing.

pub mod design;
pub mod product;

pub use design::DesignDesk;
pub use product::ProductDesk;

use merchdesk_core::{DesignId, DesignRecord, ProductId, ProductRecord, RequestTicket};

use crate::error::DeskError;
use crate::gateway::{GatewayError, GatewayResult, PersistenceGateway};

/// A validated record waiting to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission<Id, R> {
    ticket: RequestTicket,
    target: Option<Id>,
    record: R,
}

impl<Id, R> Submission<Id, R> {
    pub(crate) const fn new(ticket: RequestTicket, target: Option<Id>, record: R) -> Self {
        Self {
            ticket,
            target,
            record,
        }
    }

    #[must_use]
    pub const fn ticket(&self) -> RequestTicket {
        self.ticket
    }

    /// Id of the record being updated; `None` for a create.
    #[must_use]
    pub const fn target(&self) -> Option<&Id> {
        self.target.as_ref()
    }

    #[must_use]
    pub const fn record(&self) -> &R {
        &self.record
    }
}

pub type DesignSubmission = Submission<DesignId, DesignRecord>;
pub type ProductSubmission = Submission<ProductId, ProductRecord>;

impl DesignSubmission {
    /// Create or update the design.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error unchanged.
    pub async fn send<G: PersistenceGateway + ?Sized>(&self, gateway: &G) -> GatewayResult<()> {
        match &self.target {
            Some(id) => gateway.update_design(id, &self.record).await,
            None => gateway.create_design(&self.record).await,
        }
    }
}

impl ProductSubmission {
    /// Create or update the product.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error unchanged.
    pub async fn send<G: PersistenceGateway + ?Sized>(&self, gateway: &G) -> GatewayResult<()> {
        match &self.target {
            Some(id) => gateway.update_product(id, &self.record).await,
            None => gateway.create_product(&self.record).await,
        }
    }
}

/// Wrap a transport failure and report it.
pub(crate) fn reported(error: GatewayError) -> DeskError {
    let error = DeskError::from(error);
    error.report();
    error
}
