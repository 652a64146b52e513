//! Unified error handling for the desks.

use merchdesk_core::{ColorId, DraftError, ValidationError};
use thiserror::Error;

use crate::gateway::GatewayError;

/// Error returned by desk operations.
#[derive(Debug, Error)]
pub enum DeskError {
    /// The draft failed validation; no request was issued.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A draft edit addressed something that does not exist.
    #[error("Draft error: {0}")]
    Draft(#[from] DraftError),

    /// The persistence service call failed. The draft is untouched.
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The color is not offered for the draft's category.
    #[error("Color {color} is not available for category {category:?}")]
    ColorUnavailable { color: ColorId, category: String },

    /// The operation needs a draft loaded for editing.
    #[error("No {0} is loaded for editing")]
    NotEditing(String),

    /// The response arrived after its request was superseded and was dropped.
    #[error("Stale response for request generation {0}")]
    StaleResponse(u64),
}

impl DeskError {
    /// Whether this error came from the transport rather than the operator.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }

    /// Log the error and, for transport failures, report it to Sentry.
    ///
    /// Sentry capture is a no-op when no client is bound.
    pub fn report(&self) {
        if self.is_transport() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Desk request error"
            );
        } else {
            tracing::warn!(error = %self, "Desk operation rejected");
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;
