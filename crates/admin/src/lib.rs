//! Merch Desk Admin library.
//!
//! Orchestrates the draft engine in `merchdesk-core` against the
//! persistence service:
//!
//! - [`gateway`] - the service interface, with HTTP and in-memory bindings
//! - [`vocabulary`] - loading the lists the product form chooses from
//! - [`desk`] - design and product desks that own the draft buffers
//! - [`config`] - environment configuration
//! - [`error`] - desk errors and reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod desk;
pub mod error;
pub mod gateway;
pub mod vocabulary;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, DeskConfig};
pub use desk::{DesignDesk, DesignSubmission, ProductDesk, ProductSubmission, Submission};
pub use error::{DeskError, DeskResult};
pub use gateway::{
    GatewayCall, GatewayError, GatewayResult, HttpGateway, InMemoryGateway, PersistenceGateway,
};
pub use vocabulary::Vocabularies;
