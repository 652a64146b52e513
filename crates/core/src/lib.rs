//! Merch Desk Core - the draft-composition engine.
//!
//! This crate turns discrete operator actions (toggle a tag, activate a
//! color, type a quantity) into validated submission records for designs and
//! products, and keeps create and edit drafts apart.
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no HTTP clients,
//! no async. Orchestration against the persistence service lives in
//! `merchdesk-admin`.
//!
//! # Modules
//!
//! - [`types`] - Ids, vocabularies and wire records
//! - [`draft`] - Draft buffers, tag selection, color filtering, variant matrix
//! - [`pricing`] - Price formatting and discount arithmetic
//! - [`assemble`] - Validation and record assembly

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod assemble;
pub mod draft;
pub mod pricing;
pub mod types;

pub use assemble::{ValidationError, assemble_design, assemble_product, preview_discount};
pub use draft::{
    ActiveDraft, DesignDraft, Draft, DraftBuffer, DraftError, ProductDraft, RequestKind,
    RequestTicket,
};
pub use types::*;
