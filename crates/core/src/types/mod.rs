//! Core types for Merch Desk.
//!
//! This module provides type-safe wrappers for ids, the reference
//! vocabularies, and the records exchanged with the persistence service.

pub mod id;
pub mod record;
pub mod status;
pub mod vocabulary;

pub use id::*;
pub use record::{ColorVariant, Design, DesignRecord, Product, ProductLayout, ProductRecord, SizeEntry};
pub use status::{DraftMode, ProductKind};
pub use vocabulary::{CategoryTag, ColorOption, Factory, SizeOption, Subcategory};
