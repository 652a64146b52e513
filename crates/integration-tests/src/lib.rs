//! Integration tests for Merch Desk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p merchdesk-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `design_desk` - design flows against the in-memory service
//! - `product_desk` - product flows and wire shapes against the in-memory service
//! - `http_gateway` - the HTTP binding against a local stub service
//!
//! Nothing here needs network access beyond the loopback interface.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;
pub mod stub;
