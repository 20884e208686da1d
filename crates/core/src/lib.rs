//! Domain rules for the storefront platform.
//!
//! Everything in this crate is pure logic with no database or network
//! dependencies, so the repository layer, HTTP handlers, and tests can all
//! share the same rules.

pub mod catalog;
pub mod currency;
pub mod error;
pub mod inquiry;
pub mod orders;
pub mod pagination;
pub mod roles;
pub mod site_config;
pub mod slug;
pub mod status;
pub mod types;
pub mod validation;
