//! Request handlers, one module per resource.
//!
//! Public storefront handlers live in [`catalog`], [`checkout`], [`inquiry`]
//! and the read half of [`apps`]; everything else requires a staff token.

pub mod apps;
pub mod auth;
pub mod catalog;
pub mod categories;
pub mod checkout;
pub mod dashboard;
pub mod demos;
pub mod inquiry;
pub mod messages;
pub mod orders;
pub mod products;
pub mod site_config;
