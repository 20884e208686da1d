//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

use serde::{Deserialize, Deserializer};

pub mod app_listing;
pub mod category;
pub mod dashboard;
pub mod demo_request;
pub mod message;
pub mod order;
pub mod product;
pub mod product_image;
pub mod session;
pub mod site_config;
pub mod user;

/// Deserialize a present field (including `null`) as `Some(value)`.
///
/// Paired with `#[serde(default)]` on an `Option<Option<T>>` field, this
/// distinguishes "absent" (`None`) from "set to null" (`Some(None)`).
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
