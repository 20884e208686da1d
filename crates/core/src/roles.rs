//! Well-known staff role names.
//!
//! These must match the `CHECK` constraint on `users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_STAFF: &str = "staff";

/// All roles allowed to use the admin dashboard.
pub const DASHBOARD_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_STAFF];
