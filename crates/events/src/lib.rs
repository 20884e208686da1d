//! Outbound notifications for the storefront.
//!
//! - [`Notifier`] is the seam handlers send through; failures are logged by
//!   [`dispatch`] and never propagated to the triggering request.
//! - [`EmailDelivery`] sends over SMTP via `lettre`.
//! - [`LogNotifier`] stands in when SMTP is not configured.
//! - [`templates`] renders the plain-text confirmation and alert emails.

pub mod delivery;
pub mod notifier;
pub mod templates;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use notifier::{dispatch, LogNotifier, Notification, Notifier};
pub use templates::SiteContext;
