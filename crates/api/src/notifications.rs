//! Glue between handlers and the notification channel.
//!
//! Handlers call [`notify`] after their write has committed. Nothing here
//! can fail the request: a missing site configuration falls back to the
//! defaults and send failures are logged by [`dispatch`].

use storefront_db::repositories::SiteConfigRepo;
use storefront_events::{dispatch, Notification, SiteContext};

use crate::state::AppState;

/// Site details for email templates, from the active configuration.
pub async fn site_context(state: &AppState) -> SiteContext {
    let values = match SiteConfigRepo::find_active(&state.pool).await {
        Ok(Some(config)) => config.resolved(),
        Ok(None) => SiteConfigRepo::defaults(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load site config for notification, using defaults");
            SiteConfigRepo::defaults()
        }
    };

    SiteContext {
        site_name: values.site_name,
        currency_symbol: values.currency_symbol,
        admin_email: state.config.admin_email.clone(),
    }
}

/// Render notifications against the current site context and send them.
pub async fn notify<F>(state: &AppState, render: F)
where
    F: FnOnce(&SiteContext) -> Vec<Notification>,
{
    let site = site_context(state).await;
    dispatch(&state.notifier, render(&site)).await;
}
