//! Dashboard access gate on top of [`AuthUser`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use storefront_core::error::CoreError;
use storefront_core::roles::DASHBOARD_ROLES;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in user whose role may use the admin dashboard.
///
/// A valid token with any other role is refused with 403.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if is_dashboard_role(&user.role) {
            Ok(RequireStaff(user))
        } else {
            tracing::warn!(user_id = user.user_id, role = %user.role, "Dashboard access refused");
            Err(AppError::Core(CoreError::Forbidden(
                "Staff role required".into(),
            )))
        }
    }
}

fn is_dashboard_role(role: &str) -> bool {
    DASHBOARD_ROLES.contains(&role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_and_staff_reach_the_dashboard() {
        assert!(is_dashboard_role("admin"));
        assert!(is_dashboard_role("staff"));
        assert!(!is_dashboard_role("customer"));
        assert!(!is_dashboard_role("Admin"));
    }
}
