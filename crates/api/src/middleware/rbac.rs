//! Admin gate.
//!
//! There are no roles: the admin is whoever signs in with the configured
//! admin email.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::auth::is_admin_email;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the admin account.
///
/// Anonymous callers get 401. Signed-in callers with any other email get
/// 403 `ACCESS_DENIED`.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin_email(user.email.as_deref(), &state.config.admin_email) {
            tracing::info!(user_id = user.user_id, "Admin access denied");
            return Err(AppError::AccessDenied);
        }
        Ok(RequireAdmin(user))
    }
}
