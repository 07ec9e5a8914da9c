//! Handlers for the `/auth` resource.
//!
//! Email/password accounts and Discord sign-in share one token scheme:
//! a short-lived JWT access token plus a rotating refresh token.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use folio_core::auth::{is_admin_email, SessionState, MIN_PASSWORD_LENGTH};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::session::CreateSession;
use folio_db::models::user::{CreateEmailUser, User};
use folio_db::NOT_CONFIGURED;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup` and `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Query string of `GET /auth/discord/callback`.
#[derive(Debug, Deserialize)]
pub struct OAuthCallback {
    pub code: String,
}

/// Successful authentication response returned by every sign-in path.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
    pub is_admin: bool,
}

/// Public user info.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub provider: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            username: user.username.clone(),
            avatar_url: user.avatar_url.clone(),
            provider: user.provider.clone(),
        }
    }
}

/// Response of `GET /auth/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub state: SessionState,
    pub user: Option<UserInfo>,
    pub is_admin: bool,
}

/// Response of `GET /auth/discord`.
#[derive(Debug, Serialize)]
pub struct AuthorizeResponse {
    pub url: String,
    /// Opaque value the client should match against the callback's `state`.
    pub state: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let email = input.email.trim().to_string();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Core(CoreError::Validation(
            "A valid email is required".into(),
        )));
    }
    // The admin account only exists through ADMIN_PASSWORD_HASH seeding.
    if is_admin_email(Some(email.as_str()), &state.config.admin_email) {
        tracing::warn!("Refused public sign-up for the admin address");
        return Err(AppError::Core(CoreError::Forbidden(
            "This email cannot be registered".into(),
        )));
    }
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .identity
        .create_email_user(&CreateEmailUser {
            email,
            password_hash,
        })
        .await?;
    tracing::info!(user_id = user.id, "Account created");

    let response = create_auth_response(&state, &user).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .identity
        .find_user_by_email(input.email.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    // Accounts created through Discord have no password.
    let Some(password_hash) = user.password_hash.as_deref() else {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    let password_valid = verify_password(&input.password, password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    Ok(Json(create_auth_response(&state, &user).await?))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = state
        .identity
        .find_active_session(&token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Rotation: the presented token is single-use.
    state.identity.revoke_session(session.id).await?;

    let user = state
        .identity
        .find_user(session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(create_auth_response(&state, &user).await?))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = state
        .identity
        .revoke_user_sessions(auth_user.user_id)
        .await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "Signed out");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Never fails on a bad token: an expired or invalid token is reported as
/// `unauthenticated` so the client can drop its session.
pub async fn me(
    State(state): State<AppState>,
    MaybeAuthUser(auth_user): MaybeAuthUser,
) -> AppResult<Json<MeResponse>> {
    let user = match auth_user {
        Some(auth) => state.identity.find_user(auth.user_id).await?,
        None => None,
    };

    let response = match user {
        Some(user) => MeResponse {
            state: SessionState::Authenticated,
            is_admin: is_admin_email(user.email.as_deref(), &state.config.admin_email),
            user: Some(UserInfo::from(&user)),
        },
        None => MeResponse {
            state: SessionState::Unauthenticated,
            user: None,
            is_admin: false,
        },
    };
    Ok(Json(response))
}

/// GET /api/v1/auth/discord
pub async fn discord_authorize(State(state): State<AppState>) -> AppResult<Json<AuthorizeResponse>> {
    let provider = state
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::Core(CoreError::Unavailable(NOT_CONFIGURED.into())))?;

    let csrf_state = uuid::Uuid::new_v4().to_string();
    let url = provider
        .authorize_url(&csrf_state)
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(Json(AuthorizeResponse {
        url,
        state: csrf_state,
    }))
}

/// GET /api/v1/auth/discord/callback?code=...
pub async fn discord_callback(
    State(state): State<AppState>,
    Query(params): Query<OAuthCallback>,
) -> AppResult<Json<AuthResponse>> {
    let provider = state
        .oauth
        .as_ref()
        .ok_or_else(|| AppError::Core(CoreError::Unavailable(NOT_CONFIGURED.into())))?;

    let profile = provider.exchange_code(&params.code).await.map_err(|e| {
        tracing::warn!(provider = provider.name(), error = %e, "External sign-in failed");
        AppError::Core(CoreError::Unauthorized("External sign-in failed".into()))
    })?;

    let user = state.identity.upsert_external_user(&profile).await?;
    tracing::info!(user_id = user.id, provider = provider.name(), "External sign-in");

    Ok(Json(create_auth_response(&state, &user).await?))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session, and build the response.
async fn create_auth_response(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user.id, user.email.as_deref(), &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    state
        .identity
        .create_session(&CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at,
        })
        .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        is_admin: is_admin_email(user.email.as_deref(), &state.config.admin_email),
        user: UserInfo::from(user),
    })
}
