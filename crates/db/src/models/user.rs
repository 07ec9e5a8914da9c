//! User account models and DTOs.

use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub display_name: Option<String>,
    /// Username at the external provider.
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    /// `"email"` or the external provider name.
    pub provider: String,
    /// Account id at the external provider.
    pub provider_subject: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for an email/password sign-up.
#[derive(Debug, Clone)]
pub struct CreateEmailUser {
    pub email: String,
    pub password_hash: String,
}

/// Profile returned by an external OAuth provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProfile {
    pub provider: String,
    pub subject: String,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
}
