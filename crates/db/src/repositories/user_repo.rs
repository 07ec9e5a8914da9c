//! Repository for the `users` table.

use folio_core::auth::PROVIDER_EMAIL;
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateEmailUser, ExternalProfile, User};

const COLUMNS: &str = "\
    id, email, password_hash, display_name, username, avatar_url, \
    provider, provider_subject, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Create an email/password account. A taken email surfaces as a
    /// unique violation on `uq_users_email`.
    pub async fn create_email_user(
        pool: &PgPool,
        input: &CreateEmailUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, provider) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(PROVIDER_EMAIL)
            .fetch_one(pool)
            .await
    }

    /// Create or refresh the account linked to an external provider identity.
    pub async fn upsert_external(
        pool: &PgPool,
        profile: &ExternalProfile,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                 (provider, provider_subject, username, display_name, avatar_url, email) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT ON CONSTRAINT uq_users_provider_subject DO UPDATE SET \
                 username = EXCLUDED.username, \
                 display_name = EXCLUDED.display_name, \
                 avatar_url = EXCLUDED.avatar_url, \
                 email = COALESCE(EXCLUDED.email, users.email) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&profile.provider)
            .bind(&profile.subject)
            .bind(&profile.username)
            .bind(&profile.display_name)
            .bind(&profile.avatar_url)
            .bind(&profile.email)
            .fetch_one(pool)
            .await
    }
}
