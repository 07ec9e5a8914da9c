use async_trait::async_trait;
use chrono::Utc;
use folio_core::auth::PROVIDER_EMAIL;
use folio_core::types::DbId;
use tokio::sync::RwLock;

use super::{IdentityStore, StoreError, StoreResult};
use crate::models::session::{CreateSession, Session};
use crate::models::user::{CreateEmailUser, ExternalProfile, User};
use crate::repositories::{SessionRepo, UserRepo};
use crate::DbPool;

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// [`IdentityStore`] over the `users` and `sessions` tables.
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: DbPool,
}

impl PgIdentityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn create_email_user(&self, input: &CreateEmailUser) -> StoreResult<User> {
        UserRepo::create_email_user(&self.pool, input)
            .await
            .map_err(|e| {
                let taken = matches!(
                    &e,
                    sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email")
                );
                if taken {
                    StoreError::Conflict(format!("Email '{}' is already registered", input.email))
                } else {
                    StoreError::Database(e)
                }
            })
    }

    async fn upsert_external_user(&self, profile: &ExternalProfile) -> StoreResult<User> {
        Ok(UserRepo::upsert_external(&self.pool, profile).await?)
    }

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_active_session(&self, token_hash: &str) -> StoreResult<Option<Session>> {
        Ok(SessionRepo::find_active_by_token_hash(&self.pool, token_hash).await?)
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }

    async fn revoke_user_sessions(&self, user_id: DbId) -> StoreResult<u64> {
        Ok(SessionRepo::revoke_all_for_user(&self.pool, user_id).await?)
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Accounts {
    last_id: DbId,
    users: Vec<User>,
    sessions: Vec<Session>,
}

impl Accounts {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }
}

/// Process-local [`IdentityStore`].
#[derive(Default)]
pub struct MemoryIdentityStore {
    accounts: RwLock<Accounts>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .users
            .iter()
            .find(|u| u.email.as_deref() == Some(email))
            .cloned())
    }

    async fn create_email_user(&self, input: &CreateEmailUser) -> StoreResult<User> {
        let mut accounts = self.accounts.write().await;
        if accounts
            .users
            .iter()
            .any(|u| u.email.as_deref() == Some(input.email.as_str()))
        {
            return Err(StoreError::Conflict(format!(
                "Email '{}' is already registered",
                input.email
            )));
        }
        let now = Utc::now();
        let user = User {
            id: accounts.next_id(),
            email: Some(input.email.clone()),
            password_hash: Some(input.password_hash.clone()),
            display_name: None,
            username: None,
            avatar_url: None,
            provider: PROVIDER_EMAIL.to_string(),
            provider_subject: None,
            created_at: now,
            updated_at: now,
        };
        accounts.users.push(user.clone());
        Ok(user)
    }

    async fn upsert_external_user(&self, profile: &ExternalProfile) -> StoreResult<User> {
        let mut accounts = self.accounts.write().await;
        let now = Utc::now();
        let existing = accounts.users.iter_mut().find(|u| {
            u.provider == profile.provider
                && u.provider_subject.as_deref() == Some(profile.subject.as_str())
        });
        if let Some(user) = existing {
            user.username = profile.username.clone();
            user.display_name = profile.display_name.clone();
            user.avatar_url = profile.avatar_url.clone();
            if profile.email.is_some() {
                user.email = profile.email.clone();
            }
            user.updated_at = now;
            return Ok(user.clone());
        }
        let user = User {
            id: accounts.next_id(),
            email: profile.email.clone(),
            password_hash: None,
            display_name: profile.display_name.clone(),
            username: profile.username.clone(),
            avatar_url: profile.avatar_url.clone(),
            provider: profile.provider.clone(),
            provider_subject: Some(profile.subject.clone()),
            created_at: now,
            updated_at: now,
        };
        accounts.users.push(user.clone());
        Ok(user)
    }

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session> {
        let mut accounts = self.accounts.write().await;
        let session = Session {
            id: accounts.next_id(),
            user_id: input.user_id,
            refresh_token_hash: input.refresh_token_hash.clone(),
            expires_at: input.expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        };
        accounts.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_active_session(&self, token_hash: &str) -> StoreResult<Option<Session>> {
        let now = Utc::now();
        let accounts = self.accounts.read().await;
        Ok(accounts
            .sessions
            .iter()
            .find(|s| {
                s.refresh_token_hash == token_hash && s.revoked_at.is_none() && s.expires_at > now
            })
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> StoreResult<bool> {
        let mut accounts = self.accounts.write().await;
        match accounts
            .sessions
            .iter_mut()
            .find(|s| s.id == id && s.revoked_at.is_none())
        {
            Some(session) => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn revoke_user_sessions(&self, user_id: DbId) -> StoreResult<u64> {
        let now = Utc::now();
        let mut accounts = self.accounts.write().await;
        let mut revoked = 0;
        for session in accounts
            .sessions
            .iter_mut()
            .filter(|s| s.user_id == user_id && s.revoked_at.is_none())
        {
            session.revoked_at = Some(now);
            revoked += 1;
        }
        Ok(revoked)
    }
}
