//! The admin account is provisioned from configuration, never through
//! public sign-up.

use folio_db::models::user::CreateEmailUser;
use folio_db::{IdentityStore, StoreError};

/// Create the admin's email/password account if it does not exist yet.
///
/// `password_hash` is an argon2 PHC string (`ADMIN_PASSWORD_HASH`).
/// Returns `true` when an account was created. An existing account is left
/// untouched, so restarting with a new hash does not reset the password.
pub async fn seed_admin_account(
    identity: &dyn IdentityStore,
    admin_email: &str,
    password_hash: &str,
) -> Result<bool, StoreError> {
    if admin_email.is_empty() || !identity.is_configured() {
        return Ok(false);
    }
    if identity.find_user_by_email(admin_email).await?.is_some() {
        return Ok(false);
    }

    let created = identity
        .create_email_user(&CreateEmailUser {
            email: admin_email.to_string(),
            password_hash: password_hash.to_string(),
        })
        .await;

    match created {
        Ok(user) => {
            tracing::info!(user_id = user.id, "Admin account seeded");
            Ok(true)
        }
        // Another instance seeded it between the lookup and the insert.
        Err(StoreError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
