//! Single-admin authorization and session state.

use serde::Serialize;

/// Minimum password length for email sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Sign-in provider recorded on a user.
pub const PROVIDER_EMAIL: &str = "email";
pub const PROVIDER_DISCORD: &str = "discord";

/// Whether `email` is the configured admin address.
///
/// Exact comparison. An empty admin address grants nobody admin rights.
pub fn is_admin_email(email: Option<&str>, admin_email: &str) -> bool {
    !admin_email.is_empty() && email == Some(admin_email)
}

/// Client-visible session state. There are no intermediate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_requires_exact_match() {
        assert!(is_admin_email(Some("owner@site.test"), "owner@site.test"));
        assert!(!is_admin_email(Some("Owner@site.test"), "owner@site.test"));
        assert!(!is_admin_email(None, "owner@site.test"));
    }

    #[test]
    fn empty_admin_address_matches_nobody() {
        assert!(!is_admin_email(Some(""), ""));
        assert!(!is_admin_email(None, ""));
    }
}
