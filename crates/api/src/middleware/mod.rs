//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the caller if signed in, otherwise nobody.
//! - [`rbac::RequireAdmin`] -- the caller, who must be the admin.

pub mod auth;
pub mod rbac;
