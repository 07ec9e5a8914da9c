//! Authentication primitives.
//!
//! - [`admin`] -- seeding the configured admin account.
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- JWT access tokens and refresh-token helpers.
//! - [`oauth`] -- external sign-in providers (Discord).

pub mod admin;
pub mod jwt;
pub mod oauth;
pub mod password;
