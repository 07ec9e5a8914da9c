//! Domain logic for the portfolio site.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db`, `events`
//! and `api` crates build on these rules.

pub mod auth;
pub mod catalog;
pub mod download;
pub mod error;
pub mod forms;
pub mod pricing;
pub mod profanity;
pub mod review;
pub mod site_content;
pub mod types;
pub mod variants;
