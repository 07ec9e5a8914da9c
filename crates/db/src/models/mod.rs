//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod faq;
pub mod pricing;
pub mod project;
pub mod review;
pub mod session;
pub mod site_content;
pub mod terms;
pub mod user;
