pub mod admin;
pub mod auth;
pub mod downloads;
pub mod pages;
pub mod reviews;
