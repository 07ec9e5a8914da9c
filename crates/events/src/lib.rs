//! Change notification for the site's content collections.
//!
//! - [`ChangeFeed`]: in-process hub backed by `tokio::sync::broadcast`.
//!   Callers subscribe a callback to one collection and get back a
//!   [`SubscriptionHandle`] that cancels the subscription when dropped.
//! - [`ChangeEvent`]: what was touched. Subscribers only learn *that* a
//!   collection changed and are expected to re-read it.
//! - [`ChangeListener`]: background task forwarding Postgres
//!   `NOTIFY content_changes` messages into the feed, so writes from any
//!   client reach every subscriber.

pub mod feed;
pub mod listener;

pub use feed::{ChangeEvent, ChangeFeed, SubscriptionHandle};
pub use listener::ChangeListener;
