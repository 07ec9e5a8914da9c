use std::sync::Arc;

use folio_db::{ContentStore, IdentityStore};
use folio_events::ChangeFeed;

use crate::auth::oauth::OAuthProvider;
use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or already shares its inner
/// state.
#[derive(Clone)]
pub struct AppState {
    /// Content collections (Postgres, in-memory or unconfigured).
    pub store: Arc<dyn ContentStore>,
    /// Accounts and refresh-token sessions.
    pub identity: Arc<dyn IdentityStore>,
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// In-process fan-out of content changes.
    pub change_feed: Arc<ChangeFeed>,
    /// External sign-in provider, when configured.
    pub oauth: Option<Arc<dyn OAuthProvider>>,
    /// Outbound client for fetching images into download bundles.
    pub http: reqwest::Client,
}
