use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use folio_core::catalog::Collection;
use folio_core::error::CoreError;
use folio_events::{ChangeFeed, SubscriptionHandle};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::ws::manager::{changed_message, WsManager};

/// Query string of the realtime endpoint.
#[derive(Debug, Deserialize)]
pub struct RealtimeQuery {
    /// Comma-separated collection names. Absent means every collection.
    pub tables: Option<String>,
}

impl RealtimeQuery {
    fn collections(&self) -> Result<Vec<Collection>, String> {
        let Some(raw) = self.tables.as_deref().filter(|t| !t.trim().is_empty()) else {
            return Ok(Collection::ALL.to_vec());
        };
        let mut tables = Vec::new();
        for name in raw.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let collection = name.parse::<Collection>()?;
            if !tables.contains(&collection) {
                tables.push(collection);
            }
        }
        Ok(tables)
    }
}

/// GET /api/v1/realtime?tables=projects,site_content
///
/// Unknown table names are rejected before the upgrade.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<RealtimeQuery>,
) -> AppResult<impl IntoResponse> {
    let tables = query
        .collections()
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    Ok(ws.on_upgrade(move |socket| {
        handle_socket(socket, state.ws_manager, state.change_feed, tables)
    }))
}

/// Manage a single WebSocket connection after upgrade.
///
///   1. Registers the connection with `WsManager`.
///   2. Subscribes one change-feed channel per requested collection.
///   3. Forwards outbound frames from a sender task.
///   4. Drops the subscriptions and deregisters on disconnect.
async fn handle_socket(
    socket: WebSocket,
    ws_manager: Arc<WsManager>,
    change_feed: Arc<ChangeFeed>,
    tables: Vec<Collection>,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, tables = ?tables, "WebSocket connected");

    let (tx, mut rx) = ws_manager.add(conn_id.clone(), tables.clone()).await;

    let subscriptions: Vec<SubscriptionHandle> = tables
        .iter()
        .map(|&collection| {
            let tx = tx.clone();
            change_feed.subscribe(collection, move || {
                let _ = tx.send(changed_message(collection));
            })
        })
        .collect();
    drop(tx);

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            // The channel is push-only.
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    for handle in subscriptions {
        change_feed.unsubscribe(handle);
    }
    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(tables: Option<&str>) -> RealtimeQuery {
        RealtimeQuery {
            tables: tables.map(str::to_string),
        }
    }

    #[test]
    fn absent_tables_means_every_collection() {
        assert_eq!(query(None).collections().unwrap(), Collection::ALL.to_vec());
        assert_eq!(query(Some(" ")).collections().unwrap(), Collection::ALL.to_vec());
    }

    #[test]
    fn tables_are_parsed_and_deduplicated() {
        assert_eq!(
            query(Some("projects, site_content,projects"))
                .collections()
                .unwrap(),
            vec![Collection::Projects, Collection::SiteContent]
        );
    }

    #[test]
    fn unknown_table_is_an_error() {
        assert!(query(Some("projects,users")).collections().is_err());
    }
}
