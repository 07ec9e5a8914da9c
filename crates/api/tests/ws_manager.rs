//! Tests for the realtime connection manager and its wiring to the change
//! feed.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::Message;
use folio_api::ws::{changed_message, start_heartbeat, WsManager};
use folio_core::catalog::Collection;
use folio_db::models::faq::CreateFaq;
use folio_db::ContentStore;
use tokio_util::sync::CancellationToken;

fn text(message: Message) -> serde_json::Value {
    match message {
        Message::Text(t) => serde_json::from_str(t.as_str()).unwrap(),
        other => panic!("expected text frame, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// WsManager
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_connections() {
    let manager = WsManager::new();
    assert_eq!(manager.connection_count().await, 0);

    let _a = manager.add("a".into(), vec![Collection::Projects]).await;
    let _b = manager.add("b".into(), Collection::ALL.to_vec()).await;
    assert_eq!(manager.connection_count().await, 2);

    manager.remove("a").await;
    assert_eq!(manager.connection_count().await, 1);
}

#[tokio::test]
async fn shutdown_sends_close_and_clears() {
    let manager = WsManager::new();
    let (_, mut rx) = manager.add("a".into(), vec![Collection::Projects]).await;

    manager.shutdown_all().await;

    assert!(matches!(rx.recv().await, Some(Message::Close(None))));
    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn heartbeat_pings_until_cancelled() {
    let manager = Arc::new(WsManager::new());
    let (_, mut rx) = manager.add("a".into(), vec![Collection::Projects]).await;
    let cancel = CancellationToken::new();

    let task = start_heartbeat(Arc::clone(&manager), cancel.clone());
    // The first tick fires immediately.
    assert!(matches!(rx.recv().await, Some(Message::Ping(_))));

    cancel.cancel();
    task.await.unwrap();
}

#[test]
fn changed_message_shape() {
    let json = text(changed_message(Collection::SiteContent));
    assert_eq!(json, serde_json::json!({ "type": "changed", "table": "site_content" }));
}

// ---------------------------------------------------------------------------
// Feed wiring
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_writes_reach_subscribed_connections() {
    let app = common::build_test_app();
    let manager = WsManager::new();
    let (sender, mut rx) = manager.add("a".into(), vec![Collection::Faqs]).await;

    let _handle = app.feed.subscribe(Collection::Faqs, move || {
        let _ = sender.send(changed_message(Collection::Faqs));
    });

    app.store
        .create_faq(&CreateFaq {
            question: "Do you rig?".into(),
            answer: "Yes".into(),
            order_index: 1,
        })
        .await
        .unwrap();

    let message = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("change should arrive")
        .unwrap();
    assert_eq!(text(message)["table"], "faqs");
}

#[tokio::test]
async fn writes_to_other_collections_are_not_forwarded() {
    let app = common::build_test_app();
    let manager = WsManager::new();
    let (sender, mut rx) = manager.add("a".into(), vec![Collection::Projects]).await;

    let _handle = app.feed.subscribe(Collection::Projects, move || {
        let _ = sender.send(changed_message(Collection::Projects));
    });

    app.store
        .create_faq(&CreateFaq {
            question: "Do you rig?".into(),
            answer: "Yes".into(),
            order_index: 1,
        })
        .await
        .unwrap();

    let waited = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
    assert!(waited.is_err());
}
