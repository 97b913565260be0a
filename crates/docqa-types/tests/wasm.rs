//! WASM-target tests for docqa-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use docqa_types::admin::*;
use docqa_types::chat::*;
use docqa_types::config::*;
use docqa_types::error::*;
use docqa_types::http::*;
use docqa_types::session::*;

// ─── Chat Tests ──────────────────────────────────────────

#[wasm_bindgen_test]
fn thread_new_id_is_uuid() {
    let id = Thread::new_id();
    assert_eq!(id.len(), 36);
    assert_ne!(id, Thread::new_id());
}

#[wasm_bindgen_test]
fn thread_started_with_truncates_name() {
    let long = "a".repeat(50);
    let thread = Thread::started_with("t1", &long);
    assert_eq!(thread.name, format!("{}...", "a".repeat(40)));
    assert!(!thread.updated_at.is_empty());
}

#[wasm_bindgen_test]
fn history_entry_maps_sender() {
    let history: ThreadHistory = serde_json::from_str(
        r#"{"messages": [{"type": "human", "content": "q"}, {"type": "ai", "content": "a", "response_time": 0.5}]}"#,
    )
    .unwrap();
    let messages: Vec<ChatMessage> = history.messages.into_iter().map(ChatMessage::from).collect();
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[1].sender, Sender::Ai);
    assert_eq!(messages[1].response_time_label().as_deref(), Some("Answered in 0.50 s"));
}

#[wasm_bindgen_test]
fn chat_reply_without_sources() {
    let reply: ChatReply = serde_json::from_str(r#"{"answer": "yes"}"#).unwrap();
    let msg = ChatMessage::from(reply);
    assert!(msg.sources.is_empty());
    assert!(msg.response_time.is_none());
}

// ─── Admin Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn dashboard_rows_join_counts() {
    let dashboard = Dashboard {
        db_stats: DbStats {
            total_collections: 2,
            total_documents: 3,
            details: vec![CollectionDetail { name: "a".to_string(), document_count: 3 }],
        },
        collections: vec![
            Collection { id: "1".to_string(), name: "a".to_string() },
            Collection { id: "2".to_string(), name: "b".to_string() },
        ],
        response_stats: ResponseStats::default(),
        token_stats: TokenUsageStats::default(),
    };
    let rows = dashboard.rows();
    assert_eq!(rows[0].count_label(), "3");
    assert_eq!(rows[1].count_label(), "N/A");
}

#[wasm_bindgen_test]
fn pagination_labels() {
    let p = Pagination { offset: 20, limit: 10, total: 25, has_next: false };
    assert_eq!(p.page(), 3);
    assert_eq!(p.range_label(), "21 - 25");
}

// ─── Session & Config Tests ──────────────────────────────

#[wasm_bindgen_test]
fn role_from_claim() {
    assert_eq!(Role::from_claim(Some("admin")), Role::Admin);
    assert_eq!(Role::from_claim(None), Role::User);
}

#[wasm_bindgen_test]
fn config_override_keeps_defaults() {
    let config = ClientConfig::from_json(r#"{"api_url": "https://qa.example.org"}"#).unwrap();
    assert_eq!(config.api_url, "https://qa.example.org");
    assert_eq!(config.token_key, DEFAULT_TOKEN_KEY);
}

#[wasm_bindgen_test]
fn config_rejects_empty_url() {
    assert!(ClientConfig::from_json(r#"{"api_url": " "}"#).is_err());
}

// ─── Error & HTTP Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn api_error_displays_detail() {
    let err = ClientError::Api { status: 401, message: "Could not validate credentials".to_string() };
    assert_eq!(err.to_string(), "Could not validate credentials");
    assert!(err.is_unauthorized());
}

#[wasm_bindgen_test]
fn response_ok_range() {
    let resp = |status| HttpResponse { status, status_text: String::new(), body: String::new() };
    assert!(resp(200).ok());
    assert!(resp(204).ok());
    assert!(!resp(302).ok());
    assert!(!resp(404).ok());
}
