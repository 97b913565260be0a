//! WASM-target tests for docqa-core.
//!
//! Runs EventBus, session, guard and chat/admin state tests under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use docqa_core::admin::*;
use docqa_core::chat::*;
use docqa_core::event_bus::EventBus;
use docqa_core::guard::*;
use docqa_core::ports::TokenStore;
use docqa_core::session::*;
use docqa_types::event::AppEvent;

use std::cell::RefCell;
use std::rc::Rc;

struct CellTokens(RefCell<Option<String>>);

impl TokenStore for CellTokens {
    fn read_token(&self) -> docqa_types::Result<Option<String>> {
        Ok(self.0.borrow().clone())
    }
    fn write_token(&self, token: &str) -> docqa_types::Result<()> {
        *self.0.borrow_mut() = Some(token.to_string());
        Ok(())
    }
    fn clear_token(&self) -> docqa_types::Result<()> {
        *self.0.borrow_mut() = None;
        Ok(())
    }
    fn backend_name(&self) -> &str {
        "cell"
    }
}

// {"sub":"alice","role":"admin"}
const ADMIN_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhbGljZSIsInJvbGUiOiJhZG1pbiJ9.sig";

// ─── EventBus Tests ──────────────────────────────────────

#[wasm_bindgen_test]
fn event_bus_emit_and_drain() {
    let bus = EventBus::new();
    bus.sender().emit(AppEvent::ThreadDeleted { thread_id: "t1".to_string() });
    bus.sender().emit(AppEvent::UploadFailed { message: "x".to_string() });
    assert_eq!(bus.drain().len(), 2);
    assert!(bus.drain().is_empty());
}

#[wasm_bindgen_test]
fn event_bus_drops_events_from_previous_generation() {
    let bus = EventBus::new();
    let stale = bus.sender();
    bus.advance();
    stale.emit(AppEvent::ThreadDeleted { thread_id: "t1".to_string() });
    bus.sender().emit(AppEvent::UploadFailed { message: "x".to_string() });
    assert_eq!(bus.drain(), vec![AppEvent::UploadFailed { message: "x".to_string() }]);
}

// ─── Session Tests ───────────────────────────────────────

#[wasm_bindgen_test]
fn session_login_then_reload() {
    let tokens = Rc::new(CellTokens(RefCell::new(None)));
    let mut store = SessionStore::new(tokens.clone());
    store.init();
    let session = store.login(ADMIN_TOKEN).unwrap();
    assert_eq!(session.subject, "alice");
    assert!(session.is_admin());

    let mut reloaded = SessionStore::new(tokens);
    reloaded.init();
    assert_eq!(reloaded.current(), Some(&session));
}

#[wasm_bindgen_test]
fn session_logout_is_anonymous() {
    let tokens = Rc::new(CellTokens(RefCell::new(Some(ADMIN_TOKEN.to_string()))));
    let mut store = SessionStore::new(tokens.clone());
    store.init();
    store.logout();
    assert_eq!(store.state(), &SessionState::Anonymous);
    assert!(tokens.read_token().unwrap().is_none());
}

// ─── Guard Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn guard_redirects_anonymous_to_login() {
    assert_eq!(resolve(&SessionState::Anonymous, Route::Chat), (Route::Login, GuardDecision::Render));
    assert_eq!(resolve(&SessionState::Loading, Route::Chat), (Route::Chat, GuardDecision::Loading));
}

#[wasm_bindgen_test]
fn guard_admin_renders_for_admin() {
    let state = SessionState::Authenticated(decode_token(ADMIN_TOKEN).unwrap());
    assert_eq!(resolve(&state, Route::Admin), (Route::Admin, GuardDecision::Render));
}

// ─── Chat / Admin State Tests ────────────────────────────

#[wasm_bindgen_test]
fn chat_optimistic_send() {
    let mut chat = ChatState::new();
    chat.input = "hi".to_string();
    let out = chat.begin_send().unwrap();
    assert!(out.is_new_thread);
    assert_eq!(chat.messages.len(), 1);
    chat.apply(&AppEvent::ReplyFailed {
        thread_id: out.thread_id,
        message: "offline".to_string(),
        unauthorized: false,
    });
    assert_eq!(chat.messages.len(), 2);
    assert!(!chat.sending);
}

#[wasm_bindgen_test]
fn collection_name_normalized() {
    assert_eq!(normalize_collection_name("Quy Che 2025"), "quy_che_2025");
}
