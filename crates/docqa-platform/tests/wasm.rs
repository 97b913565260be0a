//! WASM-target tests for docqa-platform.
//!
//! Run in a real browser via `wasm-pack test --headless --chrome`; the
//! adapters need `window`, `document` and localStorage.

use wasm_bindgen_test::*;

use docqa_core::ports::{HttpTransport, TokenStore};
use docqa_core::session::{SessionState, SessionStore};
use docqa_platform::config::{CONFIG_STORAGE_KEY, load_config};
use docqa_platform::route;
use docqa_platform::storage::*;
use docqa_platform::FetchTransport;
use docqa_types::config::ClientConfig;
use docqa_types::http::{HttpMethod, HttpRequest, RequestBody};
use docqa_types::ClientError;

wasm_bindgen_test_configure!(run_in_browser);

const TEST_KEY: &str = "docqa-test:token";

fn storage() -> web_sys::Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

// ─── Token Store Tests ───────────────────────────────────

#[wasm_bindgen_test]
fn memory_store_round_trip() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.read_token().unwrap(), None);
    store.write_token("abc").unwrap();
    assert_eq!(store.read_token().unwrap().as_deref(), Some("abc"));
    store.clear_token().unwrap();
    assert_eq!(store.read_token().unwrap(), None);
    assert_eq!(store.backend_name(), "memory");
}

#[wasm_bindgen_test]
fn local_store_uses_configured_key() {
    let store = LocalStorageTokenStore::open(TEST_KEY).unwrap();
    store.write_token("tok-1").unwrap();
    assert_eq!(storage().get_item(TEST_KEY).unwrap().as_deref(), Some("tok-1"));
    store.clear_token().unwrap();
    assert_eq!(storage().get_item(TEST_KEY).unwrap(), None);
}

#[wasm_bindgen_test]
fn auto_detect_prefers_local_storage() {
    let store = auto_detect_token_store(TEST_KEY);
    assert_eq!(store.backend_name(), "localStorage");
}

#[wasm_bindgen_test]
fn session_survives_new_store_instance() {
    // {"sub":"alice","role":"admin"}
    let token = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJhbGljZSIsInJvbGUiOiJhZG1pbiJ9.sig";
    let mut first = SessionStore::new(auto_detect_token_store(TEST_KEY));
    first.init();
    first.login(token).unwrap();

    let mut second = SessionStore::new(auto_detect_token_store(TEST_KEY));
    second.init();
    assert_eq!(second.current().map(|s| s.subject.as_str()), Some("alice"));

    second.logout();
    let mut third = SessionStore::new(auto_detect_token_store(TEST_KEY));
    third.init();
    assert_eq!(third.state(), &SessionState::Anonymous);
}

// ─── Config Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn config_override_from_local_storage() {
    storage()
        .set_item(CONFIG_STORAGE_KEY, r#"{"api_url": "https://qa.example.org"}"#)
        .unwrap();
    assert_eq!(load_config().api_url, "https://qa.example.org");

    storage().set_item(CONFIG_STORAGE_KEY, "{not json").unwrap();
    assert_eq!(load_config(), ClientConfig::default());
    storage().remove_item(CONFIG_STORAGE_KEY).unwrap();
}

// ─── Route Tests ─────────────────────────────────────────

#[wasm_bindgen_test]
fn route_hash_round_trip() {
    route::set_path("/admin");
    assert_eq!(route::current_path(), "/admin");
    route::set_path("/");
    assert_eq!(route::current_path(), "/");
}

// ─── Transport Tests ─────────────────────────────────────

#[wasm_bindgen_test]
async fn fetch_unreachable_host_is_network_error() {
    let transport = FetchTransport::new();
    let req = HttpRequest {
        method: HttpMethod::Get,
        url: "http://127.0.0.1:9/threads/".to_string(),
        headers: vec![],
        body: RequestBody::Empty,
    };
    let result = transport.send(req).await;
    assert!(matches!(result, Err(ClientError::Network(_))));
}
