//! Port traits: the boundary between core logic and the browser.
//!
//! These traits are defined here in `docqa-core` (pure Rust).
//! Browser implementations live in `docqa-platform`.
//! The core never imports platform code; it only depends on these traits.

use async_trait::async_trait;
use docqa_types::{
    Result,
    admin::{Collection, DbStats, DocumentPage, ResponseStats, TokenUsageStats},
    chat::{ChatReply, Thread, ThreadHistory},
    http::{HttpRequest, HttpResponse, UploadFile},
    session::LoginResponse,
};

// ─── HTTP Port ───────────────────────────────────────────────

#[async_trait(?Send)]
pub trait HttpTransport {
    /// Send a request. Any HTTP status is `Ok`; only transport
    /// failures (no response at all) are `Err`.
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse>;
}

// ─── Token Storage Port ──────────────────────────────────────

/// Persistent slot for the bearer token (browser `localStorage`).
pub trait TokenStore {
    fn read_token(&self) -> Result<Option<String>>;

    fn write_token(&self, token: &str) -> Result<()>;

    fn clear_token(&self) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Backend API Port ────────────────────────────────────────

/// One method per backend operation.
#[async_trait(?Send)]
pub trait ApiPort {
    async fn login(&self, username: &str, password: &str) -> Result<LoginResponse>;
    async fn register(&self, username: &str, password: &str) -> Result<()>;

    async fn list_threads(&self) -> Result<Vec<Thread>>;
    async fn thread_history(&self, thread_id: &str) -> Result<ThreadHistory>;
    async fn rename_thread(&self, thread_id: &str, name: &str) -> Result<()>;
    async fn delete_thread(&self, thread_id: &str) -> Result<()>;
    async fn delete_threads(&self, thread_ids: &[String]) -> Result<()>;
    async fn post_chat_message(&self, thread_id: &str, message: &str) -> Result<ChatReply>;

    async fn upload_document(
        &self,
        file: UploadFile,
        collection_name: &str,
        source_url: Option<&str>,
    ) -> Result<()>;
    async fn list_collections(&self) -> Result<Vec<Collection>>;
    async fn delete_collection(&self, name: &str) -> Result<()>;
    async fn collection_documents(&self, name: &str, limit: u64, offset: u64) -> Result<DocumentPage>;

    async fn db_stats(&self) -> Result<DbStats>;
    async fn response_stats(&self) -> Result<ResponseStats>;
    async fn token_usage_stats(&self) -> Result<TokenUsageStats>;
}
