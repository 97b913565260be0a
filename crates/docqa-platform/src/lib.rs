//! Browser adapters for the docqa-core ports.

pub mod config;
pub mod dialog;
pub mod file_picker;
pub mod http;
pub mod route;
pub mod storage;
pub mod watch;

pub use http::FetchTransport;
pub use storage::{LocalStorageTokenStore, MemoryTokenStore, auto_detect_token_store};
