pub mod auto;
pub mod local;
pub mod memory;

pub use auto::auto_detect_token_store;
pub use local::LocalStorageTokenStore;
pub use memory::MemoryTokenStore;
