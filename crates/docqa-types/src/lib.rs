pub mod admin;
pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod http;
pub mod session;

#[cfg(test)]
mod tests;

pub use error::ClientError;
pub type Result<T> = std::result::Result<T, ClientError>;
