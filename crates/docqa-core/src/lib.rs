pub mod admin;
pub mod api;
pub mod auth;
pub mod chat;
pub mod event_bus;
pub mod guard;
pub mod ports;
pub mod session;
