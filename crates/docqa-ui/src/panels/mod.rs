pub mod admin;
pub mod chat;
pub mod login;
pub mod nav;
pub mod register;
pub mod viewer;
