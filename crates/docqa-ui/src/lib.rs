//! egui panels for the DocQA console.
//!
//! Panels render view state owned by `docqa-core` and return actions;
//! they never perform I/O themselves.

pub mod panels;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;
