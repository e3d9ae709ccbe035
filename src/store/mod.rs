//! Reference library and persistence
//!
//! The library maps labels to canonical shapes and is the only long-lived
//! mutable state in the system. It persists as a single JSON document,
//! rewritten whole on every store.

pub mod json_store;
pub mod library;

pub use json_store::{JsonPatternStore, PatternStore};
pub use library::ReferenceLibrary;
