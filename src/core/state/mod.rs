//! Remembered options and their persistence
//!
//! - [`store`] - Key/value stores ([`JsonFileStore`], [`MemoryStore`])
//! - [`manager`] - Typed access to the remembered export options

pub mod manager;
pub mod store;

pub use manager::{RememberedOptions, StateManager};
pub use store::{JsonFileStore, MemoryStore, MetadataStore};
