//! Service layer for business logic.
//!
//! This module contains the layout registry and the storage backends it
//! persists through.

pub mod registry;
pub mod store;

// Re-export commonly used types
pub use registry::{CodecError, LayoutRegistry, RegistryError};
pub use store::{JsonFileStore, LayoutStore, MemoryStore};
