//! Data models for keyboard layouts and their character mappings.
//!
//! Models are independent of storage, transport and UI.

pub mod builtin;
pub mod layout;
pub mod mapping;
pub mod position;

// Re-export all model types
pub use builtin::{builtin_layouts, DEFAULT_LAYOUT_KEY};
pub use layout::{is_valid_layout_key, InvalidLayout, Layout, LayoutSummary, RowGrid};
pub use mapping::Mapping;
pub use position::{Case, KeyPosition};
