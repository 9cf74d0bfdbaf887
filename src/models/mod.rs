//! Data models for keymap documents, binding nodes and the physical layout.
//!
//! Models are independent of loading, rendering and command-line concerns.

pub mod binding;
pub mod keymap;
pub mod physical_layout;

// Re-export all model types
pub use binding::BindingNode;
pub use keymap::{KeymapDocument, OverrideSet, PreserveList};
pub use physical_layout::{KeyLocation, PhysicalLayout, Row, Side, Slot};
