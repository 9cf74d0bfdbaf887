//! Service layer for keymap operations.
//!
//! Services sit between the document models and the command line: they
//! load documents, merge overrides, resolve layer identifiers, compare
//! layers and translate files.

pub mod layer_diff;
pub mod layer_lookup;
pub mod loader;
pub mod overrides;
pub mod translate;

// Re-export commonly used types and functions
pub use layer_diff::{diff_labels, LayerComparison, Mismatch};
pub use layer_lookup::{detect_default_layers, locate_layer, resolve_batch};
pub use loader::{DocumentLoader, DocumentSpec, GitLoader};
pub use overrides::{capture_overrides, merge_with_override, merged_layer, CaptureResult};
