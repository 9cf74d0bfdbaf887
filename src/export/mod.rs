//! Text rendering of layers.
//!
//! This module turns a layer into the two-handed ASCII table printed by
//! `layerkit show`.

pub mod layer_table;

pub use layer_table::{render_layer_table, truncate, TableOptions};
