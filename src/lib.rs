//! LayerKit Library
//!
//! This library provides the layer engine behind the `layerkit` binary:
//! the physical layout of an 80-key split keyboard with its mirror map, the
//! binding node model of exported keymap JSON, override merging, locale
//! translation, label formatting, table rendering and layer comparison.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod keycode_db;
pub mod models;
pub mod services;
