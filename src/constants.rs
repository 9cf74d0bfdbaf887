//! Application-wide constants.
//!
//! This module defines the application name and the document locations
//! shared by the commands.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "LayerKit";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "layerkit";

/// Keymap document used when neither the command line nor the config names one.
pub const DEFAULT_KEYMAP_PATH: &str = "keymap.json";

/// Override document, relative to the keymap's directory.
pub const OVERRIDES_RELATIVE_PATH: &str = "custom/layer-overrides.json";

/// Preserve-list document, relative to the keymap's directory.
pub const PRESERVE_LIST_RELATIVE_PATH: &str = "custom/layers_to_preserve.json";

/// Layers shown or compared when nothing else is requested.
pub const FALLBACK_DEFAULT_LAYERS: [&str; 2] = ["QWERTY", "Symbol"];

/// Default table cell width in characters.
pub const DEFAULT_CELL_WIDTH: usize = 7;

/// Narrowest allowed table cell (one character plus the ellipsis).
pub const MIN_CELL_WIDTH: usize = 2;
