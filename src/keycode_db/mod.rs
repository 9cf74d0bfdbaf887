//! Keycode display database and locale tables.
//!
//! The friendly-label table and the locale keycode prefixes are embedded in
//! the binary at compile time from `keycodes.json`; locale translation tables
//! live next to it under `locales/`.

pub mod display;
pub mod locale;

pub use locale::Locale;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Database schema from keycodes.json.
#[derive(Debug, Clone, Deserialize)]
struct KeycodeDatabase {
    #[serde(default)]
    locale_prefixes: Vec<String>,
    friendly: HashMap<String, String>,
}

/// Keycode → display glyph lookup used for friendly labels.
///
/// Loaded once per invocation and passed by reference to the formatting
/// and rendering functions.
#[derive(Debug, Clone)]
pub struct KeycodeDb {
    /// Keycode or upper-cased behavior name → display text
    friendly: HashMap<String, String>,
    /// Prefixes of locale-specific keycodes (e.g. `DE_`)
    locale_prefixes: Vec<String>,
}

impl KeycodeDb {
    /// Loads the keycode database from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("keycodes.json");
        let db: KeycodeDatabase =
            serde_json::from_str(json_data).context("Failed to parse embedded keycodes.json")?;

        Ok(Self {
            friendly: db.friendly,
            locale_prefixes: db.locale_prefixes,
        })
    }

    /// Maps a keycode to its display glyph.
    ///
    /// Unmapped locale keycodes lose their locale prefix (`DE_FOO` → `FOO`);
    /// anything else unmapped is returned as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerkit::keycode_db::KeycodeDb;
    ///
    /// let db = KeycodeDb::load().unwrap();
    /// assert_eq!(db.friendly_label("BSPC"), "Backsp");
    /// assert_eq!(db.friendly_label("DE_ADIA"), "Ä");
    /// assert_eq!(db.friendly_label("F13"), "F13");
    /// ```
    #[must_use]
    pub fn friendly_label<'a>(&'a self, keycode: &'a str) -> &'a str {
        if let Some(label) = self.friendly.get(keycode) {
            return label;
        }

        self.locale_prefixes
            .iter()
            .find_map(|prefix| keycode.strip_prefix(prefix.as_str()))
            .unwrap_or(keycode)
    }

    /// Returns true if the keycode has an explicit display glyph.
    #[must_use]
    pub fn has_friendly_label(&self, keycode: &str) -> bool {
        self.friendly.contains_key(keycode)
    }

    /// Gets the number of keycodes with display glyphs.
    #[must_use]
    pub fn keycode_count(&self) -> usize {
        self.friendly.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_db() -> KeycodeDb {
        KeycodeDb::load().expect("Failed to load keycode database")
    }

    #[test]
    fn test_load_database() {
        let db = get_test_db();
        assert!(db.keycode_count() > 100);
    }

    #[test]
    fn test_friendly_named_keys() {
        let db = get_test_db();
        assert_eq!(db.friendly_label("RET"), "Enter");
        assert_eq!(db.friendly_label("PG_DN"), "PgDn");
        assert_eq!(db.friendly_label("SCRL_UP"), "Scroll↑");
        assert_eq!(db.friendly_label("N7"), "7");
    }

    #[test]
    fn test_friendly_punctuation() {
        let db = get_test_db();
        assert_eq!(db.friendly_label("BSLH"), "\\");
        assert_eq!(db.friendly_label("SQT"), "'");
        assert_eq!(db.friendly_label("DQT"), "\"");
    }

    #[test]
    fn test_friendly_locale_fallback() {
        let db = get_test_db();
        assert_eq!(db.friendly_label("DE_SS"), "ß");
        assert_eq!(db.friendly_label("DE_EURO"), "EURO");
        assert!(!db.has_friendly_label("DE_EURO"));
    }

    #[test]
    fn test_friendly_unknown_passthrough() {
        let db = get_test_db();
        assert_eq!(db.friendly_label("C_VOL_UP"), "C_VOL_UP");
        assert_eq!(db.friendly_label(""), "");
    }
}
