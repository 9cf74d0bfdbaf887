//! Locale translation of keymap files on disk.
//!
//! JSON documents are translated structurally; ZMK source files only have
//! their `&kp` keycodes rewritten, leaving formatting untouched.

use crate::constants::{DEFAULT_KEYMAP_PATH, OVERRIDES_RELATIVE_PATH};
use crate::keycode_db::Locale;
use anyhow::{Context, Result};
use regex::{Captures, Regex};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Top-level field naming a document's locale.
const LOCALE_FIELD: &str = "locale";

/// Files translated by default, relative to the keymap's directory.
const DEFAULT_TARGETS: [&str; 4] = [
    DEFAULT_KEYMAP_PATH,
    "default.json",
    OVERRIDES_RELATIVE_PATH,
    "keymap.zmk",
];

/// Extensions of ZMK keymap source files.
const TEXT_EXTENSIONS: [&str; 2] = ["zmk", "keymap"];

/// How a target file is translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Structured JSON document
    Json,
    /// ZMK keymap source text
    Text,
}

impl TargetKind {
    /// Chooses the kind from the file extension.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        let is_text = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| TEXT_EXTENSIONS.iter().any(|t| t.eq_ignore_ascii_case(ext)));

        if is_text {
            Self::Text
        } else {
            Self::Json
        }
    }
}

fn key_press_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(&kp\s+)([A-Z0-9_]+)").expect("key press pattern is valid"))
}

/// Translates a parsed JSON document.
///
/// An existing top-level `locale` field is set to the locale's tag.
#[must_use]
pub fn translate_json_document(locale: &Locale, document: &Value) -> Value {
    let mut translated = locale.translate_value(document);
    if let Value::Object(members) = &mut translated {
        if members.contains_key(LOCALE_FIELD) {
            members.insert(LOCALE_FIELD.to_string(), Value::String(locale.tag().to_string()));
        }
    }
    translated
}

/// Rewrites the keycode after every `&kp` in ZMK keymap source.
///
/// # Examples
///
/// ```
/// use layerkit::keycode_db::Locale;
/// use layerkit::services::translate::translate_keymap_text;
///
/// let de = Locale::builtin("de").unwrap();
/// let text = "bindings = <&kp Y &kp GT &mo 1>;";
/// assert_eq!(
///     translate_keymap_text(&de, text),
///     "bindings = <&kp DE_Z &kp LS(DE_LABK) &mo 1>;"
/// );
/// ```
#[must_use]
pub fn translate_keymap_text(locale: &Locale, text: &str) -> String {
    key_press_pattern()
        .replace_all(text, |caps: &Captures<'_>| {
            let keycode = &caps[2];
            let replacement = locale
                .translate_keycode(keycode)
                .unwrap_or_else(|| keycode.to_string());
            format!("{}{}", &caps[1], replacement)
        })
        .into_owned()
}

/// Translates one file in place.
pub fn translate_file(locale: &Locale, path: &Path) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let output = match TargetKind::of(path) {
        TargetKind::Text => translate_keymap_text(locale, &content),
        TargetKind::Json => {
            let document: Value = serde_json::from_str(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            let translated = translate_json_document(locale, &document);
            let mut json = serde_json::to_string_pretty(&translated)?;
            json.push('\n');
            json
        }
    };

    fs::write(path, output).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("translated {} to {}", path.display(), locale.tag());
    Ok(())
}

/// Default targets that exist next to the keymap at `keymap_path`.
#[must_use]
pub fn default_targets(keymap_path: &Path) -> Vec<PathBuf> {
    let dir = keymap_path.parent().unwrap_or_else(|| Path::new(""));
    DEFAULT_TARGETS
        .iter()
        .map(|relative| dir.join(relative))
        .filter(|path| path.is_file())
        .collect()
}
