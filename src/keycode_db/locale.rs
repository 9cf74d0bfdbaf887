//! Locale keycode translation.
//!
//! A locale is two tables loaded from embedded JSON:
//!
//! - `renames`: keycode → locale keycode, replacing only a node's `value`
//! - `rewrites`: keycode → arbitrary node tree replacing the whole node,
//!   for symbols that need a modifier on the target layout (`GT` becomes
//!   `LS(DE_LABK)` on a German layout)
//!
//! Translation is depth-first: parameters are translated before their
//! parent is looked up.

use crate::models::BindingNode;
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Built-in locales: (name, tag, embedded tables).
const BUILTIN_LOCALES: [(&str, &str, &str); 1] =
    [("de", "de-DE", include_str!("locales/de.json"))];

/// Schema of a locale file.
#[derive(Debug, Deserialize)]
struct LocaleTables {
    name: String,
    tag: String,
    renames: HashMap<String, String>,
    #[serde(default)]
    rewrites: HashMap<String, BindingNode>,
}

/// Keycode translation tables for one target locale.
#[derive(Debug, Clone)]
pub struct Locale {
    name: String,
    tag: String,
    renames: HashMap<String, String>,
    rewrites: HashMap<String, BindingNode>,
    /// `rewrites` pre-serialized for raw JSON translation
    rewrite_values: HashMap<String, Value>,
}

impl Locale {
    /// Loads a built-in locale by name or tag (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use layerkit::keycode_db::Locale;
    ///
    /// let de = Locale::builtin("de").unwrap();
    /// assert_eq!(de.tag(), "de-DE");
    /// assert!(Locale::builtin("xx").is_err());
    /// ```
    pub fn builtin(name: &str) -> Result<Self> {
        let (_, _, json) = BUILTIN_LOCALES
            .iter()
            .find(|(locale, tag, _)| locale.eq_ignore_ascii_case(name) || tag.eq_ignore_ascii_case(name))
            .with_context(|| {
                format!(
                    "unknown locale {:?} (available: {})",
                    name,
                    Self::available().join(", ")
                )
            })?;

        Self::from_json(json)
    }

    /// Names of the built-in locales.
    #[must_use]
    pub fn available() -> Vec<&'static str> {
        BUILTIN_LOCALES.iter().map(|(name, _, _)| *name).collect()
    }

    /// Parses and validates locale tables.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON, when a rename target is itself a translation
    /// source, or when a rewrite tree mentions a rewrite source. Both would
    /// make translation non-idempotent, and the latter non-terminating.
    pub fn from_json(json: &str) -> Result<Self> {
        let tables: LocaleTables =
            serde_json::from_str(json).context("Failed to parse locale tables")?;

        let mut rewrite_values = HashMap::new();
        for (source, tree) in &tables.rewrites {
            rewrite_values.insert(source.clone(), serde_json::to_value(tree)?);
        }

        let locale = Self {
            name: tables.name,
            tag: tables.tag,
            renames: tables.renames,
            rewrites: tables.rewrites,
            rewrite_values,
        };
        locale.validate()?;

        Ok(locale)
    }

    fn is_source(&self, keycode: &str) -> bool {
        self.renames.contains_key(keycode) || self.rewrites.contains_key(keycode)
    }

    fn validate(&self) -> Result<()> {
        for (source, target) in &self.renames {
            if self.is_source(target) {
                anyhow::bail!(
                    "locale {}: {} renames to {}, which is itself translated",
                    self.name,
                    source,
                    target
                );
            }
        }

        for (source, tree) in &self.rewrites {
            let mut pending = vec![tree];
            while let Some(node) = pending.pop() {
                if self.rewrites.contains_key(node.value()) {
                    anyhow::bail!(
                        "locale {}: rewrite of {} contains {}, which is itself rewritten",
                        self.name,
                        source,
                        node.value()
                    );
                }
                pending.extend(node.params());
            }
        }

        Ok(())
    }

    /// Short locale name (e.g. `de`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Language tag written to translated documents (e.g. `de-DE`).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Translates a node tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerkit::keycode_db::Locale;
    /// use layerkit::models::BindingNode;
    ///
    /// let de = Locale::builtin("de").unwrap();
    /// let node = de.translate_node(&BindingNode::key_press("GT"));
    /// assert_eq!(node.to_expression(), "&kp(LS(DE_LABK))");
    /// ```
    #[must_use]
    pub fn translate_node(&self, node: &BindingNode) -> BindingNode {
        if let Some(tree) = self.rewrites.get(node.value()) {
            return self.translate_node(tree);
        }

        let params = node
            .params()
            .iter()
            .map(|param| self.translate_node(param))
            .collect();

        let value = self
            .renames
            .get(node.value())
            .map_or_else(|| node.value().to_string(), Clone::clone);

        BindingNode::new(value, params)
    }

    /// Translates every node of a layer.
    #[must_use]
    pub fn translate_layer(&self, layer: &[BindingNode]) -> Vec<BindingNode> {
        layer.iter().map(|node| self.translate_node(node)).collect()
    }

    /// Translates an arbitrary JSON document.
    ///
    /// Every object is translated after its members; an object whose
    /// `value` member names a translation source is rewritten and all its
    /// other members are kept. Arrays translate element-wise, scalars pass
    /// through.
    #[must_use]
    pub fn translate_value(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.translate_value(item)).collect())
            }
            Value::Object(members) => {
                let translated = members
                    .iter()
                    .map(|(key, member)| (key.clone(), self.translate_value(member)))
                    .collect();
                self.translate_object(translated)
            }
            scalar => scalar.clone(),
        }
    }

    fn translate_object(&self, mut members: Map<String, Value>) -> Value {
        let Some(Value::String(source)) = members.get("value") else {
            return Value::Object(members);
        };

        if let Some(tree) = self.rewrite_values.get(source) {
            return self.translate_value(tree);
        }

        if let Some(target) = self.renames.get(source) {
            members.insert("value".to_string(), Value::String(target.clone()));
        }

        Value::Object(members)
    }

    /// Replacement expression for a bare keycode in keymap source text.
    ///
    /// Returns `None` when the keycode is not translated.
    #[must_use]
    pub fn translate_keycode(&self, keycode: &str) -> Option<String> {
        if let Some(tree) = self.rewrites.get(keycode) {
            return Some(self.translate_node(tree).to_expression());
        }
        self.renames.get(keycode).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn de() -> Locale {
        Locale::builtin("de").unwrap()
    }

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(de().name(), "de");
        assert!(Locale::builtin("DE-de").is_ok());
        assert!(Locale::builtin("fr").is_err());
        assert_eq!(Locale::available(), vec!["de"]);
    }

    #[test]
    fn test_simple_rename_keeps_params() {
        let node = BindingNode::new("&kp", vec![BindingNode::new("LS", vec![BindingNode::leaf("N1")])]);
        assert_eq!(de().translate_node(&node).to_expression(), "&kp(LS(DE_1))");
    }

    #[test]
    fn test_swapped_keys_translate_in_one_pass() {
        let de = de();
        assert_eq!(de.translate_node(&BindingNode::leaf("Y")), BindingNode::leaf("DE_Z"));
        assert_eq!(de.translate_node(&BindingNode::leaf("Z")), BindingNode::leaf("DE_Y"));
    }

    #[test]
    fn test_rewrite_replaces_whole_node() {
        let node = BindingNode::new("GT", vec![BindingNode::leaf("IGNORED")]);
        assert_eq!(de().translate_node(&node).to_expression(), "LS(DE_LABK)");
    }

    #[test]
    fn test_rewrite_inside_wrapper() {
        let node = BindingNode::new("&mt", vec![BindingNode::leaf("LCTRL"), BindingNode::leaf("GT")]);
        assert_eq!(
            de().translate_node(&node).to_expression(),
            "&mt(LCTRL, LS(DE_LABK))"
        );
    }

    #[test]
    fn test_unmapped_and_sentinels_unchanged() {
        let de = de();
        for node in [
            BindingNode::none(),
            BindingNode::transparent(),
            BindingNode::key_press("F13"),
            BindingNode::leaf("Custom"),
        ] {
            assert_eq!(de.translate_node(&node), node);
        }
    }

    #[test]
    fn test_translation_is_idempotent() {
        let de = de();
        let layer = vec![
            BindingNode::key_press("GT"),
            BindingNode::key_press("Y"),
            BindingNode::new("&lt", vec![BindingNode::leaf("1"), BindingNode::leaf("SEMI")]),
            BindingNode::transparent(),
        ];
        let once = de.translate_layer(&layer);
        assert_eq!(de.translate_layer(&once), once);
    }

    #[test]
    fn test_builtin_tables_pass_validation() {
        let de = de();
        for target in de.renames.values() {
            assert!(!de.is_source(target), "{target} is both target and source");
        }
    }

    #[test]
    fn test_rejects_chained_rename() {
        let json = r#"{"name": "x", "tag": "x-X", "renames": {"A": "B", "B": "C"}}"#;
        assert!(Locale::from_json(json).is_err());
    }

    #[test]
    fn test_rejects_self_referencing_rewrite() {
        let json = r#"{
            "name": "x", "tag": "x-X", "renames": {},
            "rewrites": {"GT": {"value": "LS", "params": [{"value": "GT"}]}}
        }"#;
        assert!(Locale::from_json(json).is_err());
    }

    #[test]
    fn test_translate_value_keeps_other_fields() {
        let doc = json!({
            "title": "keep me",
            "layers": [[
                { "value": "&kp", "params": [{ "value": "Q", "params": [] }], "note": "x" },
                { "value": "&kp", "params": [{ "value": "GT", "params": [] }] },
                { "value": 3, "params": [] }
            ]]
        });

        let translated = de().translate_value(&doc);
        assert_eq!(
            translated,
            json!({
                "title": "keep me",
                "layers": [[
                    { "value": "&kp", "params": [{ "value": "DE_Q", "params": [] }], "note": "x" },
                    { "value": "&kp", "params": [{ "value": "LS", "params": [{ "value": "DE_LABK", "params": [] }] }] },
                    { "value": 3, "params": [] }
                ]]
            })
        );
    }

    #[test]
    fn test_translate_keycode_for_text() {
        let de = de();
        assert_eq!(de.translate_keycode("SEMI").as_deref(), Some("DE_ODIA"));
        assert_eq!(de.translate_keycode("GT").as_deref(), Some("LS(DE_LABK)"));
        assert_eq!(de.translate_keycode("F1"), None);
    }
}
