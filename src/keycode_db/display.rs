//! Short human-readable labels for binding nodes.
//!
//! Labels feed both the layer table and the layer comparison, so the same
//! node always yields the same label.

use super::KeycodeDb;
use crate::models::BindingNode;

/// Label shown for transparent keys.
pub const TRANSPARENT_LABEL: &str = "TRANS";

/// Label shown for a key-press behavior without a keycode.
pub const EMPTY_KEY_PRESS_LABEL: &str = "KP";

/// Identifier of user-defined macros.
pub const CUSTOM_MACRO: &str = "Custom";

/// Behaviors whose label is simply the wrapped keycode.
const KEY_PRESS_BEHAVIORS: [&str; 2] = ["&kp", "&sk"];

impl KeycodeDb {
    /// Formats a binding node as a short label.
    ///
    /// - no node, or `&none` → empty string
    /// - `&trans` → `TRANS`
    /// - `&kp` / `&sk` → label of the first parameter (`KP` when there is none)
    /// - `Custom` → labels of all parameters joined by spaces (`Custom` when
    ///   there are none)
    /// - behavior references (`&lt`, `&mo`, ...) → behavior name upper-cased
    /// - the resulting label (behavior name or keycode) → friendly glyph when
    ///   `friendly` is set, otherwise verbatim
    ///
    /// Parameters of other nodes are formatted recursively, empty results
    /// dropped, and the rest appended as `LABEL(a, b)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use layerkit::keycode_db::KeycodeDb;
    /// use layerkit::models::BindingNode;
    ///
    /// let db = KeycodeDb::load().unwrap();
    /// let node = BindingNode::new(
    ///     "&kp",
    ///     vec![BindingNode::new("LS", vec![BindingNode::leaf("N1")])],
    /// );
    /// assert_eq!(db.format_node(Some(&node), true), "LS(1)");
    /// assert_eq!(db.format_node(Some(&node), false), "LS(N1)");
    /// ```
    #[must_use]
    pub fn format_node(&self, node: Option<&BindingNode>, friendly: bool) -> String {
        let Some(node) = node else {
            return String::new();
        };

        if node.is_none() {
            return String::new();
        }
        if node.is_transparent() {
            return TRANSPARENT_LABEL.to_string();
        }

        let params = node.params();

        if KEY_PRESS_BEHAVIORS.contains(&node.value()) {
            return match params.first() {
                Some(keycode) => self.format_node(Some(keycode), friendly),
                None => EMPTY_KEY_PRESS_LABEL.to_string(),
            };
        }

        if node.value() == CUSTOM_MACRO {
            if params.is_empty() {
                return CUSTOM_MACRO.to_string();
            }
            return params
                .iter()
                .map(|param| self.format_node(Some(param), friendly))
                .collect::<Vec<_>>()
                .join(" ");
        }

        let label = node
            .behavior_name()
            .map_or_else(|| node.value().to_string(), str::to_uppercase);
        let label = if friendly {
            self.friendly_label(&label).to_string()
        } else {
            label
        };

        let inner = params
            .iter()
            .map(|param| self.format_node(Some(param), friendly))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        if inner.is_empty() {
            label
        } else {
            format!("{label}({inner})")
        }
    }

    /// Labels for every position of a layer, trimmed.
    #[must_use]
    pub fn layer_labels(&self, layer: &[BindingNode], friendly: bool) -> Vec<String> {
        layer
            .iter()
            .map(|node| self.format_node(Some(node), friendly).trim().to_string())
            .collect()
    }
}
