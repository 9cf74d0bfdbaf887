//! Binding node: the recursive action tree stored at every key position.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavior meaning "no action at this position".
pub const NONE_BEHAVIOR: &str = "&none";

/// Behavior meaning "fall through to the layer below".
pub const TRANS_BEHAVIOR: &str = "&trans";

/// Prefix marking a behavior reference (`&kp`, `&lt`, `&mo`, ...).
pub const BEHAVIOR_PREFIX: char = '&';

/// One key's action, as exported in the keymap JSON.
///
/// On disk every node is `{ "value": ..., "params": [...] }`. A node without
/// parameters (absent, `null` or empty `params`) is a [`BindingNode::Leaf`];
/// anything else is [`BindingNode::Wrapped`], whose parameters are nodes
/// themselves: `&kp` wrapping `LS` wrapping `A`, a layer-tap holding a layer
/// index and a keycode, a `Custom` macro with several parts.
///
/// Numeric and boolean `value`s (layer indices are exported as numbers) are
/// read as their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NodeRepr", into = "NodeRepr")]
pub enum BindingNode {
    /// A bare identifier with no parameters.
    Leaf(String),
    /// An identifier applied to one or more parameter nodes.
    Wrapped {
        /// Behavior or keycode identifier
        value: String,
        /// Parameters in declaration order (never empty)
        params: Vec<BindingNode>,
    },
}

impl BindingNode {
    /// Creates a node, choosing `Leaf` when `params` is empty.
    pub fn new(value: impl Into<String>, params: Vec<BindingNode>) -> Self {
        let value = value.into();
        if params.is_empty() {
            Self::Leaf(value)
        } else {
            Self::Wrapped { value, params }
        }
    }

    /// Creates a parameterless node.
    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    /// Shorthand for `&kp <keycode>`.
    pub fn key_press(keycode: impl Into<String>) -> Self {
        Self::new("&kp", vec![Self::leaf(keycode)])
    }

    /// The `&none` sentinel.
    pub fn none() -> Self {
        Self::leaf(NONE_BEHAVIOR)
    }

    /// The `&trans` sentinel.
    pub fn transparent() -> Self {
        Self::leaf(TRANS_BEHAVIOR)
    }

    /// The node's identifier.
    pub fn value(&self) -> &str {
        match self {
            Self::Leaf(value) | Self::Wrapped { value, .. } => value,
        }
    }

    /// The node's parameters (empty for leaves).
    pub fn params(&self) -> &[BindingNode] {
        match self {
            Self::Leaf(_) => &[],
            Self::Wrapped { params, .. } => params,
        }
    }

    /// Returns true for the `&none` sentinel.
    pub fn is_none(&self) -> bool {
        self.value() == NONE_BEHAVIOR
    }

    /// Returns true for the `&trans` sentinel.
    pub fn is_transparent(&self) -> bool {
        self.value() == TRANS_BEHAVIOR
    }

    /// Returns the behavior name without its `&` prefix, if this node is a
    /// behavior reference.
    pub fn behavior_name(&self) -> Option<&str> {
        self.value().strip_prefix(BEHAVIOR_PREFIX)
    }

    /// Renders the node as a keymap expression, e.g. `LS(DE_LABK)` or
    /// `&lt(1, SPACE)`.
    pub fn to_expression(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BindingNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(value) => f.write_str(value),
            Self::Wrapped { value, params } => {
                write!(f, "{value}(")?;
                for (idx, param) in params.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// On-disk shape of a node.
#[derive(Serialize, Deserialize)]
struct NodeRepr {
    value: NodeValue,
    #[serde(default)]
    params: Option<Vec<BindingNode>>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum NodeValue {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl From<NodeRepr> for BindingNode {
    fn from(repr: NodeRepr) -> Self {
        let value = match repr.value {
            NodeValue::Text(text) => text,
            NodeValue::Number(number) => number.to_string(),
            NodeValue::Flag(flag) => flag.to_string(),
        };
        Self::new(value, repr.params.unwrap_or_default())
    }
}

impl From<BindingNode> for NodeRepr {
    fn from(node: BindingNode) -> Self {
        match node {
            BindingNode::Leaf(value) => Self {
                value: NodeValue::Text(value),
                params: Some(Vec::new()),
            },
            BindingNode::Wrapped { value, params } => Self {
                value: NodeValue::Text(value),
                params: Some(params),
            },
        }
    }
}
