//! Keymap, override and preserve-list documents.

use crate::models::BindingNode;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Exported keymap: parallel lists of layer names and layers.
///
/// `N` is the node type. Display and comparison work on typed
/// [`BindingNode`]s; capture keeps nodes as raw JSON so that fields this
/// crate does not model are written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeymapDocument<N = BindingNode> {
    /// Layer names, unique, indexed like `layers`
    pub layer_names: Vec<String>,
    /// Bindings per layer, indexed by key position
    pub layers: Vec<Vec<N>>,
}

impl<N> KeymapDocument<N> {
    /// Checks that every name has a layer and vice versa, and that no name
    /// appears twice.
    pub fn validate(&self) -> Result<()> {
        if self.layer_names.len() != self.layers.len() {
            anyhow::bail!(
                "keymap lists {} layer names but {} layers",
                self.layer_names.len(),
                self.layers.len()
            );
        }

        let mut seen = HashSet::new();
        for name in &self.layer_names {
            if !seen.insert(name.as_str()) {
                anyhow::bail!("duplicate layer name {:?}", name);
            }
        }
        Ok(())
    }

    /// Returns the bindings of the layer at `index`.
    #[must_use]
    pub fn layer(&self, index: usize) -> Option<&[N]> {
        self.layers.get(index).map(Vec::as_slice)
    }

    /// Returns the name of the layer at `index`.
    #[must_use]
    pub fn layer_name(&self, index: usize) -> Option<&str> {
        self.layer_names.get(index).map(String::as_str)
    }
}

/// Hand-maintained per-layer corrections, keyed by layer name.
///
/// Entries are kept as raw JSON: an entry that is not an array is ignored
/// by [`OverrideSet::layer`] rather than failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideSet {
    /// Override layers by layer name
    #[serde(default)]
    pub layers: BTreeMap<String, Value>,
}

impl OverrideSet {
    /// Returns true when no layer has an override.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the override sequence for `name`, decoded as `N`.
    ///
    /// `None` when there is no entry, when the entry is not an array, or when
    /// its elements cannot be decoded (the latter logs a warning).
    #[must_use]
    pub fn layer<N: DeserializeOwned>(&self, name: &str) -> Option<Vec<N>> {
        let entry = self.layers.get(name)?;
        if !entry.is_array() {
            tracing::debug!("override for layer {} is not an array, ignoring", name);
            return None;
        }

        match serde_json::from_value(entry.clone()) {
            Ok(nodes) => Some(nodes),
            Err(e) => {
                tracing::warn!("ignoring malformed override for layer {}: {}", name, e);
                None
            }
        }
    }

    /// Stores an override sequence for `name`, replacing any previous one.
    pub fn insert<N: Serialize>(&mut self, name: impl Into<String>, nodes: &[N]) -> Result<()> {
        self.layers
            .insert(name.into(), serde_json::to_value(nodes)?);
        Ok(())
    }
}

/// Ordered list of layer names to preserve across captures.
///
/// Accepts either a bare JSON array of names or `{ "layers": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "PreserveRepr")]
pub struct PreserveList {
    names: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PreserveRepr {
    Names(Vec<String>),
    Object { layers: Vec<String> },
}

impl From<PreserveRepr> for PreserveList {
    fn from(repr: PreserveRepr) -> Self {
        match repr {
            PreserveRepr::Names(names) | PreserveRepr::Object { layers: names } => Self { names },
        }
    }
}

impl PreserveList {
    /// Creates a list from names.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Names in list order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns true when the list has no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
