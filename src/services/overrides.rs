//! Override merging and batch override capture.
//!
//! Overrides are hand-maintained corrections stored per layer name. They are
//! merged position by position on top of a freshly exported layer, and may
//! extend it past its end.

use crate::models::{KeymapDocument, OverrideSet, PreserveList};
use crate::services::layer_lookup::resolve_batch;
use anyhow::Result;
use serde_json::Value;

/// Merges an override sequence on top of a layer.
///
/// Position `i` takes `override_layer[i]` when present, otherwise
/// `layer[i]`. Override entries past the end of `layer` are appended, so the
/// result has `max(layer.len(), override_layer.len())` entries. Without an
/// override the layer is returned unchanged.
///
/// # Examples
///
/// ```
/// use layerkit::services::overrides::merge_with_override;
///
/// let merged = merge_with_override(&["a", "b"], Some(&["X", "Y", "Z"][..1]));
/// assert_eq!(merged, vec!["X", "b"]);
///
/// let extended = merge_with_override(&["a"], Some(&["X", "Y"][..]));
/// assert_eq!(extended, vec!["X", "Y"]);
/// ```
#[must_use]
pub fn merge_with_override<T: Clone>(layer: &[T], override_layer: Option<&[T]>) -> Vec<T> {
    let Some(override_layer) = override_layer else {
        return layer.to_vec();
    };

    let mut merged: Vec<T> = layer
        .iter()
        .enumerate()
        .map(|(i, entry)| override_layer.get(i).unwrap_or(entry).clone())
        .collect();

    if let Some(extra) = override_layer.get(layer.len()..) {
        merged.extend_from_slice(extra);
    }

    merged
}

/// Returns the layer at `index` with its stored override applied.
///
/// Overrides are looked up by the layer's name in the document.
#[must_use]
pub fn merged_layer<N>(keymap: &KeymapDocument<N>, overrides: &OverrideSet, index: usize) -> Vec<N>
where
    N: Clone + serde::de::DeserializeOwned,
{
    let layer = keymap.layer(index).unwrap_or_default();
    let override_layer = keymap
        .layer_name(index)
        .and_then(|name| overrides.layer::<N>(name));

    merge_with_override(layer, override_layer.as_deref())
}

/// Outcome of a capture run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureResult {
    /// New override set, one entry per preserved layer found
    pub overrides: OverrideSet,
    /// Preserved names with no matching layer, in list order
    pub missing: Vec<String>,
}

/// Captures the preserved layers of a keymap as a new override set.
///
/// Each preserved layer is the freshly exported layer with the previously
/// stored override merged on top, so hand edits survive re-capture. Names
/// are resolved case-insensitively and stored under the keymap's spelling;
/// unknown names are collected in [`CaptureResult::missing`]. Nodes stay raw
/// JSON so fields not modelled here are written back untouched.
pub fn capture_overrides(
    keymap: &KeymapDocument<Value>,
    preserve: &PreserveList,
    existing: &OverrideSet,
) -> Result<CaptureResult> {
    let (found, missing) = resolve_batch(&keymap.layer_names, preserve.names());
    let mut overrides = OverrideSet::default();

    for (index, name) in found {
        let layer = keymap.layer(index).unwrap_or_default();
        let previous = existing
            .layer::<Value>(name)
            .or_else(|| {
                existing
                    .layers
                    .keys()
                    .find(|key| key.eq_ignore_ascii_case(name))
                    .and_then(|key| existing.layer::<Value>(key))
            });

        let captured = merge_with_override(layer, previous.as_deref());
        tracing::debug!("captured {} bindings for layer {}", captured.len(), name);
        overrides.insert(name, &captured)?;
    }

    Ok(CaptureResult { overrides, missing })
}
