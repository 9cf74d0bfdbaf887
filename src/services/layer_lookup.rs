//! Resolving layer identifiers against a keymap's layer names.
//!
//! A single lookup from the command line fails loudly on an unknown layer.
//! Batch lookups (preserve lists) collect unknown names instead so the caller
//! can report them once.

use crate::constants::FALLBACK_DEFAULT_LAYERS;
use crate::models::PreserveList;
use anyhow::Result;

/// Finds a layer by case-insensitive name.
#[must_use]
pub fn find_layer_by_name(names: &[String], name: &str) -> Option<usize> {
    names.iter().position(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// Resolves an index or a layer name to `(index, canonical name)`.
///
/// An all-digit identifier is an index and must be in range; anything else
/// is matched case-insensitively against the layer names.
///
/// # Errors
///
/// Returns `unknown layer: "<identifier>"` when nothing matches.
///
/// # Examples
///
/// ```
/// use layerkit::services::layer_lookup::locate_layer;
///
/// let names = vec!["QWERTY".to_string(), "Symbol".to_string()];
/// assert_eq!(locate_layer(&names, "1").unwrap(), (1, "Symbol"));
/// assert_eq!(locate_layer(&names, "qwerty").unwrap(), (0, "QWERTY"));
/// assert!(locate_layer(&names, "7").is_err());
/// ```
pub fn locate_layer<'a>(names: &'a [String], identifier: &str) -> Result<(usize, &'a str)> {
    let identifier = identifier.trim();
    let is_index = !identifier.is_empty() && identifier.bytes().all(|b| b.is_ascii_digit());

    let index = if is_index {
        identifier
            .parse::<usize>()
            .ok()
            .filter(|&index| index < names.len())
    } else {
        find_layer_by_name(names, identifier)
    };

    match index {
        Some(index) => Ok((index, names[index].as_str())),
        None => anyhow::bail!("unknown layer: {identifier:?}"),
    }
}

/// Resolves a batch of names, skipping unknown ones.
///
/// Returns the found layers in request order (duplicates removed) and the
/// names that matched nothing.
#[must_use]
pub fn resolve_batch<'a, S: AsRef<str>>(
    names: &'a [String],
    requested: &[S],
) -> (Vec<(usize, &'a str)>, Vec<String>) {
    let mut found: Vec<(usize, &str)> = Vec::new();
    let mut missing = Vec::new();

    for name in requested {
        let name = name.as_ref();
        match find_layer_by_name(names, name) {
            Some(index) if found.iter().any(|(seen, _)| *seen == index) => {}
            Some(index) => found.push((index, names[index].as_str())),
            None => missing.push(name.to_string()),
        }
    }

    (found, missing)
}

/// Picks the layers to show when none are requested.
///
/// Preserved layers that exist come first; otherwise the fallback layers
/// that exist; otherwise the first layer.
#[must_use]
pub fn detect_default_layers(names: &[String], preserve: Option<&PreserveList>) -> Vec<usize> {
    if let Some(preserve) = preserve {
        let (found, missing) = resolve_batch(names, preserve.names());
        if !missing.is_empty() {
            tracing::debug!("preserved layers not in keymap: {}", missing.join(", "));
        }
        if !found.is_empty() {
            return found.into_iter().map(|(index, _)| index).collect();
        }
    }

    let (fallback, _) = resolve_batch(names, &FALLBACK_DEFAULT_LAYERS);
    if !fallback.is_empty() {
        return fallback.into_iter().map(|(index, _)| index).collect();
    }

    if names.is_empty() {
        Vec::new()
    } else {
        vec![0]
    }
}
