//! Capture command: snapshot preserved layers into the override document.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::PRESERVE_LIST_RELATIVE_PATH;
use crate::models::KeymapDocument;
use crate::services::loader::{load_keymap, load_overrides_strict, load_preserve_list};
use crate::services::{capture_overrides, DocumentSpec, GitLoader};
use clap::Args;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Capture preserved layers into custom/layer-overrides.json
///
/// The layers named in custom/layers_to_preserve.json are copied from the
/// keymap, with any previously stored override entries kept on top.
#[derive(Debug, Clone, Args)]
pub struct CaptureArgs {
    /// Path to keymap JSON (default from config)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl CaptureArgs {
    /// Execute the capture command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let keymap_path = self
            .file
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.paths.keymap));
        let spec = DocumentSpec::Path(keymap_path);
        let loader = GitLoader::new();

        let keymap: KeymapDocument<Value> = load_keymap(&loader, &spec)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        let preserve_spec = spec.preserve_list();
        let preserve = load_preserve_list(&loader, &preserve_spec)
            .map_err(|e| CliError::io(format!("{e:#}")))?
            .ok_or_else(|| CliError::io(format!("missing {preserve_spec}")))?;
        if preserve.is_empty() {
            tracing::warn!("{} lists no layers", PRESERVE_LIST_RELATIVE_PATH);
        }

        let overrides_spec = spec.overrides();
        let existing = load_overrides_strict(&loader, &overrides_spec)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        let result = capture_overrides(&keymap, &preserve, &existing)
            .map_err(|e| CliError::io(format!("Failed to capture layers: {e:#}")))?;

        let output_path = overrides_spec.path();
        if let Some(dir) = output_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                CliError::io(format!("Failed to create {}: {e}", dir.display()))
            })?;
        }

        let mut json = serde_json::to_string_pretty(&result.overrides)
            .map_err(|e| CliError::io(format!("Failed to serialize overrides: {e}")))?;
        json.push('\n');
        fs::write(output_path, json).map_err(|e| {
            CliError::io(format!("Failed to write {}: {e}", output_path.display()))
        })?;

        println!(
            "Captured {} layers into {}",
            result.overrides.layers.len(),
            output_path.display()
        );

        if !result.missing.is_empty() {
            tracing::warn!("Skipped missing layers: {}", result.missing.join(", "));
        }

        Ok(())
    }
}
