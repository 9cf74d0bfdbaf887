//! Translate command: rewrite keymap files for a keyboard locale.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::keycode_db::Locale;
use crate::services::translate::{default_targets, translate_file};
use clap::Args;
use std::path::PathBuf;

/// Translate keymap files in place to a keyboard locale
///
/// Without explicit files, keymap.json, default.json,
/// custom/layer-overrides.json and keymap.zmk next to the keymap are
/// translated when present.
#[derive(Debug, Clone, Args)]
pub struct TranslateArgs {
    /// Files to translate (JSON, or ZMK keymap source)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Target locale
    #[arg(long, value_name = "LOCALE", default_value = "de")]
    pub locale: String,

    /// Keymap whose directory holds the default targets (default from config)
    #[arg(short, long, value_name = "PATH", conflicts_with = "files")]
    pub file: Option<PathBuf>,
}

impl TranslateArgs {
    /// Execute the translate command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let locale =
            Locale::builtin(&self.locale).map_err(|e| CliError::validation(format!("{e:#}")))?;

        let targets = if self.files.is_empty() {
            let keymap_path = self
                .file
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.paths.keymap));
            default_targets(&keymap_path)
        } else {
            self.files.clone()
        };

        if targets.is_empty() {
            return Err(CliError::validation("No files to translate"));
        }

        for path in &targets {
            translate_file(&locale, path).map_err(|e| CliError::io(format!("{e:#}")))?;
            println!("Translated {} to {}", path.display(), locale.tag());
        }

        Ok(())
    }
}
