//! Compare command: diff layers between two keymaps.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::keycode_db::{KeycodeDb, Locale};
use crate::models::{KeymapDocument, OverrideSet, PhysicalLayout};
use crate::services::loader::{load_keymap, load_overrides};
use crate::services::{locate_layer, merged_layer, DocumentSpec, GitLoader, LayerComparison};
use clap::Args;

/// Compare layers between two keymap files
///
/// Paths can be regular files or git object specs such as
/// `COMMIT:path/to/keymap.json`. Each side has its stored overrides applied
/// before comparing.
#[derive(Debug, Clone, Args)]
pub struct CompareArgs {
    /// Left keymap file or REVISION:path (default: compare.left from config)
    #[arg(long, value_name = "SPEC")]
    pub left: Option<String>,

    /// Right keymap file or REVISION:path (default: the configured keymap)
    #[arg(long, value_name = "SPEC")]
    pub right: Option<String>,

    /// Layer to compare (can be repeated; defaults to compare.layers from config)
    #[arg(long = "layer", value_name = "NAME")]
    pub layers: Vec<String>,

    /// Compare raw keycodes instead of friendly labels
    #[arg(long)]
    pub raw: bool,

    /// Translate the left side to a locale before comparing (e.g. de)
    #[arg(long, value_name = "LOCALE")]
    pub translate_left: Option<String>,
}

/// One loaded side of the comparison.
struct LoadedKeymap {
    keymap: KeymapDocument,
    overrides: OverrideSet,
}

impl LoadedKeymap {
    fn load(loader: &GitLoader, spec: &DocumentSpec) -> CliResult<Self> {
        let keymap = load_keymap(loader, spec).map_err(|e| CliError::io(format!("{e:#}")))?;
        let overrides = load_overrides(loader, &spec.overrides());
        Ok(Self { keymap, overrides })
    }

    fn layer(&self, identifier: &str) -> CliResult<(usize, &str)> {
        locate_layer(&self.keymap.layer_names, identifier)
            .map_err(|e| CliError::validation(e.to_string()))
    }
}

impl CompareArgs {
    /// Execute the compare command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let left_spec = self
            .left
            .as_deref()
            .or(config.compare.left.as_deref())
            .map(DocumentSpec::parse)
            .ok_or_else(|| {
                CliError::validation("No left keymap given: pass --left or set compare.left in the config")
            })?;
        let right_spec = DocumentSpec::parse(self.right.as_deref().unwrap_or(&config.paths.keymap));

        let layers = if self.layers.is_empty() {
            &config.compare.layers
        } else {
            &self.layers
        };
        if layers.is_empty() {
            return Err(CliError::validation("No layers to compare"));
        }

        let locale = self
            .translate_left
            .as_deref()
            .or(config.compare.translate_left.as_deref())
            .map(Locale::builtin)
            .transpose()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let loader = GitLoader::new();
        let left = LoadedKeymap::load(&loader, &left_spec)?;
        let right = LoadedKeymap::load(&loader, &right_spec)?;
        tracing::debug!("comparing {} against {}", left_spec, right_spec);

        let db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;
        let layout = PhysicalLayout::glove80();
        let friendly = !self.raw && config.display.friendly_labels;

        let mut differing = 0;
        for identifier in layers {
            let (left_index, left_name) = left.layer(identifier)?;
            let (right_index, right_name) = right.layer(identifier)?;

            let mut left_layer = merged_layer(&left.keymap, &left.overrides, left_index);
            if let Some(locale) = &locale {
                left_layer = locale.translate_layer(&left_layer);
            }
            let right_layer = merged_layer(&right.keymap, &right.overrides, right_index);

            let comparison = LayerComparison::new(
                left_name,
                right_name,
                &db.layer_labels(&left_layer, friendly),
                &db.layer_labels(&right_layer, friendly),
                &layout,
            );

            if !comparison.is_match() {
                differing += 1;
            }
            for line in comparison.report_lines() {
                println!("{line}");
            }
        }

        if differing > 0 {
            return Err(CliError::validation(format!(
                "{differing} of {} layers differ",
                layers.len()
            )));
        }

        println!("All {} layers match.", layers.len());
        Ok(())
    }
}
