//! Show command: render layers as two-handed tables.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::MIN_CELL_WIDTH;
use crate::export::{render_layer_table, TableOptions};
use crate::keycode_db::{KeycodeDb, Locale};
use crate::models::{BindingNode, KeymapDocument, OverrideSet, PhysicalLayout};
use crate::services::loader::{load_keymap, load_overrides, load_preserve_list};
use crate::services::{detect_default_layers, locate_layer, merged_layer, DocumentSpec, GitLoader};
use clap::Args;

/// Render one or more layers as tables
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Layers to render, by name or index
    #[arg(value_name = "LAYER")]
    pub identifiers: Vec<String>,

    /// Layer to render (can be repeated)
    #[arg(long = "layer", value_name = "NAME")]
    pub layers: Vec<String>,

    /// Keymap JSON file or REVISION:path (default from config)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Display mirrored layout positions only
    #[arg(short, long, conflicts_with = "both")]
    pub mirror: bool,

    /// Display both standard and mirrored layouts
    #[arg(short, long)]
    pub both: bool,

    /// Cell width (minimum 2)
    #[arg(short, long, value_name = "N")]
    pub width: Option<usize>,

    /// Show physical key positions instead of bindings
    #[arg(short, long)]
    pub positions: bool,

    /// Show raw keycodes instead of friendly labels
    #[arg(long)]
    pub keycodes: bool,

    /// List available layers and exit
    #[arg(short, long)]
    pub list: bool,

    /// Render the exported layer without stored overrides
    #[arg(long)]
    pub no_overrides: bool,

    /// Translate bindings to a locale before rendering (e.g. de)
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<String>,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self, config: &Config) -> CliResult<()> {
        let spec = DocumentSpec::parse(self.file.as_deref().unwrap_or(&config.paths.keymap));
        let loader = GitLoader::new();

        let keymap: KeymapDocument = load_keymap(&loader, &spec)
            .map_err(|e| CliError::io(format!("{e:#}")))?;

        if self.list {
            for (index, name) in keymap.layer_names.iter().enumerate() {
                println!("{index:2}: {name}");
            }
            return Ok(());
        }

        let indices = self.resolve_layers(&keymap, &loader, &spec)?;

        let overrides = if self.no_overrides {
            OverrideSet::default()
        } else {
            load_overrides(&loader, &spec.overrides())
        };

        let locale = self
            .locale
            .as_deref()
            .map(Locale::builtin)
            .transpose()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;

        let db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;
        let layout = PhysicalLayout::glove80();

        let options = TableOptions {
            mirrored: false,
            cell_width: self.width.unwrap_or_else(|| config.cell_width()).max(MIN_CELL_WIDTH),
            show_positions: self.positions,
            friendly: !self.keycodes && config.display.friendly_labels,
        };
        let views: &[bool] = if self.both {
            &[false, true]
        } else if self.mirror {
            &[true]
        } else {
            &[false]
        };

        let mut blocks = Vec::new();
        for index in indices {
            let name = keymap.layer_name(index).unwrap_or_default();
            let mut layer: Vec<BindingNode> = merged_layer(&keymap, &overrides, index);
            if let Some(locale) = &locale {
                layer = locale.translate_layer(&layer);
            }

            let tables: Vec<String> = views
                .iter()
                .map(|&mirrored| {
                    render_layer_table(&layer, &layout, &db, &TableOptions { mirrored, ..options })
                })
                .collect();

            blocks.push(format!("Layer #{index}: {name}\n{}", tables.join("\n\n")));
        }

        println!("{}", blocks.join("\n\n"));
        Ok(())
    }

    /// Requested layers, or the default layers when none are requested.
    fn resolve_layers(
        &self,
        keymap: &KeymapDocument,
        loader: &GitLoader,
        spec: &DocumentSpec,
    ) -> CliResult<Vec<usize>> {
        let requested: Vec<&String> = self.layers.iter().chain(&self.identifiers).collect();

        if requested.is_empty() {
            let preserve = load_preserve_list(loader, &spec.preserve_list()).unwrap_or_else(|e| {
                tracing::warn!("failed to parse preserved layers: {:#}", e);
                None
            });
            let defaults = detect_default_layers(&keymap.layer_names, preserve.as_ref());
            if defaults.is_empty() {
                return Err(CliError::validation(format!("{spec} has no layers")));
            }
            return Ok(defaults);
        }

        requested
            .into_iter()
            .map(|identifier| {
                locate_layer(&keymap.layer_names, identifier)
                    .map(|(index, _)| index)
                    .map_err(|e| CliError::validation(e.to_string()))
            })
            .collect()
    }
}
