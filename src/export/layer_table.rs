//! Two-handed ASCII table of one layer.
//!
//! Every physical row becomes one table line with the left and right halves
//! in separate framed columns:
//!
//! ```text
//! |---------------------------------------------------------|---------------------------------------------------------|
//! | LEFT HAND                                               | RIGHT HAND                                              |
//! |---------------------------------------------------------|---------------------------------------------------------|
//! |         F1      F2      F3      F4      F5              |                 F6      F7      F8      F9      F10     |
//! ```

use crate::constants::MIN_CELL_WIDTH;
use crate::keycode_db::KeycodeDb;
use crate::models::{BindingNode, PhysicalLayout, Slot};

/// Marker appended to truncated labels.
pub const ELLIPSIS: char = '…';

/// Gutter between two cells of the same half.
const SLOT_SEPARATOR: &str = " ";

/// Rendering switches for [`render_layer_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Show each position's mirror partner in its place
    pub mirrored: bool,
    /// Characters per cell (at least 2)
    pub cell_width: usize,
    /// Print position numbers instead of labels
    pub show_positions: bool,
    /// Use display glyphs instead of raw keycodes
    pub friendly: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            mirrored: false,
            cell_width: crate::constants::DEFAULT_CELL_WIDTH,
            show_positions: false,
            friendly: true,
        }
    }
}

/// Shortens `text` to at most `width` characters.
///
/// Surrounding whitespace is stripped first. Text that does not fit keeps
/// its first `width - 1` characters followed by an ellipsis. Widths below 2
/// are treated as 2.
///
/// # Examples
///
/// ```
/// use layerkit::export::layer_table::truncate;
///
/// assert_eq!(truncate("ABCDEFG", 5), "ABCD…");
/// assert_eq!(truncate("AB", 5), "AB");
/// assert_eq!(truncate("  ", 5), "");
/// ```
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let width = width.max(MIN_CELL_WIDTH);
    let stripped = text.trim();

    if stripped.chars().count() <= width {
        return stripped.to_string();
    }

    let mut shortened: String = stripped.chars().take(width - 1).collect();
    shortened.push(ELLIPSIS);
    shortened
}

/// Renders a layer as a framed two-column table.
///
/// Positions past the end of `layer` render as empty cells, as do empty
/// slots and (in the mirrored view) positions without a mirror partner.
#[must_use]
pub fn render_layer_table(
    layer: &[BindingNode],
    layout: &PhysicalLayout,
    db: &KeycodeDb,
    options: &TableOptions,
) -> String {
    let cell_width = options.cell_width.max(MIN_CELL_WIDTH);
    let slots = layout.slots_per_side();
    let column_width = slots * cell_width + slots.saturating_sub(1) * SLOT_SEPARATOR.len();
    let divider = format!(
        "|{}|{}|",
        "-".repeat(column_width + 2),
        "-".repeat(column_width + 2)
    );

    let mut header_left = String::from("LEFT HAND");
    let mut header_right = String::from("RIGHT HAND");
    if options.mirrored {
        header_left.push_str(" (mirrored)");
        header_right.push_str(" (mirrored)");
    }
    if options.show_positions {
        header_left.push_str(" positions");
        header_right.push_str(" positions");
    }

    let frame = |left: &str, right: &str| format!("| {left:<column_width$} | {right:<column_width$} |");

    let mut lines = vec![divider.clone(), frame(&header_left, &header_right), divider.clone()];

    for row in layout.rows(options.mirrored) {
        let left = render_side(&row.left, layer, db, cell_width, options);
        let right = render_side(&row.right, layer, db, cell_width, options);
        lines.push(frame(left.trim_end(), right.trim_end()));
    }

    lines.push(divider);
    lines.join("\n")
}

fn render_side(
    slots: &[Slot],
    layer: &[BindingNode],
    db: &KeycodeDb,
    cell_width: usize,
    options: &TableOptions,
) -> String {
    slots
        .iter()
        .map(|slot| {
            let text = match slot {
                None => String::new(),
                Some(pos) if options.show_positions => truncate(&pos.to_string(), cell_width),
                Some(pos) => truncate(&db.format_node(layer.get(*pos), options.friendly), cell_width),
            };
            format!("{text:<cell_width$}")
        })
        .collect::<Vec<_>>()
        .join(SLOT_SEPARATOR)
}
