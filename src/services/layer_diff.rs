//! Position-by-position comparison of two layers' labels.

use crate::models::PhysicalLayout;

/// Marker printed in place of an empty label.
pub const EMPTY_LABEL_MARKER: &str = "∅";

/// One position whose labels differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Key position
    pub position: usize,
    /// Physical description of the position
    pub description: String,
    /// Label on the left side (empty past its end)
    pub left: String,
    /// Label on the right side (empty past its end)
    pub right: String,
}

/// Compares two label sequences position by position.
///
/// The shorter sequence is padded with empty labels, so a binding present on
/// only one side is reported as a mismatch.
///
/// # Examples
///
/// ```
/// use layerkit::models::PhysicalLayout;
/// use layerkit::services::layer_diff::diff_labels;
///
/// let layout = PhysicalLayout::glove80();
/// let mismatches = diff_labels(&["A", "B"], &["A", "C"], &layout);
/// assert_eq!(mismatches.len(), 1);
/// assert_eq!(mismatches[0].position, 1);
/// ```
#[must_use]
pub fn diff_labels<S: AsRef<str>>(left: &[S], right: &[S], layout: &PhysicalLayout) -> Vec<Mismatch> {
    let len = left.len().max(right.len());
    let label = |labels: &[S], i: usize| labels.get(i).map_or("", AsRef::as_ref).to_string();

    (0..len)
        .filter_map(|position| {
            let left = label(left, position);
            let right = label(right, position);
            (left != right).then(|| Mismatch {
                position,
                description: layout.describe_position(position),
                left,
                right,
            })
        })
        .collect()
}

/// Comparison of one layer across two keymaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerComparison {
    /// Layer name in the left keymap
    pub left_name: String,
    /// Layer name in the right keymap
    pub right_name: String,
    /// Number of left labels
    pub left_len: usize,
    /// Number of right labels
    pub right_len: usize,
    /// Differing positions, in position order
    pub mismatches: Vec<Mismatch>,
}

impl LayerComparison {
    /// Compares the labels of one layer.
    #[must_use]
    pub fn new(
        left_name: impl Into<String>,
        right_name: impl Into<String>,
        left: &[String],
        right: &[String],
        layout: &PhysicalLayout,
    ) -> Self {
        Self {
            left_name: left_name.into(),
            right_name: right_name.into(),
            left_len: left.len(),
            right_len: right.len(),
            mismatches: diff_labels(left, right, layout),
        }
    }

    /// True when every position carries the same label.
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Report lines for this layer.
    #[must_use]
    pub fn report_lines(&self) -> Vec<String> {
        if self.is_match() {
            return vec![format!(
                "{} layer matches {} ({} bindings).",
                self.left_name,
                self.right_name,
                self.left_len.max(self.right_len)
            )];
        }

        let mut lines = vec![format!(
            "{} layer differs from {} ({} mismatches):",
            self.left_name,
            self.right_name,
            self.mismatches.len()
        )];

        if self.left_len != self.right_len {
            lines.push(format!(
                "  Binding counts differ: left={}, right={}",
                self.left_len, self.right_len
            ));
        }

        for mismatch in &self.mismatches {
            lines.push(format!(
                "  {:<32} | left: {:<10} | right: {:<10}",
                mismatch.description,
                or_marker(&mismatch.left),
                or_marker(&mismatch.right)
            ));
        }

        lines
    }
}

fn or_marker(label: &str) -> &str {
    if label.is_empty() {
        EMPTY_LABEL_MARKER
    } else {
        label
    }
}
