//! Physical key topology and the left/right mirror mapping.

use anyhow::Result;
use std::collections::{HashMap, HashSet};

/// A slot in a row: a key position, or `None` where the board has no key.
pub type Slot = Option<usize>;

/// Keyboard half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Left hand
    Left,
    /// Right hand
    Right,
}

impl Side {
    /// Capitalized name used in position descriptions.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

/// One physical row with both halves, read left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Left half slots
    pub left: Vec<Slot>,
    /// Right half slots
    pub right: Vec<Slot>,
}

impl Row {
    /// Creates a row from its two halves.
    #[must_use]
    pub const fn new(left: Vec<Slot>, right: Vec<Slot>) -> Self {
        Self { left, right }
    }

    /// Returns the slots of one half.
    #[must_use]
    pub fn side(&self, side: Side) -> &[Slot] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

/// Where a position sits on the board (all indices 0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLocation {
    /// Keyboard half
    pub side: Side,
    /// Row index
    pub row: usize,
    /// Slot index within the half, counting empty slots
    pub col: usize,
}

/// Immutable physical layout with its derived mirror map.
///
/// # Mirroring
///
/// Within each row the k-th occupied left slot is paired with the k-th
/// occupied right slot counted from the outer (right) edge. Ranks are taken
/// over occupied slots only, so empty padding on either side does not shift
/// the pairing. When one half of a row has more keys than the other the
/// surplus positions stay unpaired: they have no mirror partner and show as
/// empty cells in the mirrored view.
#[derive(Debug, Clone)]
pub struct PhysicalLayout {
    rows: Vec<Row>,
    mirrored_rows: Vec<Row>,
    mirror: HashMap<usize, usize>,
    locations: HashMap<usize, KeyLocation>,
    slots_per_side: usize,
}

macro_rules! slot {
    (_) => {
        None
    };
    ($pos:literal) => {
        Some($pos)
    };
}

macro_rules! slots {
    ($($slot:tt),* $(,)?) => {
        vec![$(slot!($slot)),*]
    };
}

/// Rows of the 80-key split ergonomic board (main block, then thumb clusters).
fn glove80_rows() -> Vec<Row> {
    vec![
        Row::new(slots![_, 0, 1, 2, 3, 4, _], slots![_, _, 5, 6, 7, 8, 9]),
        Row::new(slots![10, 11, 12, 13, 14, 15, _], slots![16, 17, 18, 19, 20, 21, _]),
        Row::new(slots![22, 23, 24, 25, 26, 27, _], slots![28, 29, 30, 31, 32, 33, _]),
        Row::new(slots![34, 35, 36, 37, 38, 39, _], slots![40, 41, 42, 43, 44, 45, _]),
        Row::new(slots![46, 47, 48, 49, 50, 51, _], slots![58, 59, 60, 61, 62, 63, _]),
        Row::new(slots![_, 64, 65, 66, 67, 68, _], slots![_, _, 75, 76, 77, 78, 79]),
        Row::new(slots![_, _, _, 69, 52, _, _], slots![_, _, _, 57, 74, _, _]),
        Row::new(slots![_, _, _, 70, 53, _, _], slots![_, _, _, 56, 73, _, _]),
        Row::new(slots![_, _, _, 71, 54, _, _], slots![_, _, _, 55, 72, _, _]),
    ]
}

impl PhysicalLayout {
    /// Builds a layout from custom rows after validating them.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, if any half has a different
    /// slot count than the others, or if positions are not exactly `0..N`
    /// with each appearing once.
    pub fn new(rows: Vec<Row>) -> Result<Self> {
        Self::validate(&rows)?;
        Ok(Self::build(rows))
    }

    /// The standard 80-key layout.
    #[must_use]
    pub fn glove80() -> Self {
        Self::build(glove80_rows())
    }

    fn validate(rows: &[Row]) -> Result<()> {
        let Some(first) = rows.first() else {
            anyhow::bail!("Physical layout needs at least one row");
        };

        let width = first.left.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.left.len() != width || row.right.len() != width {
                anyhow::bail!(
                    "Row {} has {}+{} slots, expected {} per side",
                    idx + 1,
                    row.left.len(),
                    row.right.len(),
                    width
                );
            }
        }

        let mut seen = HashSet::new();
        for pos in rows
            .iter()
            .flat_map(|row| row.left.iter().chain(row.right.iter()))
            .flatten()
        {
            if !seen.insert(*pos) {
                anyhow::bail!("Position {} appears more than once", pos);
            }
        }

        if let Some(missing) = (0..seen.len()).find(|pos| !seen.contains(pos)) {
            anyhow::bail!(
                "Positions must be contiguous from 0; {} is missing",
                missing
            );
        }

        Ok(())
    }

    fn build(rows: Vec<Row>) -> Self {
        let mirror = build_mirror_map(&rows);

        let mirrored_rows = rows
            .iter()
            .map(|row| {
                let flip = |slots: &[Slot]| -> Vec<Slot> {
                    slots
                        .iter()
                        .map(|slot| slot.and_then(|pos| mirror.get(&pos).copied()))
                        .collect()
                };
                Row::new(flip(&row.left), flip(&row.right))
            })
            .collect();

        let mut locations = HashMap::new();
        for (row_idx, row) in rows.iter().enumerate() {
            for side in [Side::Left, Side::Right] {
                for (col, slot) in row.side(side).iter().enumerate() {
                    if let Some(pos) = slot {
                        locations.insert(
                            *pos,
                            KeyLocation {
                                side,
                                row: row_idx,
                                col,
                            },
                        );
                    }
                }
            }
        }

        let slots_per_side = rows
            .iter()
            .flat_map(|row| [row.left.len(), row.right.len()])
            .max()
            .unwrap_or(0);

        Self {
            rows,
            mirrored_rows,
            mirror,
            locations,
            slots_per_side,
        }
    }

    /// Rows as seen in the standard or mirrored view.
    #[must_use]
    pub fn rows(&self, mirrored: bool) -> &[Row] {
        if mirrored {
            &self.mirrored_rows
        } else {
            &self.rows
        }
    }

    /// Widest half across all rows.
    #[must_use]
    pub const fn slots_per_side(&self) -> usize {
        self.slots_per_side
    }

    /// Number of key positions on the board.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.locations.len()
    }

    /// The mirror partner of `pos`, or `None` for unpaired and unknown positions.
    #[must_use]
    pub fn mirror_position_of(&self, pos: usize) -> Option<usize> {
        self.mirror.get(&pos).copied()
    }

    /// Physical location of `pos` in the standard view.
    #[must_use]
    pub fn location_of(&self, pos: usize) -> Option<KeyLocation> {
        self.locations.get(&pos).copied()
    }

    /// Human-readable location, e.g. `Left row 2, column 1 (index 10)`.
    #[must_use]
    pub fn describe_position(&self, pos: usize) -> String {
        match self.location_of(pos) {
            Some(location) => format!(
                "{} row {}, column {} (index {})",
                location.side.label(),
                location.row + 1,
                location.col + 1,
                pos
            ),
            None => format!("index {pos}"),
        }
    }
}

impl Default for PhysicalLayout {
    fn default() -> Self {
        Self::glove80()
    }
}

/// Pairs occupied slots by rank within each row (right half read from its
/// outer edge). Surplus slots on the longer half are left out.
fn build_mirror_map(rows: &[Row]) -> HashMap<usize, usize> {
    let mut map = HashMap::new();

    for row in rows {
        let left = row.left.iter().flatten();
        let right = row.right.iter().rev().flatten();

        for (&left_pos, &right_pos) in left.zip(right) {
            map.insert(left_pos, right_pos);
            map.insert(right_pos, left_pos);
        }
    }

    map
}
