//! Keyboard layout data model.
//!
//! A layout is a named grid of key slots with a lowercase and an uppercase
//! variant. The two grids share one shape so that a `(row, col)` address
//! names the same physical key in both cases.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

use crate::models::position::{Case, KeyPosition};

/// Ordered rows of key slots.
///
/// Each slot holds a single character, or is a spacer: the empty string
/// or a whitespace-only string.
pub type RowGrid = Vec<Vec<String>>;

static LAYOUT_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,32}$").expect("layout key pattern is valid"));

/// Returns true if `key` is usable as a layout key: 1-32 ASCII letters,
/// digits, `_` or `-`.
#[must_use]
pub fn is_valid_layout_key(key: &str) -> bool {
    LAYOUT_KEY_REGEX.is_match(key)
}

/// A violated layout invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidLayout {
    /// Both grids are empty.
    #[error("layout has no rows")]
    NoRows,

    /// The grids disagree on the number of rows.
    #[error("shape mismatch: lowercase has {lowercase} rows, uppercase has {uppercase}")]
    RowCountMismatch {
        /// Rows in the lowercase grid
        lowercase: usize,
        /// Rows in the uppercase grid
        uppercase: usize,
    },

    /// The grids disagree on the number of slots in one row.
    #[error("shape mismatch at row {row}: lowercase has {lowercase} keys, uppercase has {uppercase}")]
    RowLengthMismatch {
        /// Row index (0-based)
        row: usize,
        /// Slots in the lowercase row
        lowercase: usize,
        /// Slots in the uppercase row
        uppercase: usize,
    },

    /// A slot holds more than one character.
    #[error("{} key at {position} holds {text:?}, expected a single character", .position.case)]
    MultiCharacterKey {
        /// Offending slot
        position: KeyPosition,
        /// Slot contents
        text: String,
    },

    /// Two slots of the same case hold the same character.
    #[error("duplicate character {character:?} in {case} keys at {first} and {second}")]
    DuplicateCharacter {
        /// Repeated character
        character: char,
        /// Case in which the repeat occurs
        case: Case,
        /// First occurrence (row-major order)
        first: KeyPosition,
        /// Second occurrence
        second: KeyPosition,
    },

    /// Every slot is a spacer.
    #[error("layout has no keys")]
    NoKeys,
}

/// Classification of one slot's text.
enum Slot {
    Spacer,
    Key(char),
    Invalid,
}

fn classify_slot(text: &str) -> Slot {
    if text.trim().is_empty() {
        return Slot::Spacer;
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Slot::Key(c),
        _ => Slot::Invalid,
    }
}

/// A named keyboard layout.
///
/// # Validation
///
/// - Both grids have identical shape (row count and per-row slot count)
/// - Every non-spacer slot holds exactly one character
/// - No character repeats within one case
/// - At least one slot is a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Stable short identifier (e.g., "qy")
    pub key: String,
    /// Display name (e.g., "QWERTY")
    pub name: String,
    /// Unshifted key grid
    pub lowercase: RowGrid,
    /// Shifted key grid, same shape as `lowercase`
    pub uppercase: RowGrid,
    /// When the layout was added
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

/// Key and display name, for populating a layout selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutSummary {
    /// Layout key
    pub key: String,
    /// Display name
    pub name: String,
}

impl Layout {
    /// Creates a layout without validating it.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        lowercase: RowGrid,
        uppercase: RowGrid,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            lowercase,
            uppercase,
            created: Utc::now(),
        }
    }

    /// Returns the grid for one case.
    #[must_use]
    pub fn grid(&self, case: Case) -> &RowGrid {
        match case {
            Case::Lower => &self.lowercase,
            Case::Upper => &self.uppercase,
        }
    }

    /// Returns the character at a position, or `None` for spacers and
    /// out-of-range positions.
    #[must_use]
    pub fn slot(&self, position: KeyPosition) -> Option<char> {
        let text = self.grid(position.case).get(position.row)?.get(position.col)?;
        match classify_slot(text) {
            Slot::Key(c) => Some(c),
            Slot::Spacer | Slot::Invalid => None,
        }
    }

    /// Iterates the keys of one case in row-major order, skipping spacers.
    pub fn keys(&self, case: Case) -> impl Iterator<Item = (KeyPosition, char)> + '_ {
        self.grid(case).iter().enumerate().flat_map(move |(row, slots)| {
            slots
                .iter()
                .enumerate()
                .filter_map(move |(col, text)| match classify_slot(text) {
                    Slot::Key(c) => Some((KeyPosition::new(row, col, case), c)),
                    Slot::Spacer | Slot::Invalid => None,
                })
        })
    }

    /// Number of non-spacer slots across both cases.
    #[must_use]
    pub fn key_count(&self) -> usize {
        Case::ALL.iter().map(|&case| self.keys(case).count()).sum()
    }

    /// Checks the layout invariants, reporting the first violation found.
    pub fn validate(&self) -> Result<(), InvalidLayout> {
        if self.lowercase.is_empty() && self.uppercase.is_empty() {
            return Err(InvalidLayout::NoRows);
        }

        if self.lowercase.len() != self.uppercase.len() {
            return Err(InvalidLayout::RowCountMismatch {
                lowercase: self.lowercase.len(),
                uppercase: self.uppercase.len(),
            });
        }

        for (row, (lower, upper)) in self.lowercase.iter().zip(&self.uppercase).enumerate() {
            if lower.len() != upper.len() {
                return Err(InvalidLayout::RowLengthMismatch {
                    row,
                    lowercase: lower.len(),
                    uppercase: upper.len(),
                });
            }
        }

        let mut key_count = 0;
        for case in Case::ALL {
            let mut seen: HashMap<char, KeyPosition> = HashMap::new();
            for (row, slots) in self.grid(case).iter().enumerate() {
                for (col, text) in slots.iter().enumerate() {
                    let position = KeyPosition::new(row, col, case);
                    match classify_slot(text) {
                        Slot::Spacer => {}
                        Slot::Invalid => {
                            return Err(InvalidLayout::MultiCharacterKey {
                                position,
                                text: text.clone(),
                            });
                        }
                        Slot::Key(character) => {
                            if let Some(&first) = seen.get(&character) {
                                return Err(InvalidLayout::DuplicateCharacter {
                                    character,
                                    case,
                                    first,
                                    second: position,
                                });
                            }
                            seen.insert(character, position);
                            key_count += 1;
                        }
                    }
                }
            }
        }

        if key_count == 0 {
            return Err(InvalidLayout::NoKeys);
        }

        Ok(())
    }

    /// SHA-256 digest (hex) of the key and both grids.
    ///
    /// Name and creation time are excluded: they do not affect the mapping.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.key.as_bytes());
        for case in Case::ALL {
            hasher.update([0x1d, case.digit_byte()]);
            for row in self.grid(case) {
                hasher.update([0x1e]);
                for slot in row {
                    hasher.update([0x1f]);
                    hasher.update(slot.as_bytes());
                }
            }
        }
        format!("{:x}", hasher.finalize())
    }

    /// Returns the selector summary for this layout.
    #[must_use]
    pub fn summary(&self) -> LayoutSummary {
        LayoutSummary {
            key: self.key.clone(),
            name: self.name.clone(),
        }
    }
}
