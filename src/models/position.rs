//! Key position identity within a layout grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which variant of a key a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    /// Unshifted variant
    Lower,
    /// Shifted variant
    Upper,
}

impl Case {
    /// Both cases in canonical order (lowercase first).
    pub const ALL: [Self; 2] = [Self::Lower, Self::Upper];

    /// Digit used for this case in the token wire format.
    #[must_use]
    pub const fn digit(self) -> char {
        match self {
            Self::Lower => '0',
            Self::Upper => '1',
        }
    }

    /// ASCII byte of [`Case::digit`].
    #[must_use]
    pub const fn digit_byte(self) -> u8 {
        match self {
            Self::Lower => b'0',
            Self::Upper => b'1',
        }
    }

    /// Parses the token case digit.
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Lower),
            '1' => Some(Self::Upper),
            _ => None,
        }
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => write!(f, "lowercase"),
            Self::Upper => write!(f, "uppercase"),
        }
    }
}

/// Canonical address of one key: zero-based grid coordinates plus case.
///
/// Ordering is row-major within a case, lowercase before uppercase, so
/// maps keyed by position iterate in grid order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyPosition {
    /// Case variant
    pub case: Case,
    /// Row index (0-based)
    pub row: usize,
    /// Column index (0-based)
    pub col: usize,
}

impl KeyPosition {
    /// Creates a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize, case: Case) -> Self {
        Self { case, row, col }
    }
}

impl fmt::Display for KeyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
