//! Bidirectional character/position mapping derived from a layout.

use std::collections::BTreeMap;

use crate::models::layout::{InvalidLayout, Layout};
use crate::models::position::{Case, KeyPosition};

/// Character ↔ key position tables for one layout.
///
/// # Building Process
///
/// 1. Validate the layout (a lossy mapping is never produced)
/// 2. Walk lowercase then uppercase, row-major
/// 3. For every key: `backward[position] = char` and
///    `forward[char] = position`, later keys replacing earlier ones
///
/// A character present in both cases therefore encodes to its uppercase
/// position. Both positions still decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// Character → position
    forward: BTreeMap<char, KeyPosition>,
    /// Position → character
    backward: BTreeMap<KeyPosition, char>,
}

impl Mapping {
    /// Builds the mapping for a layout.
    pub fn build(layout: &Layout) -> Result<Self, InvalidLayout> {
        layout.validate()?;

        let mut forward = BTreeMap::new();
        let mut backward = BTreeMap::new();

        for case in Case::ALL {
            for (position, character) in layout.keys(case) {
                backward.insert(position, character);
                forward.insert(character, position);
            }
        }

        Ok(Self { forward, backward })
    }

    /// Position that encodes `character`.
    #[must_use]
    pub fn position_of(&self, character: char) -> Option<KeyPosition> {
        self.forward.get(&character).copied()
    }

    /// Character stored at `position`.
    #[must_use]
    pub fn char_at(&self, position: KeyPosition) -> Option<char> {
        self.backward.get(&position).copied()
    }

    /// Number of key positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.backward.len()
    }

    /// Returns true if the mapping has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.backward.is_empty()
    }
}
