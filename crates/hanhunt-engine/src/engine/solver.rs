use std::collections::BTreeMap;

use crate::{
    core::{
        board::Board,
        dictionary::{CharacterEntry, Dictionary},
    },
    engine::reachability::can_form,
};

/// The characters reachable on a specific board.
///
/// Computed once per board by [`solve`] and never mutated afterwards; a new
/// board gets a new set. Carries the full entries, not just a count, so
/// callers can rank boards by cardinality and look up complexity scores
/// without going back to the dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolvableSet {
    entries: BTreeMap<char, CharacterEntry>,
}

impl SolvableSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, character: char) -> bool {
        self.entries.contains_key(&character)
    }

    #[must_use]
    pub fn get(&self, character: char) -> Option<&CharacterEntry> {
        self.entries.get(&character)
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &CharacterEntry)> {
        self.entries.iter().map(|(&c, entry)| (c, entry))
    }
}

/// Computes the set of dictionary characters reachable on a board.
///
/// Characters whose radicals are not all present on the board are rejected
/// before the path search runs. Entries with an empty radical list are
/// malformed and excluded rather than aborting the scan. Deterministic for
/// a given board and dictionary.
#[must_use]
pub fn solve(board: &Board, dictionary: &Dictionary) -> SolvableSet {
    let mut entries = BTreeMap::new();
    for (&character, entry) in &dictionary.characters {
        if entry.radicals.is_empty() {
            continue;
        }
        if !entry.radicals.iter().all(|&r| board.contains(r)) {
            continue;
        }
        if can_form(board, &entry.radicals) {
            entries.insert(character, entry.clone());
        }
    }
    SolvableSet { entries }
}
