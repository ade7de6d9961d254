use std::collections::BTreeSet;

use crate::{
    InvalidSelectionError,
    core::{
        board::Board,
        dictionary::{Dictionary, Radical},
        grid::{BOARD_TILES, is_adjacent},
    },
    engine::solver::SolvableSet,
};

/// Outcome of matching one player selection against the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    /// The matched character.
    pub character: char,
    /// The character's point value.
    pub complexity: u32,
    /// Whether the character had already been found in this session.
    pub already_found: bool,
}

/// Per-game session state.
///
/// Owns the board and its solvable set for the duration of one game and
/// tracks which characters the player has found. All session state lives
/// here, passed in by the caller; the engine itself is stateless across
/// calls.
#[derive(Debug, Clone)]
pub struct MatchSession<'d> {
    dictionary: &'d Dictionary,
    board: Board,
    solvable: SolvableSet,
    found: BTreeSet<char>,
    score: u32,
}

impl<'d> MatchSession<'d> {
    #[must_use]
    pub fn new(dictionary: &'d Dictionary, board: Board, solvable: SolvableSet) -> Self {
        Self {
            dictionary,
            board,
            solvable,
            found: BTreeSet::new(),
            score: 0,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn solvable(&self) -> &SolvableSet {
        &self.solvable
    }

    /// Number of characters discoverable on this board, for display.
    #[must_use]
    pub fn total_discoverable(&self) -> usize {
        self.solvable.len()
    }

    #[must_use]
    pub fn found(&self) -> &BTreeSet<char> {
        &self.found
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Matches an ordered tile selection against the dictionary.
    ///
    /// The selection must cover at least two tiles, stay on the board,
    /// repeat no position, and step only between adjacent tiles; these are
    /// the same checks the input layer applies per gesture step. Each
    /// selected tile is normalized to its semantic radical, the canonical
    /// key of the multiset is looked up in the combination index, and the
    /// first bucket character not yet found is returned. When every bucket
    /// character is already found, the first one is returned tagged
    /// `already_found`. Returns `Ok(None)` when no character has the
    /// selected radical multiset.
    ///
    /// A newly found character is recorded and its complexity added to the
    /// session score.
    pub fn match_selection(
        &mut self,
        positions: &[usize],
    ) -> Result<Option<MatchResult>, InvalidSelectionError> {
        self.validate_selection(positions)?;

        let radicals: Vec<Radical> = positions
            .iter()
            .map(|&p| self.dictionary.normalize(self.board.radical(p)))
            .collect();
        let key = Dictionary::canonical_key(&radicals);

        // Characters missing from the character table are malformed index
        // entries; skip them rather than scoring an unknown complexity.
        let candidates: Vec<char> = self
            .dictionary
            .entries_for_key(&key)
            .iter()
            .copied()
            .filter(|&c| self.dictionary.entry(c).is_some())
            .collect();
        let Some(&first) = candidates.first() else {
            return Ok(None);
        };

        let character = candidates
            .iter()
            .copied()
            .find(|c| !self.found.contains(c))
            .unwrap_or(first);
        let complexity = self
            .dictionary
            .entry(character)
            .map_or(0, |entry| entry.complexity);
        let already_found = self.found.contains(&character);
        if !already_found {
            self.found.insert(character);
            self.score += complexity;
        }

        Ok(Some(MatchResult {
            character,
            complexity,
            already_found,
        }))
    }

    fn validate_selection(&self, positions: &[usize]) -> Result<(), InvalidSelectionError> {
        if positions.len() < 2 {
            return Err(InvalidSelectionError::TooShort {
                len: positions.len(),
            });
        }
        let mut seen = [false; BOARD_TILES];
        for (i, &position) in positions.iter().enumerate() {
            if position >= BOARD_TILES {
                return Err(InvalidSelectionError::OutOfBounds { position });
            }
            if seen[position] {
                return Err(InvalidSelectionError::RepeatedPosition { position });
            }
            seen[position] = true;
            if i > 0 && !is_adjacent(positions[i - 1], position) {
                return Err(InvalidSelectionError::NotAdjacent {
                    from: positions[i - 1],
                    to: position,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{
        CharacterEntry, DictionaryMetadata, VisualAlias,
        engine::solver::solve,
    };

    use super::*;

    fn radicals(chars: &str) -> Vec<Radical> {
        chars.chars().map(Radical::new).collect()
    }

    fn entry(components: &str, complexity: u32) -> CharacterEntry {
        let radicals = radicals(components);
        CharacterEntry {
            radical_count: radicals.len(),
            radicals,
            complexity,
        }
    }

    fn dictionary() -> Dictionary {
        let characters: BTreeMap<char, CharacterEntry> = [
            ('A', entry("xy", 4)),
            ('B', entry("xy", 6)),
            ('C', entry("st", 9)),
        ]
        .into_iter()
        .collect();
        let mut radical_combinations: BTreeMap<String, Vec<char>> = BTreeMap::new();
        for (character, entry) in &characters {
            radical_combinations
                .entry(Dictionary::canonical_key(&entry.radicals))
                .or_default()
                .push(*character);
        }
        // t renders as u on tiles; u must normalize back to t.
        let visual_aliases = [(
            Radical::new('t'),
            VisualAlias {
                display: Radical::new('u'),
                matches: radicals("tu"),
            },
        )]
        .into_iter()
        .collect();
        Dictionary {
            metadata: DictionaryMetadata::default(),
            characters,
            radical_combinations,
            visual_aliases,
        }
    }

    fn board() -> Board {
        // x(0) y(1) s(2) u(3); u is the display form of t.
        Board::from_tiles("xysuzzzzzzzzzzzz".chars().map(Radical::new)).unwrap()
    }

    fn session(dictionary: &Dictionary) -> MatchSession<'_> {
        let board = board();
        let solvable = solve(&board, dictionary);
        MatchSession::new(dictionary, board, solvable)
    }

    #[test]
    fn test_match_selection_finds_character() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);

        let result = session.match_selection(&[0, 1]).unwrap().unwrap();
        assert_eq!(result.character, 'A');
        assert_eq!(result.complexity, 4);
        assert!(!result.already_found);
        assert!(session.found().contains(&'A'));
        assert_eq!(session.score(), 4);
    }

    #[test]
    fn test_match_selection_is_order_insensitive() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);

        // y then x builds the same canonical key as x then y.
        let result = session.match_selection(&[1, 0]).unwrap().unwrap();
        assert_eq!(result.character, 'A');
    }

    #[test]
    fn test_match_selection_walks_the_bucket() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);

        // A and B share the multiset {x, y}: the second match yields B,
        // the third reports A again as already found.
        assert_eq!(session.match_selection(&[0, 1]).unwrap().unwrap().character, 'A');
        let second = session.match_selection(&[0, 1]).unwrap().unwrap();
        assert_eq!(second.character, 'B');
        assert!(!second.already_found);
        let third = session.match_selection(&[0, 1]).unwrap().unwrap();
        assert_eq!(third.character, 'A');
        assert!(third.already_found);
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_match_selection_normalizes_display_forms() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);

        // Tiles s(2) and u(3): u normalizes to t, matching C = {s, t}.
        let result = session.match_selection(&[2, 3]).unwrap().unwrap();
        assert_eq!(result.character, 'C');
    }

    #[test]
    fn test_match_selection_unknown_combination() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);

        // x(0) and s(2) are not a dictionary multiset... but they are also
        // not adjacent, so pick adjacent tiles y(1) and s(2) instead.
        let result = session.match_selection(&[1, 2]).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_match_selection_rejects_short_selection() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);
        assert!(matches!(
            session.match_selection(&[0]),
            Err(InvalidSelectionError::TooShort { len: 1 })
        ));
    }

    #[test]
    fn test_match_selection_rejects_out_of_bounds() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);
        assert!(matches!(
            session.match_selection(&[0, 16]),
            Err(InvalidSelectionError::OutOfBounds { position: 16 })
        ));
    }

    #[test]
    fn test_match_selection_rejects_repeats() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);
        assert!(matches!(
            session.match_selection(&[0, 1, 0]),
            Err(InvalidSelectionError::RepeatedPosition { position: 0 })
        ));
    }

    #[test]
    fn test_match_selection_rejects_non_adjacent_steps() {
        let dictionary = dictionary();
        let mut session = session(&dictionary);
        assert!(matches!(
            session.match_selection(&[0, 2]),
            Err(InvalidSelectionError::NotAdjacent { from: 0, to: 2 })
        ));
    }

    #[test]
    fn test_total_discoverable_reports_solvable_cardinality() {
        let dictionary = dictionary();
        let session = session(&dictionary);
        // A and B are traceable; C is not, because the board carries t's
        // display form rather than its semantic form.
        assert_eq!(session.total_discoverable(), 2);
    }

    #[test]
    fn test_match_selection_ignores_the_solvable_set() {
        // The combination index is authoritative for matching even when the
        // solver did not count the character as solvable.
        let dictionary = dictionary();
        let mut session = session(&dictionary);
        assert!(!session.solvable().contains('C'));
        let result = session.match_selection(&[2, 3]).unwrap().unwrap();
        assert_eq!(result.character, 'C');
    }
}
