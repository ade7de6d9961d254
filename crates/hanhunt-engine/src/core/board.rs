use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use serde::{Deserialize, Serialize};

use super::{
    dictionary::Radical,
    grid::{BOARD_TILES, GRID_SIDE},
};

/// The 16-tile arrangement of radicals presented for one game.
///
/// Tiles are indexed 0–15 and laid out as 4 rows of 4 columns
/// (`row = index / 4`, `col = index % 4`). A board is immutable once built;
/// a new game gets a new board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    tiles: [Radical; BOARD_TILES],
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: the 16 tiles as a single string, row by row.
        let s: String = self.tiles.iter().map(|r| r.as_char()).collect();
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let tiles: Vec<Radical> = s.chars().map(Radical::new).collect();
        Self::from_tiles(tiles).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expected exactly {BOARD_TILES} tiles, got {}",
                s.chars().count()
            ))
        })
    }
}

impl Board {
    #[must_use]
    pub const fn new(tiles: [Radical; BOARD_TILES]) -> Self {
        Self { tiles }
    }

    /// Builds a board from an iterator of tiles.
    ///
    /// Returns `None` unless the iterator yields exactly [`BOARD_TILES`]
    /// radicals.
    pub fn from_tiles<I>(tiles: I) -> Option<Self>
    where
        I: IntoIterator<Item = Radical>,
    {
        let mut iter = tiles.into_iter();
        let mut board = [Radical::new('\0'); BOARD_TILES];
        for tile in &mut board {
            *tile = iter.next()?;
        }
        if iter.next().is_some() {
            return None;
        }
        Some(Self { tiles: board })
    }

    /// Returns the radical at a board position.
    ///
    /// # Panics
    ///
    /// Panics if `position >= BOARD_TILES`.
    #[must_use]
    pub fn radical(&self, position: usize) -> Radical {
        self.tiles[position]
    }

    #[must_use]
    pub const fn tiles(&self) -> &[Radical; BOARD_TILES] {
        &self.tiles
    }

    /// Returns whether any tile carries the given radical.
    #[must_use]
    pub fn contains(&self, radical: Radical) -> bool {
        self.tiles.contains(&radical)
    }

    /// Returns the board positions carrying each radical.
    #[must_use]
    pub fn radical_positions(&self) -> BTreeMap<Radical, Vec<usize>> {
        let mut positions: BTreeMap<Radical, Vec<usize>> = BTreeMap::new();
        for (i, &tile) in self.tiles.iter().enumerate() {
            positions.entry(tile).or_default().push(i);
        }
        positions
    }

    /// Returns the set of distinct radicals on the board.
    #[must_use]
    pub fn distinct_radicals(&self) -> BTreeSet<Radical> {
        self.tiles.iter().copied().collect()
    }

    /// Returns an iterator over the four tile rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Radical]> {
        self.tiles.chunks(GRID_SIDE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, radical) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{radical}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(chars: &str) -> Board {
        Board::from_tiles(chars.chars().map(Radical::new)).unwrap()
    }

    #[test]
    fn test_from_tiles_requires_exactly_sixteen() {
        assert!(Board::from_tiles("abcdefghijklmnop".chars().map(Radical::new)).is_some());
        assert!(Board::from_tiles("abc".chars().map(Radical::new)).is_none());
        assert!(Board::from_tiles("abcdefghijklmnopq".chars().map(Radical::new)).is_none());
    }

    #[test]
    fn test_radical_lookup_follows_row_major_layout() {
        let board = board_from("abcdefghijklmnop");
        assert_eq!(board.radical(0), Radical::new('a'));
        assert_eq!(board.radical(4), Radical::new('e'));
        assert_eq!(board.radical(15), Radical::new('p'));
    }

    #[test]
    fn test_radical_positions_collects_duplicates() {
        let board = board_from("aabcdefghijklmno");
        let positions = board.radical_positions();
        assert_eq!(positions[&Radical::new('a')], vec![0, 1]);
        assert_eq!(positions[&Radical::new('o')], vec![15]);
    }

    #[test]
    fn test_distinct_radicals() {
        let board = board_from("aaaabbbbccccdddd");
        assert_eq!(board.distinct_radicals().len(), 4);
    }

    #[test]
    fn test_display_renders_four_rows() {
        let board = board_from("abcdefghijklmnop");
        assert_eq!(
            board.to_string(),
            "a b c d\ne f g h\ni j k l\nm n o p"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let board = board_from("abcdefghijklmnop");
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"abcdefghijklmnop\"");
        let parsed: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_deserialize_rejects_wrong_length() {
        let result: Result<Board, _> = serde_json::from_str("\"abc\"");
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("expected exactly 16 tiles"));
    }
}
