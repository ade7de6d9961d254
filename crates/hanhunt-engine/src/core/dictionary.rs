use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Delimiter between radicals in a canonical combination key.
const KEY_DELIMITER: char = ',';

/// An atomic symbolic component from which characters are composed.
///
/// A radical is identified by its semantic form. Some radicals are rendered
/// with a different display form (see [`VisualAlias`]); identity for matching
/// purposes is always the semantic form.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Radical(char);

impl Radical {
    #[must_use]
    pub const fn new(c: char) -> Self {
        Self(c)
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Radical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A character the player can form, with its radical decomposition.
///
/// `radicals` is stored in decomposition order; the order carries no matching
/// significance. `complexity` is supplied by the data source and is used
/// directly as the character's point value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub radicals: Vec<Radical>,
    pub radical_count: usize,
    pub complexity: u32,
}

/// Display remapping of a semantic radical.
///
/// `display` is the form rendered on a tile; every form in `matches` resolves
/// back to the aliased semantic radical before lookup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VisualAlias {
    pub display: Radical,
    pub matches: Vec<Radical>,
}

/// Informational counters carried by the database document. Logged only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DictionaryMetadata {
    #[serde(default)]
    pub total_characters: usize,
}

/// The read-only radical database consumed by the engine.
///
/// Characters are keyed by their identifier. `radical_combinations` maps the
/// canonical key of a radical multiset to every character sharing that exact
/// multiset. `characters` is a `BTreeMap` so iteration order is stable, which
/// keeps seeded board generation deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct Dictionary {
    #[serde(default)]
    pub metadata: DictionaryMetadata,
    pub characters: BTreeMap<char, CharacterEntry>,
    #[serde(default)]
    pub radical_combinations: BTreeMap<String, Vec<char>>,
    #[serde(default)]
    pub visual_aliases: BTreeMap<Radical, VisualAlias>,
}

impl Dictionary {
    /// Builds the canonical key of a radical multiset.
    ///
    /// Radicals are sorted by code point and joined with a `,`. Duplicates
    /// are kept, so two characters share a key only when their multisets are
    /// identical.
    #[must_use]
    pub fn canonical_key(radicals: &[Radical]) -> String {
        let mut sorted: Vec<Radical> = radicals.to_vec();
        sorted.sort_unstable();
        let mut key = String::new();
        for (i, radical) in sorted.iter().enumerate() {
            if i > 0 {
                key.push(KEY_DELIMITER);
            }
            key.push(radical.as_char());
        }
        key
    }

    /// Resolves a tile value to its semantic radical.
    ///
    /// A tile supplied by the UI may carry a display form; this maps it back
    /// to the aliased semantic radical. Unaliased radicals map to themselves.
    #[must_use]
    pub fn normalize(&self, radical: Radical) -> Radical {
        for (&semantic, alias) in &self.visual_aliases {
            if alias.display == radical || alias.matches.contains(&radical) {
                return semantic;
            }
        }
        radical
    }

    /// Returns the characters sharing the given canonical radical key.
    #[must_use]
    pub fn entries_for_key(&self, key: &str) -> &[char] {
        self.radical_combinations
            .get(key)
            .map_or(&[], Vec::as_slice)
    }

    /// Looks up a character entry by identifier.
    #[must_use]
    pub fn entry(&self, character: char) -> Option<&CharacterEntry> {
        self.characters.get(&character)
    }
}
