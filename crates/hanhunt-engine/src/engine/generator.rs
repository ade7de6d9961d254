use std::{
    collections::{BTreeMap, BTreeSet},
    fmt, iter,
    str::FromStr,
};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::{IndexedRandom as _, SliceRandom as _},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    core::{
        board::Board,
        dictionary::{CharacterEntry, Dictionary, Radical},
        grid::BOARD_TILES,
    },
    engine::solver::{SolvableSet, solve},
};

/// Insertion slots constrained to distinct radicals during the fill phase.
const DISTINCT_TILE_PREFIX: usize = 10;

/// Shuffled two-radical candidates considered per kept seed character.
const SEED_CANDIDATE_FACTOR: usize = 3;

/// Tile used to pad a board when the dictionary offers no radicals at all.
const FALLBACK_TILE: Radical = Radical::new('一');

/// Seed for deterministic board generation.
///
/// A 128-bit seed that initializes the generator's random number source.
/// The same seed over the same dictionary reproduces the same board and
/// solvable set, enabling reproducible games and deterministic tests.
/// Serialized as a 32-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed([u8; 16]);

impl BoardSeed {
    #[must_use]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseBoardSeedError {
    #[display("seed must be 32 hex characters, got {len}")]
    WrongLength { len: usize },
    #[display("seed is not valid hex: {seed}")]
    InvalidHex { seed: String },
}

impl FromStr for BoardSeed {
    type Err = ParseBoardSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseBoardSeedError::WrongLength { len: s.len() });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseBoardSeedError::InvalidHex {
            seed: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `BoardSeed` values with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}

/// Tuning knobs for board generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Maximum candidate boards sampled per [`BoardGenerator::generate`].
    pub attempts: usize,
    /// Solvable-character count that stops the search early.
    pub target_solvable: usize,
    /// High-value two-radical characters planted on every candidate board.
    pub seed_entries: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            attempts: 20,
            target_solvable: 50,
            seed_entries: 4,
        }
    }
}

/// Samples candidate boards and keeps the one with the most solvable
/// characters.
///
/// Construction precomputes a frequency-weighted radical pool from the
/// dictionary: each radical appears `ceil(sqrt(frequency))` times, where
/// frequency counts its occurrences across all character decompositions.
/// The square-root damping keeps very common radicals over-represented
/// without letting them dominate every board.
///
/// Generation is a best-effort optimization search: it always returns a
/// board, even over a degenerate dictionary where every candidate scores
/// zero.
#[derive(Debug, Clone)]
pub struct BoardGenerator<'d> {
    dictionary: &'d Dictionary,
    config: GeneratorConfig,
    pool: Vec<Radical>,
    distinct_pool_radicals: usize,
    rng: Pcg32,
}

impl<'d> BoardGenerator<'d> {
    /// Creates a generator with a random seed and default configuration.
    ///
    /// For reproducible boards, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(dictionary: &'d Dictionary) -> Self {
        Self::with_seed(dictionary, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(dictionary: &'d Dictionary, seed: BoardSeed) -> Self {
        Self::with_config(dictionary, GeneratorConfig::default(), seed)
    }

    /// Like [`Self::with_seed`], but with explicit tuning knobs.
    #[must_use]
    pub fn with_config(
        dictionary: &'d Dictionary,
        config: GeneratorConfig,
        seed: BoardSeed,
    ) -> Self {
        let pool = weighted_pool(dictionary);
        let distinct_pool_radicals = pool.iter().collect::<BTreeSet<_>>().len();
        Self {
            dictionary,
            config,
            pool,
            distinct_pool_radicals,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Generates a board together with its solvable set.
    ///
    /// Samples up to `config.attempts` candidate boards, scores each by the
    /// cardinality of its solvable set, and keeps the strictly best seen so
    /// far (ties keep the earlier candidate). Stops early once a candidate
    /// reaches `config.target_solvable`. The winning board and its set are
    /// returned together so callers never recompute the scan.
    pub fn generate(&mut self) -> (Board, SolvableSet) {
        let mut best: Option<(Board, SolvableSet)> = None;
        for _ in 0..self.config.attempts {
            let candidate = self.generate_candidate();
            let solvable = solve(&candidate, self.dictionary);
            let reached_target = solvable.len() >= self.config.target_solvable;
            if best
                .as_ref()
                .is_none_or(|(_, best_set)| solvable.len() > best_set.len())
            {
                best = Some((candidate, solvable));
            }
            if reached_target {
                break;
            }
        }
        // Attempts can be configured down to zero; produce one candidate
        // rather than failing.
        best.unwrap_or_else(|| {
            let board = self.generate_candidate();
            let solvable = solve(&board, self.dictionary);
            (board, solvable)
        })
    }

    /// Builds one candidate board: seed characters, weighted fill, shuffle.
    fn generate_candidate(&mut self) -> Board {
        let mut tiles: ArrayVec<Radical, BOARD_TILES> = ArrayVec::new();
        let mut used: BTreeSet<Radical> = BTreeSet::new();

        // Seed phase: plant a few high-complexity two-radical characters so
        // every board starts with guaranteed high-value matches.
        let mut seeds: Vec<&CharacterEntry> = self
            .dictionary
            .characters
            .values()
            .filter(|entry| entry.radicals.len() == 2)
            .collect();
        seeds.shuffle(&mut self.rng);
        seeds.truncate(SEED_CANDIDATE_FACTOR * self.config.seed_entries);
        seeds.sort_by(|a, b| b.complexity.cmp(&a.complexity));
        seeds.truncate(self.config.seed_entries);
        'seeding: for entry in seeds {
            for &radical in &entry.radicals {
                if tiles.is_full() {
                    break 'seeding;
                }
                if used.insert(radical) {
                    tiles.push(radical);
                }
            }
        }

        // Fill phase: uniform draws from the weighted pool. While 10 or
        // fewer slots are filled only unseen radicals are accepted, which
        // guarantees board variety; later slots may repeat radicals, which
        // raises multi-path solvability. The distinctness requirement is
        // waived once the pool has no unseen radicals left to offer.
        while !tiles.is_full() {
            let Some(&radical) = self.pool.choose(&mut self.rng) else {
                break;
            };
            let require_distinct =
                tiles.len() <= DISTINCT_TILE_PREFIX && used.len() < self.distinct_pool_radicals;
            if require_distinct {
                if used.insert(radical) {
                    tiles.push(radical);
                }
            } else {
                tiles.push(radical);
            }
        }
        while !tiles.is_full() {
            tiles.push(FALLBACK_TILE);
        }

        let mut tiles = tiles
            .into_inner()
            .expect("tile buffer is filled to capacity");
        tiles.shuffle(&mut self.rng);
        Board::new(tiles)
    }
}

/// Builds the frequency-weighted sampling pool.
fn weighted_pool(dictionary: &Dictionary) -> Vec<Radical> {
    let mut frequency: BTreeMap<Radical, usize> = BTreeMap::new();
    for entry in dictionary.characters.values() {
        for &radical in &entry.radicals {
            *frequency.entry(radical).or_default() += 1;
        }
    }
    let mut pool = Vec::new();
    for (radical, count) in frequency {
        let weight = (count as f64).sqrt().ceil() as usize;
        pool.extend(iter::repeat_n(radical, weight));
    }
    pool
}
