//! Board generation and solvability logic.
//!
//! This module provides the active half of the engine, built on the passive
//! data structures in [`crate::core`]:
//!
//! - [`can_form`] - decides whether a radical multiset can be traced as a
//!   path of distinct, pairwise-adjacent tiles on a board
//! - [`solve`] - scans the dictionary and returns the [`SolvableSet`] of
//!   characters reachable on a board
//! - [`BoardGenerator`] - samples candidate boards and keeps the best of a
//!   bounded number of attempts
//! - [`MatchSession`] - per-game session state: the board, its solvable set,
//!   and the player's found characters and score
//!
//! # Game Flow
//!
//! 1. Load the radical [`Dictionary`](crate::Dictionary)
//! 2. Build a [`BoardGenerator`] (seed it with a [`BoardSeed`] for
//!    reproducible boards) and call [`BoardGenerator::generate`]
//! 3. Hand the board and solvable set to a [`MatchSession`]
//! 4. Feed player tile selections to [`MatchSession::match_selection`]

pub use self::{generator::*, reachability::*, session::*, solver::*};

mod generator;
mod reachability;
mod session;
mod solver;
