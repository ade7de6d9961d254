use std::collections::HashMap;

use crate::core::{
    board::Board,
    dictionary::Radical,
    grid::{BOARD_TILES, is_adjacent},
};

/// Orderings attempted for multisets of up to 3 radicals (exhaustive).
const SHORT_ORDERING_CAP: usize = 6;
/// Orderings attempted for longer multisets.
const LONG_ORDERING_CAP: usize = 4;

/// Decides whether a radical multiset can be traced as a path on a board.
///
/// A multiset is formable when there is a simple path of tiles, one tile per
/// radical, with every tile carrying its radical, every consecutive pair of
/// positions adjacent, and no position reused. The radicals are treated as
/// unordered: the path may visit them in any order.
///
/// For multisets of 3 or more radicals the search tries a fixed prefix of
/// the permutation enumeration (6 orderings for up to 3 elements, 4 beyond
/// that) with a backtracking assignment per ordering. The cap bounds
/// worst-case work per character and can report a truly reachable long
/// multiset as unreachable when its only valid orderings fall outside the
/// attempted prefix. Board generation statistics depend on these caps;
/// widening them changes board yield.
#[must_use]
pub fn can_form(board: &Board, radicals: &[Radical]) -> bool {
    if radicals.is_empty() {
        return false;
    }

    let mut positions: HashMap<Radical, Vec<usize>> = HashMap::new();
    for (i, &tile) in board.tiles().iter().enumerate() {
        positions.entry(tile).or_default().push(i);
    }
    if radicals.iter().any(|r| !positions.contains_key(r)) {
        return false;
    }

    // Most characters decompose into exactly two radicals; answer those
    // without touching the permutation machinery.
    if let [first, second] = radicals {
        let first_positions = &positions[first];
        let second_positions = &positions[second];
        return first_positions
            .iter()
            .any(|&a| second_positions.iter().any(|&b| is_adjacent(a, b)));
    }

    let cap = if radicals.len() <= 3 {
        SHORT_ORDERING_CAP
    } else {
        LONG_ORDERING_CAP
    };
    for ordering in permutation_prefix(radicals, cap) {
        let mut used = [false; BOARD_TILES];
        if assign(&ordering, 0, None, &mut used, &positions) {
            return true;
        }
    }
    false
}

/// Assigns `ordering[depth..]` to unused tiles, extending the path from
/// `previous`. Backtracks on dead ends, releasing claimed tiles.
fn assign(
    ordering: &[Radical],
    depth: usize,
    previous: Option<usize>,
    used: &mut [bool; BOARD_TILES],
    positions: &HashMap<Radical, Vec<usize>>,
) -> bool {
    let Some(radical) = ordering.get(depth) else {
        return true;
    };
    for &position in &positions[radical] {
        if used[position] {
            continue;
        }
        if previous.is_some_and(|p| !is_adjacent(p, position)) {
            continue;
        }
        used[position] = true;
        if assign(ordering, depth + 1, Some(position), used, positions) {
            return true;
        }
        used[position] = false;
    }
    false
}

/// Returns the first `cap` permutations of `items`.
///
/// Enumeration order is fixed: permutations starting with `items[0]` come
/// first, then those starting with `items[1]`, and so on recursively. The
/// prefix is therefore stable for a given multiset, never sampled.
fn permutation_prefix(items: &[Radical], cap: usize) -> Vec<Vec<Radical>> {
    let mut orderings = Vec::with_capacity(cap);
    let mut remaining = items.to_vec();
    let mut current = Vec::with_capacity(items.len());
    permute_into(&mut remaining, &mut current, &mut orderings, cap);
    orderings
}

fn permute_into(
    remaining: &mut Vec<Radical>,
    current: &mut Vec<Radical>,
    orderings: &mut Vec<Vec<Radical>>,
    cap: usize,
) {
    if orderings.len() == cap {
        return;
    }
    if remaining.is_empty() {
        orderings.push(current.clone());
        return;
    }
    for i in 0..remaining.len() {
        let item = remaining.remove(i);
        current.push(item);
        permute_into(remaining, current, orderings, cap);
        current.pop();
        remaining.insert(i, item);
        if orderings.len() == cap {
            return;
        }
    }
}
