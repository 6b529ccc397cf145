//! Pairing primitives shared by the competition formats.
//!
//! Splits cut a seeded list in two halves, pairings turn a list into
//! `(first, second)` couples, and the schedule helpers produce complete sets
//! of rounds.

use game_core::{Duel, Player};

use crate::error::CompetitionError;

/// Perfect matchings of six slots, two slots per game.
///
/// Every row is a distinct way to pair `0..6`; the fifteen rows cover all of
/// them.
pub const CHORD_DIAGRAMS_N6: [[usize; 6]; 15] = [
    [0, 5, 1, 4, 2, 3],
    [0, 5, 1, 3, 2, 4],
    [0, 4, 1, 5, 2, 3],
    [0, 2, 1, 4, 3, 5],
    [0, 3, 1, 4, 2, 5],
    [0, 1, 2, 5, 3, 4],
    [0, 2, 1, 3, 4, 5],
    [0, 4, 1, 2, 3, 5],
    [0, 3, 1, 5, 2, 4],
    [0, 5, 1, 2, 3, 4],
    [0, 3, 1, 2, 4, 5],
    [0, 2, 1, 5, 3, 4],
    [0, 1, 2, 4, 3, 5],
    [0, 4, 1, 3, 2, 5],
    [0, 1, 2, 3, 4, 5],
];

/// The same matchings ordered by seed priority: top seeds meet the lowest
/// seeds first, and the most even pairings come last.
pub const SWISS_PRIORITY_N6: [[usize; 6]; 15] = [
    [0, 5, 1, 4, 2, 3],
    [0, 5, 1, 3, 2, 4],
    [0, 4, 1, 5, 2, 3],
    [0, 4, 1, 3, 2, 5],
    [0, 3, 1, 5, 2, 4],
    [0, 3, 1, 4, 2, 5],
    [0, 5, 1, 2, 3, 4],
    [0, 4, 1, 2, 3, 5],
    [0, 2, 1, 5, 3, 4],
    [0, 2, 1, 4, 3, 5],
    [0, 3, 1, 2, 4, 5],
    [0, 2, 1, 3, 4, 5],
    [0, 1, 2, 5, 3, 4],
    [0, 1, 2, 4, 3, 5],
    [0, 1, 2, 3, 4, 5],
];

/// Interleave two lists: `a0, b0, a1, b1, ...`.
///
/// When one list is longer its remaining items are appended at the end.
pub fn riffle_shuffle<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    for (a, b) in first.iter().zip(second) {
        out.push(a.clone());
        out.push(b.clone());
    }
    let shared = first.len().min(second.len());
    out.extend_from_slice(&first[shared..]);
    out.extend_from_slice(&second[shared..]);
    out
}

/// First half, and second half reversed. The first half takes the middle
/// item of an odd-length list.
pub fn symmetric_split<T: Clone>(items: &[T]) -> (Vec<T>, Vec<T>) {
    let (first, second) = middle_split(items);
    (first, second.into_iter().rev().collect())
}

/// First half and second half, both in order.
pub fn middle_split<T: Clone>(items: &[T]) -> (Vec<T>, Vec<T>) {
    let mid = items.len().div_ceil(2);
    (items[..mid].to_vec(), items[mid..].to_vec())
}

/// Even positions and odd positions.
pub fn neighbour_split<T: Clone>(items: &[T]) -> (Vec<T>, Vec<T>) {
    let evens = items.iter().step_by(2).cloned().collect();
    let odds = items.iter().skip(1).step_by(2).cloned().collect();
    (evens, odds)
}

/// `(items[i], items[n - 1 - i])`: best against worst.
///
/// The middle item of an odd-length list is left out.
pub fn symmetric_pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    let n = items.len();
    (0..n / 2)
        .map(|i| (items[i].clone(), items[n - 1 - i].clone()))
        .collect()
}

/// `(items[i], items[n / 2 + i])`: halves against each other in order.
pub fn parallel_pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    let half = items.len() / 2;
    (0..half)
        .map(|i| (items[i].clone(), items[half + i].clone()))
        .collect()
}

/// `(items[2i], items[2i + 1])`: consecutive neighbours.
pub fn neighbour_pairs<T: Clone>(items: &[T]) -> Vec<(T, T)> {
    items
        .chunks_exact(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// One live duel per consecutive pair of players.
pub fn consecutive_duels(players: &[Player]) -> Result<Vec<Duel>, CompetitionError> {
    if players.len() % 2 != 0 {
        return Err(CompetitionError::Pairing(format!(
            "cannot pair an odd number of players ({})",
            players.len()
        )));
    }
    Ok(into_duels(neighbour_pairs(players)))
}

pub fn into_duels(pairs: Vec<(Player, Player)>) -> Vec<Duel> {
    pairs.into_iter().map(|(a, b)| Duel::new(a, b)).collect()
}

/// Full round-robin schedule using the circle method.
///
/// The last item stays fixed while the others rotate one step per round.
/// An odd number of items gets a bye slot: whoever meets it sits the round
/// out. Every unordered pair meets exactly once, over `n - 1` rounds (`n`
/// rounds when `n` is odd).
pub fn round_robin<T: Clone>(items: &[T]) -> Vec<Vec<(T, T)>> {
    if items.len() < 2 {
        return Vec::new();
    }
    let mut slots: Vec<Option<T>> = items.iter().cloned().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let size = slots.len();
    let fixed = slots.pop().flatten();
    let mut rotating = slots;

    let mut rounds = Vec::with_capacity(size - 1);
    for round in 0..size - 1 {
        let mut pairs = Vec::with_capacity(size / 2);
        let head = rotating[0].clone();
        let first = if round % 2 == 0 {
            (fixed.clone(), head)
        } else {
            (head, fixed.clone())
        };
        if let (Some(a), Some(b)) = first {
            pairs.push((a, b));
        }
        for k in 0..(size - 2) / 2 {
            if let (Some(a), Some(b)) = (&rotating[1 + k], &rotating[size - 2 - k]) {
                pairs.push((a.clone(), b.clone()));
            }
        }
        rounds.push(pairs);
        rotating.rotate_left(1);
    }
    rounds
}

/// All fifteen matchings of exactly six items, in [`CHORD_DIAGRAMS_N6`] order.
pub fn chord_diagrams_n6<T: Clone>(items: &[T]) -> Result<Vec<Vec<(T, T)>>, CompetitionError> {
    apply_table(items, &CHORD_DIAGRAMS_N6)
}

/// All fifteen matchings of exactly six items, in [`SWISS_PRIORITY_N6`] order.
pub fn swiss_priority_n6<T: Clone>(items: &[T]) -> Result<Vec<Vec<(T, T)>>, CompetitionError> {
    apply_table(items, &SWISS_PRIORITY_N6)
}

fn apply_table<T: Clone>(
    items: &[T],
    table: &[[usize; 6]; 15],
) -> Result<Vec<Vec<(T, T)>>, CompetitionError> {
    if items.len() != 6 {
        return Err(CompetitionError::Pairing(format!(
            "six-slot tables need exactly 6 items, got {}",
            items.len()
        )));
    }
    Ok(table
        .iter()
        .map(|row| {
            row.chunks_exact(2)
                .map(|slot| (items[slot[0]].clone(), items[slot[1]].clone()))
                .collect()
        })
        .collect())
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod matching_tests;
