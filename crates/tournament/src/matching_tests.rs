use std::collections::HashSet;

use proptest::prelude::*;

use super::*;

fn unordered(a: usize, b: usize) -> (usize, usize) {
    (a.min(b), a.max(b))
}

#[test]
fn test_riffle_shuffle() {
    assert_eq!(riffle_shuffle(&[1, 3, 5], &[2, 4, 6]), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(riffle_shuffle(&[1, 3, 5, 7], &[2]), vec![1, 2, 3, 5, 7]);
    assert_eq!(riffle_shuffle::<u8>(&[], &[9]), vec![9]);
}

#[test]
fn test_splits() {
    let items = [1, 2, 3, 4, 5, 6];
    assert_eq!(middle_split(&items), (vec![1, 2, 3], vec![4, 5, 6]));
    assert_eq!(symmetric_split(&items), (vec![1, 2, 3], vec![6, 5, 4]));
    assert_eq!(neighbour_split(&items), (vec![1, 3, 5], vec![2, 4, 6]));

    // odd lengths keep every item
    assert_eq!(middle_split(&[1, 2, 3]), (vec![1, 2], vec![3]));
    assert_eq!(neighbour_split(&[1, 2, 3]), (vec![1, 3], vec![2]));
}

#[test]
fn test_pairings() {
    let items = [1, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(symmetric_pairs(&items), vec![(1, 8), (2, 7), (3, 6), (4, 5)]);
    assert_eq!(parallel_pairs(&items), vec![(1, 5), (2, 6), (3, 7), (4, 8)]);
    assert_eq!(neighbour_pairs(&items), vec![(1, 2), (3, 4), (5, 6), (7, 8)]);
}

#[test]
fn test_consecutive_duels() {
    let players: Vec<Player> = (0..4).map(|i| Player::new(format!("p{i}"), 0.0)).collect();
    let duels = consecutive_duels(&players).unwrap();
    assert_eq!(duels.len(), 2);
    assert_eq!(duels[1].player1().name(), "p2");
    assert_eq!(duels[1].player2().name(), "p3");
    assert!(duels.iter().all(Duel::is_live));

    assert!(matches!(
        consecutive_duels(&players[..3]),
        Err(CompetitionError::Pairing(_))
    ));
}

#[test]
fn test_round_robin_even() {
    let items: Vec<usize> = (0..6).collect();
    let rounds = round_robin(&items);
    assert_eq!(rounds.len(), 5);

    let mut seen = HashSet::new();
    for round in &rounds {
        assert_eq!(round.len(), 3);
        let mut busy = HashSet::new();
        for &(a, b) in round {
            assert!(busy.insert(a) && busy.insert(b), "player twice in a round");
            assert!(seen.insert(unordered(a, b)), "pair ({a}, {b}) met twice");
        }
    }
    assert_eq!(seen.len(), 15);
}

#[test]
fn test_round_robin_odd_has_byes() {
    let items: Vec<usize> = (0..5).collect();
    let rounds = round_robin(&items);
    assert_eq!(rounds.len(), 5);

    let mut seen = HashSet::new();
    let mut byes = vec![0; 5];
    for round in &rounds {
        assert_eq!(round.len(), 2);
        let playing: HashSet<usize> = round.iter().flat_map(|&(a, b)| [a, b]).collect();
        for item in &items {
            if !playing.contains(item) {
                byes[*item] += 1;
            }
        }
        for &(a, b) in round {
            seen.insert(unordered(a, b));
        }
    }
    assert_eq!(seen.len(), 10);
    assert_eq!(byes, vec![1; 5]);
}

proptest! {
    #[test]
    fn round_robin_pairs_everyone_once(n in 2usize..64) {
        let items: Vec<usize> = (0..n).collect();
        let rounds = round_robin(&items);
        let expected_rounds = if n % 2 == 0 { n - 1 } else { n };
        prop_assert_eq!(rounds.len(), expected_rounds);

        let mut seen = HashSet::new();
        for round in &rounds {
            prop_assert_eq!(round.len(), n / 2);
            let mut busy = HashSet::new();
            for &(a, b) in round {
                prop_assert!(a != b);
                prop_assert!(busy.insert(a) && busy.insert(b), "player twice in a round");
                prop_assert!(seen.insert(unordered(a, b)), "pair ({}, {}) met twice", a, b);
            }
        }
        prop_assert_eq!(seen.len(), n * (n - 1) / 2);
    }
}

#[test]
fn test_round_robin_degenerate() {
    assert!(round_robin::<u8>(&[]).is_empty());
    assert!(round_robin(&[1]).is_empty());
    assert_eq!(round_robin(&[1, 2]), vec![vec![(2, 1)]]);
}

#[test]
fn test_six_slot_tables_cover_every_matching() {
    for table in [&CHORD_DIAGRAMS_N6, &SWISS_PRIORITY_N6] {
        let mut matchings = HashSet::new();
        for row in table.iter() {
            let mut slots: Vec<usize> = row.to_vec();
            slots.sort_unstable();
            assert_eq!(slots, vec![0, 1, 2, 3, 4, 5], "row {row:?} is not a matching");

            let mut pairs: Vec<(usize, usize)> =
                row.chunks_exact(2).map(|p| unordered(p[0], p[1])).collect();
            pairs.sort_unstable();
            assert!(matchings.insert(pairs), "row {row:?} repeats a matching");
        }
        assert_eq!(matchings.len(), 15);
    }
}

#[test]
fn test_priority_table_starts_symmetric() {
    let items = ["a", "b", "c", "d", "e", "f"];
    let options = swiss_priority_n6(&items).unwrap();
    assert_eq!(options.len(), 15);
    assert_eq!(options[0], symmetric_pairs(&items));
    assert_eq!(options[14], neighbour_pairs(&items));

    let chords = chord_diagrams_n6(&items).unwrap();
    assert_eq!(chords[0], symmetric_pairs(&items));
    assert!(chord_diagrams_n6(&items[..4]).is_err());
}
