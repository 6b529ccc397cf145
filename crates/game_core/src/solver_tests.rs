use super::*;
use crate::player::Player;

fn duel(level1: f64, level2: f64) -> Duel {
    Duel::new(Player::new("p1", level1), Player::new("p2", level2))
}

#[test]
fn test_better_win_favours_higher_level() {
    let mut solver = BetterWin::new();

    let mut game = duel(1600.0, 1400.0);
    solver.solve(&mut game).unwrap();
    assert_eq!(game.score(), Some(WIN));

    let mut game = duel(1400.0, 1600.0);
    solver.solve(&mut game).unwrap();
    assert_eq!(game.score(), Some(LOSE));
}

#[test]
fn test_better_win_equal_levels() {
    let mut game = duel(1500.0, 1500.0);
    BetterWin::new().solve(&mut game).unwrap();
    assert_eq!(game.score(), Some(WIN));

    let mut game = duel(1500.0, 1500.0);
    BetterWin::with_draw().solve(&mut game).unwrap();
    assert!(game.is_draw());
}

#[test]
fn test_solving_twice_fails() {
    let mut game = duel(1600.0, 1400.0);
    let mut solver = BetterWin::new();
    solver.solve(&mut game).unwrap();

    assert!(matches!(
        solver.solve(&mut game),
        Err(MatchError::AlreadyPlayed { .. })
    ));
    assert!(matches!(
        BradleyTerry::seeded(1).solve(&mut game),
        Err(MatchError::AlreadyPlayed { .. })
    ));
}

#[test]
fn test_bradley_terry_probability() {
    let solver = BradleyTerry::seeded(0);

    assert!((solver.win_probability(1500.0, 1500.0) - 0.5).abs() < 1e-12);
    // 400 points of difference means 10:1 odds
    assert!((solver.win_probability(1900.0, 1500.0) - 10.0 / 11.0).abs() < 1e-12);
}

#[test]
fn test_bradley_terry_is_reproducible() {
    let play = |seed: u64| -> Vec<[f64; 2]> {
        let mut solver = BradleyTerry::seeded(seed);
        (0..32)
            .map(|_| {
                let mut game = duel(1500.0, 1450.0);
                solver.solve(&mut game).unwrap();
                game.score().unwrap()
            })
            .collect()
    };

    assert_eq!(play(42), play(42));
}

#[test]
fn test_bradley_terry_follows_large_gaps() {
    let mut solver = BradleyTerry::seeded(3);
    let wins = (0..200)
        .filter(|_| {
            let mut game = duel(3500.0, 500.0);
            solver.solve(&mut game).unwrap();
            game.winner().map(|p| p.name() == "p1").unwrap_or(false)
        })
        .count();

    assert_eq!(wins, 200);
}

#[test]
fn test_bradley_terry_custom_curve() {
    let solver = BradleyTerry::seeded(0).with_curve(2.0, 100.0);

    // 100 points ahead doubles the odds
    assert!((solver.win_probability(1600.0, 1500.0) - 2.0 / 3.0).abs() < 1e-12);
    assert!((solver.win_probability(1500.0, 1500.0) - 0.5).abs() < 1e-12);
}
