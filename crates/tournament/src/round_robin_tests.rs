use game_core::BetterWin;

use super::*;
use crate::competition::Competition;
use crate::seeding::level_standing;

fn run(players: &[Player], solver: BetterWin) -> Competition<RoundRobin> {
    let seeding = level_standing(players).unwrap();
    let mut competition = Competition::new("league", seeding, solver, RoundRobin::default());
    competition.registration(players.iter().cloned()).unwrap();
    competition.run().unwrap();
    competition
}

#[test]
fn test_league_by_level() {
    let players: Vec<Player> = (1..=5)
        .map(|i| Player::new(format!("s{i}"), 1000.0 - 10.0 * i as f64))
        .collect();
    let competition = run(&players, BetterWin::new());

    assert_eq!(competition.games().len(), 5);
    assert_eq!(competition.games_flat().len(), 10);
    assert_eq!(competition.format().rounds_left(), 0);
    for (i, player) in players.iter().enumerate() {
        assert_eq!(competition.standing()[player], i + 1);
    }
}

#[test]
fn test_draws_share_placement() {
    let players: Vec<Player> = ["a", "b", "c", "d"]
        .into_iter()
        .map(|name| Player::new(name, 1000.0))
        .collect();
    let competition = run(&players, BetterWin::with_draw());

    assert_eq!(competition.games_flat().len(), 6);
    assert!(competition.games_flat().iter().all(|g| g.is_draw()));
    assert_eq!(competition.top(1).len(), 4);
    assert_eq!(players[0].achievements()[0].place, 1);
}
