use std::sync::Arc;

use game_core::BetterWin;

use super::*;
use crate::elo::EloRanking;
use crate::knockout::SingleEliminationBracket;
use crate::seeding::level_standing;
use crate::snake::Snake;

fn players(n: usize) -> Vec<Player> {
    (1..=n)
        .map(|i| Player::new(format!("p{i}"), 100.0 * i as f64))
        .collect()
}

fn cup(players: &[Player]) -> Competition<SingleEliminationBracket> {
    let seeding = level_standing(players).unwrap();
    Competition::new("Cup", seeding, BetterWin::new(), SingleEliminationBracket::default())
}

#[test]
fn test_lifecycle_stages() {
    let players = players(4);
    let mut competition = cup(&players);
    assert_eq!(competition.stage(), Stage::Registration);
    assert!(competition.seeds().is_none());

    competition.registration(players.iter().cloned()).unwrap();
    competition.start().unwrap();
    assert_eq!(competition.stage(), Stage::Started);
    assert_eq!(competition.seeds().unwrap().len(), 4);
    assert!(competition.games().is_empty());

    competition.play().unwrap();
    assert_eq!(competition.stage(), Stage::Finished);
    assert!(competition.standing().is_empty());

    competition.trophies().unwrap();
    assert_eq!(competition.stage(), Stage::Closed);
    assert_eq!(competition.standing().len(), 4);
    assert!(Stage::Registration < Stage::Closed);
}

#[test]
fn test_duplicate_registration_is_ignored() {
    let players = players(4);
    let mut competition = cup(&players);
    competition.registration(players.iter().cloned()).unwrap();
    competition.registration([players[0].clone()]).unwrap();
    assert_eq!(competition.participants().len(), 4);
}

#[test]
fn test_out_of_order_calls() {
    let players = players(4);
    let mut competition = cup(&players);
    competition.registration(players.iter().cloned()).unwrap();

    assert!(matches!(competition.play(), Err(CompetitionError::NotStarted(_))));
    assert!(matches!(competition.trophies(), Err(CompetitionError::NotFinished(_))));

    competition.start().unwrap();
    assert!(matches!(competition.start(), Err(CompetitionError::AlreadyStarted(_))));
    assert!(matches!(
        competition.registration([Player::new("late", 0.0)]),
        Err(CompetitionError::AlreadyStarted(_))
    ));
    assert!(matches!(competition.trophies(), Err(CompetitionError::NotFinished(_))));

    competition.play().unwrap();
    let games = competition.games_flat().len();
    competition.play().unwrap();
    assert_eq!(competition.games_flat().len(), games);

    competition.trophies().unwrap();
    assert!(matches!(competition.trophies(), Err(CompetitionError::AlreadyClosed(_))));
    assert!(matches!(competition.run(), Err(CompetitionError::AlreadyStarted(_))));
}

#[test]
fn test_trophies_and_cashprize() {
    let players = players(4);
    let mut competition =
        cup(&players).with_cashprize(BTreeMap::from([(1, 100.0), (2, 40.0), (3, 10.0)]));
    competition.registration(players.iter().cloned()).unwrap();
    competition.run().unwrap();

    let champion = &players[3];
    assert_eq!(competition.top(1), vec![champion.clone()]);
    assert_eq!(
        champion.achievements(),
        vec![Achievement {
            event_name: "Cup".to_string(),
            place: 1,
            prize: 100.0,
        }]
    );
    assert_eq!(players[2].earnings(), 40.0);
    assert_eq!(players[0].earnings(), 10.0);
    assert_eq!(competition.top(3).len(), 2);
    assert!(competition.top(4).is_empty());
}

#[test]
fn test_same_event_name_twice_fails() {
    let players = players(2);
    let mut first = cup(&players);
    first.registration(players.iter().cloned()).unwrap();
    first.run().unwrap();

    let mut second = cup(&players);
    second.registration(players.iter().cloned()).unwrap();
    assert!(matches!(second.run(), Err(CompetitionError::Player(_))));
}

#[test]
fn test_draw_in_knockout_is_undecided() {
    let players: Vec<Player> = (1..=4).map(|i| Player::new(format!("p{i}"), 1000.0)).collect();
    let seeding = level_standing(&players).unwrap();
    let mut competition = Competition::new(
        "tied",
        seeding,
        BetterWin::with_draw(),
        SingleEliminationBracket::default(),
    );
    competition.registration(players).unwrap();
    assert!(matches!(competition.run(), Err(CompetitionError::Undecided(_))));
    assert_eq!(competition.stage(), Stage::Aborted);
    assert!(competition.games().is_empty(), "unapplied round is dropped");

    assert!(matches!(competition.play(), Err(CompetitionError::Aborted(_))));
    assert!(competition.games().is_empty());
    assert!(matches!(competition.trophies(), Err(CompetitionError::Aborted(_))));
    assert!(matches!(competition.run(), Err(CompetitionError::Aborted(_))));
    assert!(competition.standing().is_empty());
}

#[test]
fn test_trophies_award_everyone_or_nobody() {
    let players = players(4);
    players[2]
        .collect(Achievement {
            event_name: "Cup".to_string(),
            place: 1,
            prize: 0.0,
        })
        .unwrap();

    let mut competition = cup(&players);
    competition.registration(players.iter().cloned()).unwrap();
    competition.start().unwrap();
    competition.play().unwrap();

    assert!(matches!(competition.trophies(), Err(CompetitionError::Player(_))));
    assert_eq!(competition.stage(), Stage::Finished);
    for (i, player) in players.iter().enumerate() {
        let expected = usize::from(i == 2);
        assert_eq!(player.achievements().len(), expected, "{player}");
    }

    players[2].reset();
    competition.trophies().unwrap();
    assert_eq!(competition.stage(), Stage::Closed);
    assert!(players.iter().all(|p| p.achievements().len() == 1));
}

#[test]
fn test_elo_ranking_as_seeding() {
    let players = players(4);
    let mut ranking = EloRanking::new();
    ranking.register(&players).unwrap();

    // p1 upsets p4 twice, lifting p1 to the top seed
    let mut upsets = Vec::new();
    for _ in 0..2 {
        let mut game = Duel::new(players[0].clone(), players[3].clone());
        game.set_result(&[1.0, 0.0]).unwrap();
        upsets.push(game);
    }
    ranking.update(&upsets).unwrap();

    let mut competition =
        Competition::new("Seeded", Arc::new(ranking), BetterWin::new(), Snake::default());
    competition.registration(players.iter().cloned()).unwrap();
    competition.start().unwrap();

    let seeds = competition.seeds().unwrap().keys();
    assert_eq!(seeds[0], players[0]);
    assert_eq!(seeds[3], players[3]);
}

#[test]
fn test_play_games_records_a_round() {
    let players = players(2);
    let mut solver = BetterWin::new();
    let mut played = Vec::new();
    play_games(
        vec![Duel::new(players[0].clone(), players[1].clone())],
        &mut solver,
        &mut played,
    )
    .unwrap();
    assert_eq!(played.len(), 1);
    assert_eq!(played[0][0].winner(), Some(&players[1]));
}
