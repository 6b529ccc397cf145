use game_core::{DRAW, LOSE, WIN};

use super::*;

fn resolved(p1: &Player, p2: &Player, score: [f64; 2]) -> Duel {
    let mut game = Duel::new(p1.clone(), p2.clone());
    game.set_result(&score).unwrap();
    game
}

#[test]
fn test_elo_calculation() {
    let elo = Elo::default();

    // Equal ratings should give 50% expected score
    let expected = elo.expected_score(1500.0, 1500.0);
    assert!((expected - 0.5).abs() < 0.001);

    // 400 points ahead is 10:1 odds
    let expected = elo.expected_score(1900.0, 1500.0);
    assert!((expected - 10.0 / 11.0).abs() < 1e-9);
}

#[test]
fn test_elo_update() {
    let a = Player::new("engine1", 0.0);
    let b = Player::new("engine2", 0.0);
    let mut ranking = EloRanking::new();
    ranking.register(&[a.clone(), b.clone()]).unwrap();

    let games: Vec<Duel> = (0..10).map(|_| resolved(&a, &b, WIN)).collect();
    ranking.update(&games).unwrap();

    assert!(ranking.rating(&a) > DEFAULT_ELO);
    assert!(ranking.rating(&b) < DEFAULT_ELO);
    assert!((ranking.rating(&a) + ranking.rating(&b) - 2.0 * DEFAULT_ELO).abs() < 1e-9);
    assert_eq!(ranking.games_played(&a), 10);
}

#[test]
fn test_first_game_moves_half_k() {
    let a = Player::new("a", 0.0);
    let b = Player::new("b", 0.0);
    let mut ranking = EloRanking::new();

    ranking.update([&resolved(&a, &b, LOSE)]).unwrap();
    assert!((ranking.rating(&b) - (DEFAULT_ELO + K_FACTOR / 2.0)).abs() < 1e-9);
    assert!((ranking.rating(&a) - (DEFAULT_ELO - K_FACTOR / 2.0)).abs() < 1e-9);
}

#[test]
fn test_draws_and_live_games() {
    let a = Player::new("a", 0.0);
    let b = Player::new("b", 0.0);
    let mut ranking = EloRanking::new();
    ranking.register(&[a.clone(), b.clone()]).unwrap();

    let live = Duel::new(a.clone(), b.clone());
    ranking.update([&resolved(&a, &b, DRAW), &live]).unwrap();

    assert_eq!(ranking.rating(&a), DEFAULT_ELO);
    assert_eq!(ranking.games_played(&a), 1);
}

#[test]
fn test_leaderboard_and_seeding() {
    let a = Player::new("a", 0.0);
    let b = Player::new("b", 0.0);
    let newcomer = Player::new("c", 0.0);
    let mut ranking = EloRanking::new();
    ranking.update([&resolved(&a, &b, LOSE)]).unwrap();

    let board = ranking.leaderboard();
    assert_eq!(board[0].0, "b");
    assert_eq!(board[1].0, "a");

    let seeds = Seeding::fit(&ranking, &[a.clone(), newcomer.clone(), b.clone()]).unwrap();
    assert_eq!(seeds.keys(), vec![b, newcomer.clone(), a]);
    assert_eq!(seeds.value_of(&newcomer).unwrap(), DEFAULT_ELO);
    assert_eq!(ranking.ratings().len(), 2);
}

#[test]
fn test_custom_inference() {
    struct Winner;
    impl Inference for Winner {
        fn rate(&self, r1: f64, r2: f64, score: f64) -> (f64, f64) {
            (r1 + score, r2 + 1.0 - score)
        }
    }

    let a = Player::new("a", 0.0);
    let b = Player::new("b", 0.0);
    let mut ranking = EloRanking::with_inference(Winner);
    ranking.update([&resolved(&a, &b, WIN), &resolved(&a, &b, WIN)]).unwrap();
    assert_eq!(ranking.rating(&a), DEFAULT_ELO + 2.0);
    assert_eq!(ranking.rating(&b), DEFAULT_ELO);
}

#[test]
fn test_update_keeps_the_sort_policy() {
    let a = Player::new("a", 0.0);
    let b = Player::new("b", 0.0);
    let mut ranking = EloRanking::new().with_sort_policy(SortPolicy::Get);
    ranking.register(&[a.clone(), b.clone()]).unwrap();

    ranking.update([&resolved(&a, &b, LOSE)]).unwrap();
    assert_eq!(ranking.ratings().policy(), SortPolicy::Get);
    assert_eq!(ranking.ratings().keys(), vec![b, a]);
}
