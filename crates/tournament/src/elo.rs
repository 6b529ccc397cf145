//! Elo rating calculation and tracking

use std::collections::HashMap;

use game_core::{Duel, Player};
use serde::{Deserialize, Serialize};
use standing::{SortPolicy, Standing, StandingError};

use crate::seeding::Seeding;

/// Default starting Elo for new players
pub const DEFAULT_ELO: f64 = 1500.0;

/// K-factor for Elo updates (higher = more volatile)
pub const K_FACTOR: f64 = 32.0;

/// Rating update rule applied after every game
pub trait Inference {
    /// New ratings of both players after a game where player 1 scored
    /// `score` (1 for a win, 0.5 for a draw, 0 for a loss)
    fn rate(&self, rating1: f64, rating2: f64, score: f64) -> (f64, f64);
}

/// Classic Elo update
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Elo {
    pub k: f64,
    pub base: f64,
    pub scale: f64,
}

impl Default for Elo {
    fn default() -> Self {
        Self {
            k: K_FACTOR,
            base: 10.0,
            scale: 400.0,
        }
    }
}

impl Elo {
    /// Calculate expected score for player 1 against player 2
    pub fn expected_score(&self, rating1: f64, rating2: f64) -> f64 {
        1.0 / (1.0 + self.base.powf((rating2 - rating1) / self.scale))
    }
}

impl Inference for Elo {
    fn rate(&self, rating1: f64, rating2: f64, score: f64) -> (f64, f64) {
        let change = self.k * (score - self.expected_score(rating1, rating2));
        (rating1 + change, rating2 - change)
    }
}

/// Rating system for tracking player strength across competitions.
///
/// Doubles as a [`Seeding`] source: unrated participants enter at
/// [`DEFAULT_ELO`].
#[derive(Debug, Clone)]
pub struct EloRanking<I = Elo> {
    ratings: Standing<Player>,
    inference: I,
    games_played: HashMap<Player, u32>,
}

impl Default for EloRanking<Elo> {
    fn default() -> Self {
        Self::new()
    }
}

impl EloRanking<Elo> {
    pub fn new() -> Self {
        Self::with_inference(Elo::default())
    }
}

impl<I: Inference> EloRanking<I> {
    pub fn with_inference(inference: I) -> Self {
        Self {
            ratings: Standing::new().with_default(DEFAULT_ELO),
            inference,
            games_played: HashMap::new(),
        }
    }

    /// Choose when the backing standing re-sorts. `update` keeps this
    /// policy once the batch is applied.
    pub fn with_sort_policy(mut self, policy: SortPolicy) -> Self {
        self.ratings.set_sorting(None, Some(policy));
        self
    }

    /// Start tracking players. Players already rated keep their rating.
    pub fn register(&mut self, players: &[Player]) -> Result<(), StandingError> {
        let fresh: Vec<Player> = players
            .iter()
            .filter(|p| !self.ratings.contains(p))
            .cloned()
            .collect();
        self.ratings.add(fresh, &[])
    }

    /// Current rating, [`DEFAULT_ELO`] for unknown players
    pub fn rating(&self, player: &Player) -> f64 {
        self.ratings.value_of(player).unwrap_or(DEFAULT_ELO)
    }

    pub fn games_played(&self, player: &Player) -> u32 {
        self.games_played.get(player).copied().unwrap_or(0)
    }

    pub fn ratings(&self) -> &Standing<Player> {
        &self.ratings
    }

    /// Update ratings with a batch of resolved games, in order.
    ///
    /// Live games are skipped. Scores are normalised so that any scoring
    /// scheme maps to `[0, 1]` from player 1's perspective.
    pub fn update<'a, G>(&mut self, games: G) -> Result<(), StandingError>
    where
        G: IntoIterator<Item = &'a Duel>,
    {
        // sort once, after the whole batch
        let policy = self.ratings.policy();
        self.ratings.set_sorting(None, Some(SortPolicy::Get));
        let result = self.apply(games);
        self.ratings.set_sorting(None, Some(policy));
        result
    }

    fn apply<'a, G>(&mut self, games: G) -> Result<(), StandingError>
    where
        G: IntoIterator<Item = &'a Duel>,
    {
        for game in games {
            let Some([s1, s2]) = game.score() else {
                continue;
            };
            let total = s1 + s2;
            let score = if total > 0.0 { s1 / total } else { 0.5 };

            let (p1, p2) = (game.player1(), game.player2());
            let (r1, r2) = self.inference.rate(self.rating(p1), self.rating(p2), score);
            self.ratings.set_value(p1.clone(), r1)?;
            self.ratings.set_value(p2.clone(), r2)?;

            *self.games_played.entry(p1.clone()).or_insert(0) += 1;
            *self.games_played.entry(p2.clone()).or_insert(0) += 1;
        }
        Ok(())
    }

    /// Get a sorted leaderboard
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        self.ratings
            .items()
            .into_iter()
            .map(|(player, rating)| {
                let games = self.games_played(&player);
                (player.name().to_string(), rating, games)
            })
            .collect()
    }

    /// Print leaderboard to stdout
    pub fn print_leaderboard(&self) {
        println!("\n=== Elo Leaderboard ===");
        println!("{:<30} {:>8} {:>8}", "Player", "Elo", "Games");
        println!("{}", "-".repeat(50));
        for (name, rating, games) in self.leaderboard() {
            println!("{:<30} {:>8.1} {:>8}", name, rating, games);
        }
        println!();
    }
}

impl<I> Seeding for EloRanking<I> {
    fn fit(&self, participants: &[Player]) -> Result<Standing<Player>, StandingError> {
        self.ratings.fit(participants)
    }
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
