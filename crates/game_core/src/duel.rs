//! One-versus-one games.

use std::fmt;

use crate::error::MatchError;
use crate::player::Player;

/// Score of a win, from player 1's perspective
pub const WIN: [f64; 2] = [1.0, 0.0];

/// Score of a loss, from player 1's perspective
pub const LOSE: [f64; 2] = [0.0, 1.0];

/// Score of a draw
pub const DRAW: [f64; 2] = [0.5, 0.5];

/// A game between two single-player teams.
///
/// A duel starts live (no score). Its result is set once by a
/// [`Solver`](crate::Solver); winner, loser and draw are derived from the
/// score.
#[derive(Debug, Clone)]
pub struct Duel {
    player1: Player,
    player2: Player,
    score: Option<[f64; 2]>,
}

impl Duel {
    pub fn new(player1: Player, player2: Player) -> Self {
        Self {
            player1,
            player2,
            score: None,
        }
    }

    pub fn player1(&self) -> &Player {
        &self.player1
    }

    pub fn player2(&self) -> &Player {
        &self.player2
    }

    pub fn players(&self) -> [&Player; 2] {
        [&self.player1, &self.player2]
    }

    /// Whether the game still awaits its result
    pub fn is_live(&self) -> bool {
        self.score.is_none()
    }

    pub fn score(&self) -> Option<[f64; 2]> {
        self.score
    }

    /// Record the final score. A duel accepts exactly one result.
    pub fn set_result(&mut self, score: &[f64]) -> Result<(), MatchError> {
        if self.score.is_some() {
            return Err(MatchError::AlreadyPlayed {
                player1: self.player1.name().to_string(),
                player2: self.player2.name().to_string(),
            });
        }
        let score: [f64; 2] = score.try_into().map_err(|_| MatchError::InvalidScore {
            expected: 2,
            got: score.len(),
        })?;
        if !score.iter().all(|s| s.is_finite()) {
            return Err(MatchError::NonFinite);
        }
        self.score = Some(score);
        Ok(())
    }

    /// `None` while live or on a draw
    pub fn winner(&self) -> Option<&Player> {
        let [s1, s2] = self.score?;
        if s1 > s2 {
            Some(&self.player1)
        } else if s2 > s1 {
            Some(&self.player2)
        } else {
            None
        }
    }

    /// `None` while live or on a draw
    pub fn loser(&self) -> Option<&Player> {
        let winner = self.winner()?;
        self.opponent(winner)
    }

    pub fn is_draw(&self) -> bool {
        matches!(self.score, Some([s1, s2]) if s1 == s2)
    }

    pub fn involves(&self, player: &Player) -> bool {
        self.player1 == *player || self.player2 == *player
    }

    pub fn opponent(&self, player: &Player) -> Option<&Player> {
        if self.player1 == *player {
            Some(&self.player2)
        } else if self.player2 == *player {
            Some(&self.player1)
        } else {
            None
        }
    }

    /// Score share earned by `player`, once the duel is resolved
    pub fn points(&self, player: &Player) -> Option<f64> {
        let [s1, s2] = self.score?;
        if self.player1 == *player {
            Some(s1)
        } else if self.player2 == *player {
            Some(s2)
        } else {
            None
        }
    }

    /// Whether both duels oppose the same two players, in any order
    pub fn same_pairing(&self, other: &Duel) -> bool {
        (self.player1 == other.player1 && self.player2 == other.player2)
            || (self.player1 == other.player2 && self.player2 == other.player1)
    }
}

impl fmt::Display for Duel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some([s1, s2]) => write!(f, "{} {}-{} {}", self.player1, s1, s2, self.player2),
            None => write!(f, "{} vs {}", self.player1, self.player2),
        }
    }
}

#[cfg(test)]
#[path = "duel_tests.rs"]
mod duel_tests;
