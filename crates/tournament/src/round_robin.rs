//! Round-robin league.

use std::collections::{BTreeMap, VecDeque};

use game_core::{Duel, Player, Solver};
use standing::Standing;

use crate::competition::Format;
use crate::error::CompetitionError;
use crate::matching::{into_duels, round_robin};

/// Every participant meets every other participant once.
///
/// The schedule comes from [`round_robin`]; odd fields get a bye each round.
/// Placements follow total points (1 per win, 0.5 per draw). Players with the
/// same total share the best placement of their group.
#[derive(Debug, Clone, Default)]
pub struct RoundRobin {
    schedule: VecDeque<Vec<(Player, Player)>>,
}

impl RoundRobin {
    /// Rounds not played yet
    pub fn rounds_left(&self) -> usize {
        self.schedule.len()
    }
}

impl Format for RoundRobin {
    fn label(&self) -> &'static str {
        "round robin"
    }

    fn initialise(
        &mut self,
        seeding: &Standing<Player>,
        _solver: &mut dyn Solver,
        _played: &mut Vec<Vec<Duel>>,
    ) -> Result<(), CompetitionError> {
        let count = seeding.len();
        if count < 2 {
            return Err(CompetitionError::ParticipantCount {
                format: self.label(),
                expected: "at least 2".to_string(),
                got: count,
            });
        }
        self.schedule = round_robin(&seeding.keys()).into();
        Ok(())
    }

    fn generate_games(
        &mut self,
        _seeding: &Standing<Player>,
        _played: &[Vec<Duel>],
    ) -> Result<Vec<Duel>, CompetitionError> {
        self.schedule
            .pop_front()
            .map(into_duels)
            .ok_or_else(|| CompetitionError::Pairing("schedule is exhausted".to_string()))
    }

    fn update(&mut self, _played: &[Vec<Duel>]) -> Result<bool, CompetitionError> {
        Ok(self.schedule.is_empty())
    }

    fn standing(
        &self,
        seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<BTreeMap<Player, usize>, CompetitionError> {
        let mut points: BTreeMap<Player, f64> =
            seeding.keys().into_iter().map(|p| (p, 0.0)).collect();
        for game in played.iter().flatten() {
            let [s1, s2] = game
                .score()
                .ok_or_else(|| CompetitionError::Undecided(game.to_string()))?;
            *points.entry(game.player1().clone()).or_default() += s1;
            *points.entry(game.player2().clone()).or_default() += s2;
        }

        Ok(points
            .iter()
            .map(|(player, &total)| {
                let better = points.values().filter(|&&other| other > total).count();
                (player.clone(), better + 1)
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "round_robin_tests.rs"]
mod round_robin_tests;
