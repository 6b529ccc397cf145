//! Snake (king of the hill) format.

use std::collections::{BTreeMap, VecDeque};

use game_core::{Duel, Player, Solver};
use standing::Standing;

use crate::competition::Format;
use crate::error::CompetitionError;

/// Ladder where the lowest seeds start and the winner climbs.
///
/// The queue starts with the seeds in reverse order. Each round the first two
/// players in the queue meet, the winner goes back to the front and the loser
/// is out. The `k`-th game (0-based) places its loser at `n - k`.
#[derive(Debug, Clone, Default)]
pub struct Snake {
    queue: VecDeque<Player>,
    participants: usize,
}

impl Snake {
    /// Players still waiting, next challenger first
    pub fn queue(&self) -> &VecDeque<Player> {
        &self.queue
    }
}

impl Format for Snake {
    fn label(&self) -> &'static str {
        "snake"
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
        self.queue = seeding.keys().into_iter().rev().collect();
        self.participants = count;
        Ok(())
    }

    fn generate_games(
        &mut self,
        _seeding: &Standing<Player>,
        _played: &[Vec<Duel>],
    ) -> Result<Vec<Duel>, CompetitionError> {
        match (self.queue.pop_front(), self.queue.pop_front()) {
            (Some(holder), Some(challenger)) => Ok(vec![Duel::new(holder, challenger)]),
            _ => Err(CompetitionError::Pairing(
                "snake queue holds fewer than two players".to_string(),
            )),
        }
    }

    fn update(&mut self, played: &[Vec<Duel>]) -> Result<bool, CompetitionError> {
        let last = played
            .last()
            .ok_or_else(|| CompetitionError::Pairing("no round to apply".to_string()))?;
        for game in last {
            let winner = game
                .winner()
                .ok_or_else(|| CompetitionError::Undecided(game.to_string()))?;
            self.queue.push_front(winner.clone());
        }
        Ok(self.queue.len() <= 1)
    }

    fn standing(
        &self,
        _seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<BTreeMap<Player, usize>, CompetitionError> {
        let mut placements = BTreeMap::new();
        let mut last_winner = None;
        for (k, game) in played.iter().flatten().enumerate() {
            let loser = game
                .loser()
                .ok_or_else(|| CompetitionError::Undecided(game.to_string()))?;
            placements.insert(loser.clone(), self.participants - k);
            last_winner = game.winner();
        }
        let champion =
            last_winner.ok_or_else(|| CompetitionError::Pairing("no game was played".to_string()))?;
        placements.insert(champion.clone(), 1);
        Ok(placements)
    }
}

#[cfg(test)]
#[path = "snake_tests.rs"]
mod snake_tests;
