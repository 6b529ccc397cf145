//! Elimination brackets.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use game_core::{Duel, Player, Solver};
use standing::Standing;
use tracing::debug;

use crate::competition::{drive, Format};
use crate::error::CompetitionError;
use crate::matching::{consecutive_duels, riffle_shuffle};

/// Bracket order of seeds (1-based) for `2^rounds` players.
///
/// Pairing consecutive entries puts seed 1 against the last seed, and the
/// two best seeds can only meet in the final. `balanced_tree(3)` is
/// `[1, 8, 4, 5, 2, 7, 3, 6]`.
pub fn balanced_tree(rounds: u32) -> Vec<usize> {
    let mut seeds = vec![1, 2];
    for round in 2..=rounds {
        let check_sum = (1usize << round) + 1;
        seeds = seeds
            .iter()
            .flat_map(|&seed| [seed, check_sum - seed])
            .collect();
    }
    seeds
}

/// Winners of a round, in game order
pub(crate) fn winners(round: &[Duel]) -> Result<Vec<Player>, CompetitionError> {
    round
        .iter()
        .map(|game| {
            game.winner()
                .cloned()
                .ok_or_else(|| CompetitionError::Undecided(game.to_string()))
        })
        .collect()
}

/// Losers of a round, in game order
pub(crate) fn losers(round: &[Duel]) -> Result<Vec<Player>, CompetitionError> {
    round
        .iter()
        .map(|game| {
            game.loser()
                .cloned()
                .ok_or_else(|| CompetitionError::Undecided(game.to_string()))
        })
        .collect()
}

/// Placements of a knockout history where every game eliminates its loser.
///
/// Players eliminated in the same round share the best placement of their
/// group: with `n` players, losers of a round get
/// `n - eliminated_before - losers_this_round + 1`. The winner of the last
/// game is placed first.
fn elimination_placements(
    participants: usize,
    rounds: &[Vec<Duel>],
) -> Result<BTreeMap<Player, usize>, CompetitionError> {
    let mut placements = BTreeMap::new();
    let mut eliminated = 0;
    for round in rounds {
        let out = losers(round)?;
        let place = participants
            .checked_sub(eliminated + out.len())
            .ok_or_else(|| {
                CompetitionError::Pairing(format!(
                    "more players eliminated than the {participants} registered"
                ))
            })?
            + 1;
        eliminated += out.len();
        for player in out {
            placements.insert(player, place);
        }
    }
    let champion = rounds
        .last()
        .and_then(|round| round.first())
        .and_then(Duel::winner)
        .ok_or_else(|| CompetitionError::Pairing("no final was played".to_string()))?;
    placements.insert(champion.clone(), 1);
    Ok(placements)
}

fn check_power_of_two(format: &'static str, count: usize) -> Result<(), CompetitionError> {
    if count < 2 || !count.is_power_of_two() {
        return Err(CompetitionError::ParticipantCount {
            format,
            expected: "a power of two (at least 2)".to_string(),
            got: count,
        });
    }
    Ok(())
}

/// Knockout bracket: losers leave, winners advance, until one remains.
#[derive(Debug, Clone, Default)]
pub struct SingleEliminationBracket {
    players_left: Vec<Player>,
    participants: usize,
}

impl SingleEliminationBracket {
    /// Players still in the bracket, in bracket order
    pub fn players_left(&self) -> &[Player] {
        &self.players_left
    }
}

impl Format for SingleEliminationBracket {
    fn label(&self) -> &'static str {
        "single elimination"
    }

    fn initialise(
        &mut self,
        seeding: &Standing<Player>,
        _solver: &mut dyn Solver,
        _played: &mut Vec<Vec<Duel>>,
    ) -> Result<(), CompetitionError> {
        let count = seeding.len();
        check_power_of_two(self.label(), count)?;
        let order: Vec<usize> = balanced_tree(count.trailing_zeros())
            .into_iter()
            .map(|seed| seed - 1)
            .collect();
        self.players_left = seeding.get_by_indices(&order)?;
        self.participants = count;
        Ok(())
    }

    fn generate_games(
        &mut self,
        _seeding: &Standing<Player>,
        _played: &[Vec<Duel>],
    ) -> Result<Vec<Duel>, CompetitionError> {
        consecutive_duels(&self.players_left)
    }

    fn update(&mut self, played: &[Vec<Duel>]) -> Result<bool, CompetitionError> {
        let last = played
            .last()
            .ok_or_else(|| CompetitionError::Pairing("no round to apply".to_string()))?;
        self.players_left = winners(last)?;
        Ok(self.players_left.len() <= 1)
    }

    fn standing(
        &self,
        _seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<BTreeMap<Player, usize>, CompetitionError> {
        elimination_placements(self.participants, played)
    }
}

/// Merges the lower bracket survivors with the players dropping down from the
/// upper bracket into the next lower bracket round.
pub type Injector = fn(&[Player], &[Player]) -> Vec<Player>;

/// Two-loss knockout.
///
/// The upper bracket is a [`SingleEliminationBracket`] played in full while
/// the competition starts. Its losers then drop into the lower bracket
/// round by round, in the order they were eliminated, followed by the upper
/// bracket champion. A player is out after a lower bracket loss.
#[derive(Clone)]
pub struct DoubleEliminationBracket {
    upper: SingleEliminationBracket,
    upper_rounds: usize,
    participants: usize,
    lower: VecDeque<Vec<Player>>,
    injector: Injector,
}

impl Default for DoubleEliminationBracket {
    fn default() -> Self {
        Self::with_injector(riffle_shuffle::<Player>)
    }
}

impl fmt::Debug for DoubleEliminationBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleEliminationBracket")
            .field("upper", &self.upper)
            .field("upper_rounds", &self.upper_rounds)
            .field("participants", &self.participants)
            .field("lower", &self.lower)
            .finish_non_exhaustive()
    }
}

impl DoubleEliminationBracket {
    pub fn with_injector(injector: Injector) -> Self {
        Self {
            upper: SingleEliminationBracket::default(),
            upper_rounds: 0,
            participants: 0,
            lower: VecDeque::new(),
            injector,
        }
    }

    /// Number of rounds played by the upper bracket
    pub fn upper_rounds(&self) -> usize {
        self.upper_rounds
    }

    /// Groups waiting in the lower bracket: survivors first, then the
    /// players dropping down
    pub fn lower_bracket(&self) -> &VecDeque<Vec<Player>> {
        &self.lower
    }
}

impl Format for DoubleEliminationBracket {
    fn label(&self) -> &'static str {
        "double elimination"
    }

    fn initialise(
        &mut self,
        seeding: &Standing<Player>,
        solver: &mut dyn Solver,
        played: &mut Vec<Vec<Duel>>,
    ) -> Result<(), CompetitionError> {
        let count = seeding.len();
        check_power_of_two(self.label(), count)?;

        let mut upper_played = Vec::new();
        self.upper = SingleEliminationBracket::default();
        self.upper.initialise(seeding, solver, &mut upper_played)?;
        drive(&mut self.upper, seeding, solver, &mut upper_played)?;

        let mut lower = upper_played
            .iter()
            .map(|round| losers(round))
            .collect::<Result<VecDeque<_>, _>>()?;
        lower.push_back(self.upper.players_left().to_vec());
        debug!(
            upper_rounds = upper_played.len(),
            "upper bracket complete, lower bracket seeded"
        );

        self.lower = lower;
        self.upper_rounds = upper_played.len();
        self.participants = count;
        played.extend(upper_played);
        Ok(())
    }

    fn generate_games(
        &mut self,
        _seeding: &Standing<Player>,
        _played: &[Vec<Duel>],
    ) -> Result<Vec<Duel>, CompetitionError> {
        if self.lower.len() < 2 {
            return Err(CompetitionError::Pairing(
                "lower bracket has nothing left to play".to_string(),
            ));
        }
        let pool = if self.lower[0].len() == self.lower[1].len() {
            let survivors = self.lower.pop_front().unwrap_or_default();
            let dropped = self.lower.pop_front().unwrap_or_default();
            (self.injector)(&survivors, &dropped)
        } else {
            self.lower.pop_front().unwrap_or_default()
        };
        consecutive_duels(&pool)
    }

    fn update(&mut self, played: &[Vec<Duel>]) -> Result<bool, CompetitionError> {
        let last = played
            .last()
            .ok_or_else(|| CompetitionError::Pairing("no round to apply".to_string()))?;
        self.lower.push_front(winners(last)?);
        Ok(self.lower.len() <= 1)
    }

    fn standing(
        &self,
        _seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<BTreeMap<Player, usize>, CompetitionError> {
        let lower_rounds = played.get(self.upper_rounds..).ok_or_else(|| {
            CompetitionError::Pairing("history is shorter than the upper bracket".to_string())
        })?;
        elimination_placements(self.participants, lower_rounds)
    }
}

#[cfg(test)]
#[path = "knockout_tests.rs"]
mod knockout_tests;
