//! Competition lifecycle shared by every format.
//!
//! A [`Competition`] owns the participants, the seeding source, the solver and
//! the game history. The format-specific parts (first round setup, pairing,
//! state update after a round, final placements) live behind [`Format`].

use std::collections::{BTreeMap, BTreeSet};

use game_core::{Achievement, Duel, Player, PlayerError, Solver};
use standing::Standing;
use tracing::{debug, info, warn};

use crate::error::CompetitionError;
use crate::seeding::Seeding;

/// Lifecycle stage. Stages only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Registration,
    Started,
    Finished,
    Closed,
    /// A round could not be played or applied. Terminal.
    Aborted,
}

/// Format-specific behaviour of a competition.
///
/// `played` is the full game history, one entry per round.
pub trait Format {
    /// Human readable format name
    fn label(&self) -> &'static str;

    /// Validate the participant count and set up the initial state.
    ///
    /// Formats with a preliminary phase may play it here and append its
    /// rounds to `played`.
    fn initialise(
        &mut self,
        seeding: &Standing<Player>,
        solver: &mut dyn Solver,
        played: &mut Vec<Vec<Duel>>,
    ) -> Result<(), CompetitionError>;

    /// Live duels of the next round
    fn generate_games(
        &mut self,
        seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<Vec<Duel>, CompetitionError>;

    /// Apply the last played round. Returns `true` once the format is over.
    fn update(&mut self, played: &[Vec<Duel>]) -> Result<bool, CompetitionError>;

    /// Final placement of every participant, 1 being the best
    fn standing(
        &self,
        seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<BTreeMap<Player, usize>, CompetitionError>;
}

/// Resolve every game of a round and append it to the history.
pub fn play_games(
    mut games: Vec<Duel>,
    solver: &mut dyn Solver,
    played: &mut Vec<Vec<Duel>>,
) -> Result<(), CompetitionError> {
    for game in &mut games {
        solver.solve(game)?;
    }
    played.push(games);
    Ok(())
}

/// Play rounds until the format reports completion.
///
/// A round the format fails to apply is removed from `played` again, so the
/// history only holds applied rounds.
pub fn drive<F: Format + ?Sized>(
    format: &mut F,
    seeding: &Standing<Player>,
    solver: &mut dyn Solver,
    played: &mut Vec<Vec<Duel>>,
) -> Result<(), CompetitionError> {
    loop {
        let games = format.generate_games(seeding, played)?;
        if games.is_empty() {
            return Err(CompetitionError::Pairing(format!(
                "{} produced an empty round",
                format.label()
            )));
        }
        let count = games.len();
        play_games(games, solver, played)?;
        debug!(format = format.label(), round = played.len(), games = count, "round played");
        match format.update(played) {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            Err(err) => {
                played.pop();
                return Err(err);
            }
        }
    }
}

/// A named event running one [`Format`] over a set of players.
///
/// ```
/// use game_core::{BetterWin, Player};
/// use tournament::{level_standing, Competition, SingleEliminationBracket};
///
/// let players: Vec<Player> = (1..=4)
///     .map(|i| Player::new(format!("p{i}"), 100.0 * i as f64))
///     .collect();
/// let seeding = level_standing(&players).unwrap();
///
/// let bracket = SingleEliminationBracket::default();
/// let mut cup = Competition::new("Cup", seeding, BetterWin::new(), bracket);
/// cup.registration(players.iter().cloned()).unwrap();
/// cup.run().unwrap();
///
/// assert_eq!(cup.top(1)[0].name(), "p4");
/// ```
pub struct Competition<F> {
    name: String,
    seeding: Box<dyn Seeding>,
    seeds: Option<Standing<Player>>,
    solver: Box<dyn Solver>,
    cashprize: BTreeMap<usize, f64>,
    participants: BTreeSet<Player>,
    played: Vec<Vec<Duel>>,
    standing: BTreeMap<Player, usize>,
    stage: Stage,
    format: F,
}

impl<F: Format> Competition<F> {
    pub fn new(
        name: impl Into<String>,
        seeding: impl Seeding + 'static,
        solver: impl Solver + 'static,
        format: F,
    ) -> Self {
        Self {
            name: name.into(),
            seeding: Box::new(seeding),
            seeds: None,
            solver: Box::new(solver),
            cashprize: BTreeMap::new(),
            participants: BTreeSet::new(),
            played: Vec::new(),
            standing: BTreeMap::new(),
            stage: Stage::Registration,
            format,
        }
    }

    /// Prize money per placement. Placements without an entry earn nothing.
    pub fn with_cashprize(mut self, cashprize: BTreeMap<usize, f64>) -> Self {
        self.cashprize = cashprize;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    pub fn participants(&self) -> &BTreeSet<Player> {
        &self.participants
    }

    /// Seeded participants, available once the competition started
    pub fn seeds(&self) -> Option<&Standing<Player>> {
        self.seeds.as_ref()
    }

    pub fn prize(&self, place: usize) -> f64 {
        self.cashprize.get(&place).copied().unwrap_or(0.0)
    }

    /// Add participants. Registering a player twice has no effect.
    pub fn registration<I>(&mut self, players: I) -> Result<(), CompetitionError>
    where
        I: IntoIterator<Item = Player>,
    {
        if self.stage != Stage::Registration {
            return Err(CompetitionError::AlreadyStarted(self.name.clone()));
        }
        self.participants.extend(players);
        Ok(())
    }

    /// Close registration, seed the participants and prepare the first round.
    pub fn start(&mut self) -> Result<(), CompetitionError> {
        if self.stage != Stage::Registration {
            return Err(CompetitionError::AlreadyStarted(self.name.clone()));
        }
        let participants: Vec<Player> = self.participants.iter().cloned().collect();
        let seeds = self.seeding.fit(&participants)?;
        self.format
            .initialise(&seeds, self.solver.as_mut(), &mut self.played)?;
        self.seeds = Some(seeds);
        self.stage = Stage::Started;
        info!(
            competition = %self.name,
            format = self.format.label(),
            participants = participants.len(),
            "competition started"
        );
        Ok(())
    }

    /// Play every remaining round. Does nothing once the competition is over.
    ///
    /// A failed round aborts the competition: later calls to `play`,
    /// `trophies` and `run` return [`CompetitionError::Aborted`].
    pub fn play(&mut self) -> Result<(), CompetitionError> {
        match self.stage {
            Stage::Registration => return Err(CompetitionError::NotStarted(self.name.clone())),
            Stage::Aborted => return Err(CompetitionError::Aborted(self.name.clone())),
            Stage::Finished | Stage::Closed => return Ok(()),
            Stage::Started => {}
        }
        let seeds = self
            .seeds
            .as_ref()
            .ok_or_else(|| CompetitionError::NotStarted(self.name.clone()))?;
        if let Err(err) = drive(&mut self.format, seeds, self.solver.as_mut(), &mut self.played) {
            self.stage = Stage::Aborted;
            warn!(
                competition = %self.name,
                rounds = self.played.len(),
                %err,
                "competition aborted"
            );
            return Err(err);
        }
        self.stage = Stage::Finished;
        info!(
            competition = %self.name,
            rounds = self.played.len(),
            games = self.played.iter().map(Vec::len).sum::<usize>(),
            "competition finished"
        );
        Ok(())
    }

    /// Compute the final standing and hand out achievements.
    pub fn trophies(&mut self) -> Result<(), CompetitionError> {
        match self.stage {
            Stage::Finished => {}
            Stage::Closed => return Err(CompetitionError::AlreadyClosed(self.name.clone())),
            Stage::Aborted => return Err(CompetitionError::Aborted(self.name.clone())),
            Stage::Registration | Stage::Started => {
                return Err(CompetitionError::NotFinished(self.name.clone()))
            }
        }
        let seeds = self
            .seeds
            .as_ref()
            .ok_or_else(|| CompetitionError::NotStarted(self.name.clone()))?;
        let standing = self.format.standing(seeds, &self.played)?;

        // nobody is awarded unless everyone can be
        let mut awards = Vec::with_capacity(self.participants.len());
        for player in &self.participants {
            let place = *standing
                .get(player)
                .ok_or_else(|| CompetitionError::MissingPlacement(player.name().to_string()))?;
            if player.has_event(&self.name) {
                return Err(PlayerError::DuplicateEvent {
                    player: player.name().to_string(),
                    event: self.name.clone(),
                }
                .into());
            }
            awards.push((player, place));
        }
        for (player, place) in awards {
            player.collect(Achievement {
                event_name: self.name.clone(),
                place,
                prize: self.prize(place),
            })?;
        }

        self.standing = standing;
        self.stage = Stage::Closed;
        info!(competition = %self.name, "trophies awarded");
        Ok(())
    }

    /// `start`, `play` and `trophies` in sequence.
    pub fn run(&mut self) -> Result<(), CompetitionError> {
        if self.stage == Stage::Aborted {
            return Err(CompetitionError::Aborted(self.name.clone()));
        }
        if self.stage != Stage::Registration {
            return Err(CompetitionError::AlreadyStarted(self.name.clone()));
        }
        self.start()?;
        self.play()?;
        self.trophies()
    }

    /// Played games grouped by round
    pub fn games(&self) -> &[Vec<Duel>] {
        &self.played
    }

    /// Played games in the order they were played
    pub fn games_flat(&self) -> Vec<&Duel> {
        self.played.iter().flatten().collect()
    }

    /// Final placements, empty until trophies are awarded
    pub fn standing(&self) -> &BTreeMap<Player, usize> {
        &self.standing
    }

    /// Players sharing the given placement
    pub fn top(&self, place: usize) -> Vec<Player> {
        self.standing
            .iter()
            .filter(|(_, &p)| p == place)
            .map(|(player, _)| player.clone())
            .collect()
    }
}

#[cfg(test)]
#[path = "competition_tests.rs"]
mod competition_tests;
