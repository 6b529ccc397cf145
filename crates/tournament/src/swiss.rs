//! Swiss bracket: players only meet opponents with the same win/loss record.
//!
//! The bracket is fixed to 16 players. A player is done after 3 wins or
//! 3 losses, so at most 5 rounds are played. Each round, every active score
//! group is drawn independently:
//!
//! 1. a [`Shuffler`] reorders the group positions,
//! 2. a [`Seeder`] reorders the players,
//! 3. a [`Generator`] turns the ordered players into candidate pairings,
//! 4. an [`Evaluator`] sorts the candidates.
//!
//! The first candidate without a rematch is played. Each step can be replaced
//! per score group or for every group at once.

use std::collections::{BTreeMap, HashMap, HashSet};

use game_core::{Duel, Player, Solver};
use standing::Standing;
use tracing::{debug, warn};

use crate::competition::Format;
use crate::error::CompetitionError;
use crate::matching::{chord_diagrams_n6, into_duels, round_robin, swiss_priority_n6};

pub const SWISS_PARTICIPANTS: usize = 16;
pub const SWISS_ROUNDS: usize = 5;
pub const SWISS_MAX_WINS: usize = 3;
pub const SWISS_MAX_LOSSES: usize = 3;

/// `(wins, losses)` record of a score group
pub type Score = (usize, usize);

/// One candidate draw: `(player1, player2)` for every game
pub type Pairing = Vec<(Player, Player)>;

/// Reorders the positions `0..n` of a score group.
pub trait Shuffler {
    fn rearrange(&self, positions: Vec<usize>) -> Vec<usize>;
}

/// Reorders the players of a score group, given the initial seeding and the
/// games played so far.
pub trait Seeder {
    fn seed(
        &self,
        players: Vec<Player>,
        seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Vec<Player>;
}

/// Candidate pairings for an ordered group. The first candidate should be
/// the natural pairing of that order.
pub trait Generator {
    fn generate(&self, players: &[Player]) -> Vec<Pairing>;
}

/// Sorts candidate pairings, preferred first.
pub trait Evaluator {
    fn evaluate(
        &self,
        options: Vec<Pairing>,
        seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Vec<Pairing>;
}

/// Leaves positions, players and candidates as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Shuffler for Identity {
    fn rearrange(&self, positions: Vec<usize>) -> Vec<usize> {
        positions
    }
}

impl Seeder for Identity {
    fn seed(&self, players: Vec<Player>, _: &Standing<Player>, _: &[Vec<Duel>]) -> Vec<Player> {
        players
    }
}

impl Evaluator for Identity {
    fn evaluate(
        &self,
        options: Vec<Pairing>,
        _: &Standing<Player>,
        _: &[Vec<Duel>],
    ) -> Vec<Pairing> {
        options
    }
}

/// Every round of a round-robin schedule over the group, in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rotation;

impl Generator for Rotation {
    fn generate(&self, players: &[Player]) -> Vec<Pairing> {
        round_robin(players)
    }
}

/// Sorts players by their initial seed. Unknown players go last.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOrder;

impl Seeder for SeedOrder {
    fn seed(
        &self,
        mut players: Vec<Player>,
        seeding: &Standing<Player>,
        _: &[Vec<Duel>],
    ) -> Vec<Player> {
        players.sort_by_key(|p| seeding.index_of(p).unwrap_or(usize::MAX));
        players
    }
}

/// All fifteen matchings of a six-player group. Other group sizes fall back
/// to [`Rotation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChordDiagrams;

impl Generator for ChordDiagrams {
    fn generate(&self, players: &[Player]) -> Vec<Pairing> {
        chord_diagrams_n6(players).unwrap_or_else(|_| round_robin(players))
    }
}

/// All fifteen matchings of a six-player group, top seed against bottom seed
/// first. Other group sizes fall back to [`Rotation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityTable;

impl Generator for PriorityTable {
    fn generate(&self, players: &[Player]) -> Vec<Pairing> {
        swiss_priority_n6(players).unwrap_or_else(|_| round_robin(players))
    }
}

/// Stable sort of the candidates by number of rematches.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestRematches;

impl Evaluator for FewestRematches {
    fn evaluate(
        &self,
        mut options: Vec<Pairing>,
        _: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Vec<Pairing> {
        let past = past_pairings(played);
        options.sort_by_key(|option| rematches(option, &past));
        options
    }
}

/// What to do when every candidate of a score group contains a rematch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Abort with [`CompetitionError::DrawExhausted`]
    #[default]
    Fail,
    /// Play the candidate with the fewest rematches
    FewestRematches,
}

fn pair_key(a: &Player, b: &Player) -> (Player, Player) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

fn past_pairings(played: &[Vec<Duel>]) -> HashSet<(Player, Player)> {
    played
        .iter()
        .flatten()
        .map(|game| pair_key(game.player1(), game.player2()))
        .collect()
}

fn rematches(option: &Pairing, past: &HashSet<(Player, Player)>) -> usize {
    option
        .iter()
        .filter(|(a, b)| past.contains(&pair_key(a, b)))
        .count()
}

fn covers(option: &Pairing, group: &[Player]) -> bool {
    let mut seen = HashSet::with_capacity(group.len());
    for (a, b) in option {
        if !seen.insert(a) || !seen.insert(b) {
            return false;
        }
    }
    seen.len() == group.len() && group.iter().all(|p| seen.contains(p))
}

/// 16-player Swiss bracket.
///
/// Players in a score group keep their initial seed order. Players sharing
/// a final record share the best placement of that record, from `3-0` down
/// to `0-3`.
pub struct SwissBracket {
    current_round: usize,
    buckets: BTreeMap<Score, Vec<Player>>,
    records: HashMap<Player, Score>,
    seed_order: HashMap<Player, usize>,
    shufflers: HashMap<Score, Box<dyn Shuffler>>,
    seeders: HashMap<Score, Box<dyn Seeder>>,
    generators: HashMap<Score, Box<dyn Generator>>,
    evaluators: HashMap<Score, Box<dyn Evaluator>>,
    default_shuffler: Box<dyn Shuffler>,
    default_seeder: Box<dyn Seeder>,
    default_generator: Box<dyn Generator>,
    default_evaluator: Box<dyn Evaluator>,
    on_exhaustion: ExhaustionPolicy,
}

impl Default for SwissBracket {
    fn default() -> Self {
        Self::new()
    }
}

impl SwissBracket {
    pub fn new() -> Self {
        Self {
            current_round: 0,
            buckets: BTreeMap::new(),
            records: HashMap::new(),
            seed_order: HashMap::new(),
            shufflers: HashMap::new(),
            seeders: HashMap::new(),
            generators: HashMap::new(),
            evaluators: HashMap::new(),
            default_shuffler: Box::new(Identity),
            default_seeder: Box::new(Identity),
            default_generator: Box::new(Rotation),
            default_evaluator: Box::new(Identity),
            on_exhaustion: ExhaustionPolicy::default(),
        }
    }

    pub fn with_shuffler(mut self, score: Score, shuffler: impl Shuffler + 'static) -> Self {
        self.shufflers.insert(score, Box::new(shuffler));
        self
    }

    pub fn with_seeder(mut self, score: Score, seeder: impl Seeder + 'static) -> Self {
        self.seeders.insert(score, Box::new(seeder));
        self
    }

    pub fn with_generator(mut self, score: Score, generator: impl Generator + 'static) -> Self {
        self.generators.insert(score, Box::new(generator));
        self
    }

    pub fn with_evaluator(mut self, score: Score, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluators.insert(score, Box::new(evaluator));
        self
    }

    pub fn with_default_shuffler(mut self, shuffler: impl Shuffler + 'static) -> Self {
        self.default_shuffler = Box::new(shuffler);
        self
    }

    pub fn with_default_seeder(mut self, seeder: impl Seeder + 'static) -> Self {
        self.default_seeder = Box::new(seeder);
        self
    }

    pub fn with_default_generator(mut self, generator: impl Generator + 'static) -> Self {
        self.default_generator = Box::new(generator);
        self
    }

    pub fn with_default_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.default_evaluator = Box::new(evaluator);
        self
    }

    pub fn on_exhaustion(mut self, policy: ExhaustionPolicy) -> Self {
        self.on_exhaustion = policy;
        self
    }

    /// Rounds played so far
    pub fn current_round(&self) -> usize {
        self.current_round
    }

    /// Players who reached `score`, in seed order
    pub fn bucket(&self, score: Score) -> &[Player] {
        self.buckets.get(&score).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Current record of a player
    pub fn record(&self, player: &Player) -> Option<Score> {
        self.records.get(player).copied()
    }

    /// Score groups that play in the current round: `(r - i, i)` for every
    /// split of `r` games where neither count reached its limit.
    pub fn round_scores(&self) -> Vec<Score> {
        let round = self.current_round;
        (0..=round)
            .filter(|&losses| losses < SWISS_MAX_LOSSES && round - losses < SWISS_MAX_WINS)
            .map(|losses| (round - losses, losses))
            .collect()
    }

    fn shuffler(&self, score: Score) -> &dyn Shuffler {
        match self.shufflers.get(&score) {
            Some(shuffler) => &**shuffler,
            None => &*self.default_shuffler,
        }
    }

    fn seeder(&self, score: Score) -> &dyn Seeder {
        match self.seeders.get(&score) {
            Some(seeder) => &**seeder,
            None => &*self.default_seeder,
        }
    }

    fn generator(&self, score: Score) -> &dyn Generator {
        match self.generators.get(&score) {
            Some(generator) => &**generator,
            None => &*self.default_generator,
        }
    }

    fn evaluator(&self, score: Score) -> &dyn Evaluator {
        match self.evaluators.get(&score) {
            Some(evaluator) => &**evaluator,
            None => &*self.default_evaluator,
        }
    }

    /// Candidate pairings of a score group, preferred first
    fn draws(
        &self,
        score: Score,
        group: &[Player],
        seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<Vec<Pairing>, CompetitionError> {
        let positions = self.shuffler(score).rearrange((0..group.len()).collect());
        if positions.len() != group.len() {
            return Err(CompetitionError::Pairing(format!(
                "shuffler returned {} positions for a group of {}",
                positions.len(),
                group.len()
            )));
        }
        let ordered = positions
            .iter()
            .map(|&i| {
                group.get(i).cloned().ok_or_else(|| {
                    CompetitionError::Pairing(format!(
                        "shuffler returned position {i} for a group of {}",
                        group.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let seeded = self.seeder(score).seed(ordered, seeding, played);
        let options = self.generator(score).generate(&seeded);
        Ok(self.evaluator(score).evaluate(options, seeding, played))
    }

    /// First candidate without a rematch, or the exhaustion fallback
    fn valid_draw(
        &self,
        score: Score,
        mut options: Vec<Pairing>,
        past: &HashSet<(Player, Player)>,
    ) -> Result<Pairing, CompetitionError> {
        let (wins, losses) = score;
        if let Some(pos) = options.iter().position(|o| rematches(o, past) == 0) {
            return Ok(options.swap_remove(pos));
        }
        match self.on_exhaustion {
            ExhaustionPolicy::Fail => Err(CompetitionError::DrawExhausted { wins, losses }),
            ExhaustionPolicy::FewestRematches => {
                let best = options
                    .into_iter()
                    .min_by_key(|o| rematches(o, past))
                    .ok_or(CompetitionError::DrawExhausted { wins, losses })?;
                warn!(
                    wins,
                    losses,
                    rematches = rematches(&best, past),
                    "no rematch-free draw left, playing the closest one"
                );
                Ok(best)
            }
        }
    }

    fn advance(&mut self, player: Player, won: bool) {
        let record = self.records.entry(player.clone()).or_insert((0, 0));
        if won {
            record.0 += 1;
        } else {
            record.1 += 1;
        }
        let score = *record;
        self.buckets.entry(score).or_default().push(player);
    }
}

impl Format for SwissBracket {
    fn label(&self) -> &'static str {
        "swiss"
    }

    fn initialise(
        &mut self,
        seeding: &Standing<Player>,
        _solver: &mut dyn Solver,
        _played: &mut Vec<Vec<Duel>>,
    ) -> Result<(), CompetitionError> {
        let count = seeding.len();
        if count != SWISS_PARTICIPANTS {
            return Err(CompetitionError::ParticipantCount {
                format: self.label(),
                expected: format!("exactly {SWISS_PARTICIPANTS}"),
                got: count,
            });
        }
        let players = seeding.keys();

        self.buckets = (0..=SWISS_MAX_LOSSES)
            .flat_map(|losses| (0..=SWISS_MAX_WINS).map(move |wins| (wins, losses)))
            .filter(|(wins, losses)| wins + losses <= SWISS_ROUNDS)
            .map(|score| (score, Vec::new()))
            .collect();
        self.buckets.insert((0, 0), players.clone());
        self.records = players.iter().map(|p| (p.clone(), (0, 0))).collect();
        self.seed_order = players
            .into_iter()
            .enumerate()
            .map(|(i, p)| (p, i))
            .collect();
        self.current_round = 0;
        Ok(())
    }

    fn generate_games(
        &mut self,
        seeding: &Standing<Player>,
        played: &[Vec<Duel>],
    ) -> Result<Vec<Duel>, CompetitionError> {
        let past = past_pairings(played);
        let mut games = Vec::new();
        for score in self.round_scores() {
            let group = self.bucket(score).to_vec();
            if group.is_empty() {
                continue;
            }
            if group.len() % 2 != 0 {
                return Err(CompetitionError::Pairing(format!(
                    "score group {}-{} holds an odd number of players",
                    score.0, score.1
                )));
            }
            let options = self.draws(score, &group, seeding, played)?;
            let pairing = self.valid_draw(score, options, &past)?;
            if !covers(&pairing, &group) {
                return Err(CompetitionError::Pairing(format!(
                    "draw for score group {}-{} does not pair every player exactly once",
                    score.0, score.1
                )));
            }
            debug!(
                wins = score.0,
                losses = score.1,
                players = group.len(),
                "score group drawn"
            );
            games.extend(into_duels(pairing));
        }
        Ok(games)
    }

    fn update(&mut self, played: &[Vec<Duel>]) -> Result<bool, CompetitionError> {
        let last = played
            .last()
            .ok_or_else(|| CompetitionError::Pairing("no round to apply".to_string()))?;
        // every game must be decided before any record moves
        let outcomes = last
            .iter()
            .map(|game| match (game.winner(), game.loser()) {
                (Some(winner), Some(loser)) => Ok((winner.clone(), loser.clone())),
                _ => Err(CompetitionError::Undecided(game.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (winner, loser) in outcomes {
            self.advance(winner, true);
            self.advance(loser, false);
        }
        let seed_order = &self.seed_order;
        for bucket in self.buckets.values_mut() {
            bucket.sort_by_key(|p| seed_order.get(p).copied().unwrap_or(usize::MAX));
        }
        self.current_round += 1;
        Ok(self.current_round >= SWISS_ROUNDS)
    }

    fn standing(
        &self,
        _seeding: &Standing<Player>,
        _played: &[Vec<Duel>],
    ) -> Result<BTreeMap<Player, usize>, CompetitionError> {
        let mut finals: Vec<Score> = (0..SWISS_MAX_LOSSES)
            .map(|losses| (SWISS_MAX_WINS, losses))
            .collect();
        finals.extend((0..SWISS_MAX_WINS).rev().map(|wins| (wins, SWISS_MAX_LOSSES)));

        let mut placements = BTreeMap::new();
        let mut placed = 0;
        for score in finals {
            let group = self.bucket(score);
            for player in group {
                placements.insert(player.clone(), placed + 1);
            }
            placed += group.len();
        }
        Ok(placements)
    }
}

#[cfg(test)]
#[path = "swiss_tests.rs"]
mod swiss_tests;
