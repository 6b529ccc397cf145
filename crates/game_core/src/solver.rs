//! Match solvers: decide the score of a live duel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::duel::{Duel, DRAW, LOSE, WIN};
use crate::error::MatchError;

/// Base of the logistic win probability
pub const LOGSOLVER_BASE: f64 = 10.0;

/// Level difference that multiplies the odds by [`LOGSOLVER_BASE`]
pub const LOGSOLVER_LC: f64 = 400.0;

/// Trait that all match solvers implement.
///
/// A solver reads the duel's players and records a final score on it.
/// Solving an already resolved duel is an error.
pub trait Solver {
    fn solve(&mut self, duel: &mut Duel) -> Result<(), MatchError>;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&mut self, duel: &mut Duel) -> Result<(), MatchError> {
        (**self).solve(duel)
    }
}

/// Deterministic solver: the higher level always wins.
///
/// Equal levels give a draw when `with_draw` is set, otherwise player 1 wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct BetterWin {
    pub with_draw: bool,
}

impl BetterWin {
    pub fn new() -> Self {
        Self { with_draw: false }
    }

    pub fn with_draw() -> Self {
        Self { with_draw: true }
    }
}

impl Solver for BetterWin {
    fn solve(&mut self, duel: &mut Duel) -> Result<(), MatchError> {
        let level1 = duel.player1().level();
        let level2 = duel.player2().level();
        let score = if level1 > level2 {
            WIN
        } else if level1 < level2 {
            LOSE
        } else if self.with_draw {
            DRAW
        } else {
            WIN
        };
        duel.set_result(&score)?;
        trace!(%duel, "duel solved");
        Ok(())
    }
}

/// Probabilistic solver with a logistic (Bradley-Terry) win probability.
///
/// Player 1 wins with probability `1 / (1 + base^((l2 - l1) / scale))`.
/// Games never end in a draw.
#[derive(Debug, Clone)]
pub struct BradleyTerry<R = StdRng> {
    rng: R,
    base: f64,
    scale: f64,
}

impl BradleyTerry<StdRng> {
    /// Reproducible solver
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl<R: Rng> BradleyTerry<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            base: LOGSOLVER_BASE,
            scale: LOGSOLVER_LC,
        }
    }

    pub fn with_curve(mut self, base: f64, scale: f64) -> Self {
        self.base = base;
        self.scale = scale;
        self
    }

    /// Probability that a player of `level1` beats one of `level2`
    pub fn win_probability(&self, level1: f64, level2: f64) -> f64 {
        1.0 / (1.0 + self.base.powf((level2 - level1) / self.scale))
    }
}

impl<R: Rng> Solver for BradleyTerry<R> {
    fn solve(&mut self, duel: &mut Duel) -> Result<(), MatchError> {
        if !duel.is_live() {
            return Err(MatchError::AlreadyPlayed {
                player1: duel.player1().name().to_string(),
                player2: duel.player2().name().to_string(),
            });
        }
        let p = self.win_probability(duel.player1().level(), duel.player2().level());
        let score = if self.rng.gen::<f64>() < p { WIN } else { LOSE };
        duel.set_result(&score)?;
        trace!(%duel, p, "duel solved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod solver_tests;
