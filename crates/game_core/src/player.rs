//! Players taking part in simulated competitions.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::PlayerError;

/// Default mean of generated player levels
pub const PLAYER_GAUSSIAN_MU: f64 = 1500.0;

/// Default spread of generated player levels
pub const PLAYER_GAUSSIAN_SIGMA: f64 = 500.0;

/// Outcome of one event for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub event_name: String,
    pub place: usize,
    pub prize: f64,
}

/// Handle to a simulated player.
///
/// Cloning is cheap and every clone refers to the same player. Identity,
/// hashing and ordering use the name only, so names must be unique within a
/// simulation. The level is the hidden ground-truth skill solvers read.
#[derive(Clone)]
pub struct Player {
    inner: Arc<PlayerInner>,
}

struct PlayerInner {
    name: String,
    level: f64,
    achievements: Mutex<Vec<Achievement>>,
}

impl Player {
    pub fn new(name: impl Into<String>, level: f64) -> Self {
        Self {
            inner: Arc::new(PlayerInner {
                name: name.into(),
                level,
                achievements: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn level(&self) -> f64 {
        self.inner.level
    }

    /// Achievements collected so far, oldest first
    pub fn achievements(&self) -> Vec<Achievement> {
        self.ledger().clone()
    }

    /// Total prize money collected
    pub fn earnings(&self) -> f64 {
        self.ledger().iter().map(|a| a.prize).sum()
    }

    /// Whether an achievement for `event_name` was already collected
    pub fn has_event(&self, event_name: &str) -> bool {
        self.ledger()
            .iter()
            .any(|past| past.event_name == event_name)
    }

    /// Record the outcome of an event.
    ///
    /// A player can only collect one achievement per event name.
    pub fn collect(&self, achievement: Achievement) -> Result<(), PlayerError> {
        let mut ledger = self.ledger();
        if ledger
            .iter()
            .any(|past| past.event_name == achievement.event_name)
        {
            return Err(PlayerError::DuplicateEvent {
                player: self.name().to_string(),
                event: achievement.event_name,
            });
        }
        ledger.push(achievement);
        Ok(())
    }

    /// Forget every collected achievement
    pub fn reset(&self) {
        self.ledger().clear();
    }

    fn ledger(&self) -> MutexGuard<'_, Vec<Achievement>> {
        self.inner
            .achievements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl PartialOrd for Player {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Player {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name().cmp(other.name())
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Generate `n` players with gaussian levels.
///
/// Names are zero-padded (`player_001`, ...) so that name order matches
/// creation order.
pub fn generate_players<R: Rng + ?Sized>(
    n: usize,
    mu: f64,
    sigma: f64,
    rng: &mut R,
) -> Result<Vec<Player>, PlayerError> {
    let normal =
        Normal::new(mu, sigma).map_err(|e| PlayerError::InvalidDistribution(e.to_string()))?;
    let width = n.to_string().len().max(3);
    Ok((1..=n)
        .map(|i| Player::new(format!("player_{i:0width$}"), normal.sample(rng)))
        .collect())
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod player_tests;
