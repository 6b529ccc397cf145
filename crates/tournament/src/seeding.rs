//! Seeding: ordering the registered participants before a competition starts.

use std::sync::Arc;

use game_core::Player;
use standing::{Standing, StandingError};

/// Anything that can rank a set of participants.
///
/// The returned standing must contain exactly the given participants.
/// Participants the source has never seen get its default value.
pub trait Seeding {
    fn fit(&self, participants: &[Player]) -> Result<Standing<Player>, StandingError>;
}

impl Seeding for Standing<Player> {
    fn fit(&self, participants: &[Player]) -> Result<Standing<Player>, StandingError> {
        Standing::fit(self, participants)
    }
}

impl<S: Seeding + ?Sized> Seeding for Arc<S> {
    fn fit(&self, participants: &[Player]) -> Result<Standing<Player>, StandingError> {
        (**self).fit(participants)
    }
}

/// Standing that ranks players by their hidden level, strongest first.
pub fn level_standing(players: &[Player]) -> Result<Standing<Player>, StandingError> {
    let levels: Vec<f64> = players.iter().map(Player::level).collect();
    let mut standing = Standing::new();
    standing.add(players.iter().cloned(), &levels)?;
    Ok(standing)
}
