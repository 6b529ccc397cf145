//! Game primitives for tournament simulation
//!
//! This crate provides:
//! - [`Player`]: named participants with a hidden skill level and a record
//!   of their achievements
//! - [`Duel`]: a one-versus-one game whose result is set exactly once
//! - [`Solver`]: the capability that resolves a duel, with a deterministic
//!   ([`BetterWin`]) and a probabilistic ([`BradleyTerry`]) implementation

mod duel;
mod error;
mod player;
mod solver;

pub use duel::*;
pub use error::*;
pub use player::*;
pub use solver::*;
