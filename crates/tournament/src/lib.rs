//! Tournament simulation
//!
//! This crate provides:
//! - A shared competition lifecycle (registration, seeding, rounds, trophies)
//! - Single and double elimination brackets, Swiss, snake and round-robin formats
//! - Pairing primitives used by those formats
//! - Elo ratings that can seed later competitions
//! - JSON results and text reports
//!
//! # Usage
//!
//! ```bash
//! # Simulate a 16-player Swiss bracket with probabilistic games
//! cargo run -p tournament -- run --format swiss --solver bradley-terry --seed 7
//!
//! # Re-print a saved results file
//! cargo run -p tournament -- report results.json
//! ```

mod competition;
mod config;
mod elo;
mod error;
mod knockout;
pub mod matching;
mod results;
mod round_robin;
mod seeding;
mod snake;
mod swiss;

pub use competition::*;
pub use config::*;
pub use elo::*;
pub use error::*;
pub use knockout::*;
pub use results::*;
pub use round_robin::RoundRobin;
pub use seeding::*;
pub use snake::*;
pub use swiss::*;
