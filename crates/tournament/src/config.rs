//! Simulation configuration loaded from TOML, with command-line overrides.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use game_core::{PLAYER_GAUSSIAN_MU, PLAYER_GAUSSIAN_SIGMA};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FormatKind {
    SingleElimination,
    DoubleElimination,
    Snake,
    Swiss,
    RoundRobin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Higher level always wins
    BetterWin,
    /// Logistic win probability on the level difference
    BradleyTerry,
}

/// Overrides applied on top of the config file
#[derive(Args, Debug, Clone, Default)]
pub struct Overrides {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<FormatKind>,

    #[arg(long)]
    pub players: Option<usize>,

    #[arg(long, value_enum)]
    pub solver: Option<SolverKind>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the results as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_format")]
    pub format: FormatKind,
    #[serde(default = "default_players")]
    pub players: usize,

    // Player generation
    #[serde(default = "default_level_mu")]
    pub level_mu: f64,
    #[serde(default = "default_level_sigma")]
    pub level_sigma: f64,

    // Game resolution
    #[serde(default = "default_solver")]
    pub solver: SolverKind,
    #[serde(default)]
    pub with_draw: bool,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Prize per placement, keyed by placement ("1", "2", ...)
    #[serde(default = "default_cashprize")]
    pub cashprize: BTreeMap<String, f64>,

    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_name() -> String {
    "Simulated Open".to_string()
}
fn default_format() -> FormatKind {
    FormatKind::SingleElimination
}
fn default_players() -> usize {
    16
}
fn default_level_mu() -> f64 {
    PLAYER_GAUSSIAN_MU
}
fn default_level_sigma() -> f64 {
    PLAYER_GAUSSIAN_SIGMA
}
fn default_solver() -> SolverKind {
    SolverKind::BetterWin
}
fn default_seed() -> u64 {
    42
}
fn default_cashprize() -> BTreeMap<String, f64> {
    BTreeMap::from([
        ("1".to_string(), 1000.0),
        ("2".to_string(), 500.0),
        ("3".to_string(), 250.0),
    ])
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            format: default_format(),
            players: default_players(),
            level_mu: default_level_mu(),
            level_sigma: default_level_sigma(),
            solver: default_solver(),
            with_draw: false,
            seed: default_seed(),
            cashprize: default_cashprize(),
            output: None,
        }
    }
}

impl SimulationConfig {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply all CLI overrides to this config
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(name) = &overrides.name {
            self.name = name.clone();
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(players) = overrides.players {
            self.players = players;
        }
        if let Some(solver) = overrides.solver {
            self.solver = solver;
        }
        if let Some(seed) = overrides.seed {
            self.seed = seed;
        }
        if let Some(output) = &overrides.output {
            self.output = Some(output.clone());
        }
    }

    /// Prize table keyed by placement
    pub fn prizes(&self) -> Result<BTreeMap<usize, f64>, ConfigError> {
        self.cashprize
            .iter()
            .map(|(place, prize)| match place.parse::<usize>() {
                Ok(p) if p > 0 => Ok((p, *prize)),
                _ => Err(ConfigError::Invalid(format!(
                    "cashprize key `{place}` is not a placement"
                ))),
            })
            .collect()
    }

    /// Validate configuration parameters.
    ///
    /// Participant counts a format cannot host are rejected when the
    /// competition starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::Invalid(format!(
                "players must be at least 2, got {}",
                self.players
            )));
        }
        if !self.level_sigma.is_finite() || self.level_sigma < 0.0 {
            return Err(ConfigError::Invalid("level_sigma must be >= 0".to_string()));
        }
        if !self.level_mu.is_finite() {
            return Err(ConfigError::Invalid("level_mu must be finite".to_string()));
        }
        if self.cashprize.values().any(|prize| !prize.is_finite()) {
            return Err(ConfigError::Invalid("prizes must be finite".to_string()));
        }
        self.prizes()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
