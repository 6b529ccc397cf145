//! Tournament results storage and reporting

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::competition::{Competition, Format};
use crate::error::ResultsError;

/// Complete results of one competition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentResults {
    /// Name of the competition
    pub name: String,
    /// Format label
    pub format: String,
    /// Participants in seed order
    pub participants: Vec<String>,
    /// Games grouped by round
    pub rounds: Vec<Vec<GameRecord>>,
    /// Final placements, best first
    pub placements: Vec<PlacementEntry>,
}

/// A single game in the results file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub player1: String,
    pub player2: String,
    pub score: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementEntry {
    pub place: usize,
    pub player: String,
    pub prize: f64,
}

impl TournamentResults {
    /// Snapshot a competition. Placements are empty until its trophies are
    /// awarded.
    pub fn from_competition<F: Format>(competition: &Competition<F>) -> Self {
        let participants = match competition.seeds() {
            Some(seeds) => seeds.keys(),
            None => competition.participants().iter().cloned().collect(),
        };
        let rounds = competition
            .games()
            .iter()
            .map(|round| {
                round
                    .iter()
                    .map(|game| GameRecord {
                        player1: game.player1().name().to_string(),
                        player2: game.player2().name().to_string(),
                        score: game.score(),
                    })
                    .collect()
            })
            .collect();
        let mut placements: Vec<PlacementEntry> = competition
            .standing()
            .iter()
            .map(|(player, &place)| PlacementEntry {
                place,
                player: player.name().to_string(),
                prize: competition.prize(place),
            })
            .collect();
        placements.sort_by(|a, b| a.place.cmp(&b.place).then_with(|| a.player.cmp(&b.player)));

        Self {
            name: competition.name().to_string(),
            format: competition.format().label().to_string(),
            participants: participants.iter().map(|p| p.name().to_string()).collect(),
            rounds,
            placements,
        }
    }

    pub fn total_games(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ResultsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Tournament: {} ===\n\n", self.name));
        report.push_str(&format!("Format: {}\n", self.format));
        report.push_str(&format!(
            "Participants: {} ({} rounds, {} games)\n\n",
            self.participants.len(),
            self.rounds.len(),
            self.total_games()
        ));

        report.push_str("Standings:\n");
        report.push_str(&format!("{:>5}  {:<20} {:>10}\n", "Place", "Player", "Prize"));
        report.push_str(&"-".repeat(40));
        report.push('\n');
        for entry in &self.placements {
            report.push_str(&format!(
                "{:>5}  {:<20} {:>10.2}\n",
                entry.place, entry.player, entry.prize
            ));
        }

        report.push_str("\nGames:\n");
        for (i, round) in self.rounds.iter().enumerate() {
            report.push_str(&format!("Round {}\n", i + 1));
            for game in round {
                let score = match game.score {
                    Some([s1, s2]) => format!("{s1}-{s2}"),
                    None => "live".to_string(),
                };
                report.push_str(&format!(
                    "  {:<20} vs {:<20} {:>7}\n",
                    game.player1, game.player2, score
                ));
            }
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
