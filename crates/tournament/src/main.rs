//! Tournament CLI
//!
//! Simulate a competition between generated players, print its standings
//! and the resulting Elo leaderboard, and inspect saved results.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_core::{generate_players, BetterWin, BradleyTerry, Duel, Player, Solver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use standing::Standing;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tournament::{
    level_standing, Competition, DoubleEliminationBracket, EloRanking, Format, FormatKind,
    Overrides, RoundRobin, SimulationConfig, SingleEliminationBracket, Snake, SolverKind,
    SwissBracket, TournamentResults,
};

/// Tournament simulator
#[derive(Parser, Debug)]
#[command(name = "tournament", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one competition
    Run {
        /// Path to TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print the report of a saved results file
    Report {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Run { config, overrides } => run(config, &overrides),
        Command::Report { path } => {
            let results = TournamentResults::load(&path)
                .with_context(|| format!("Failed to load results: {:?}", path))?;
            results.print_report();
            Ok(())
        }
    }
}

fn run(config_path: Option<PathBuf>, overrides: &Overrides) -> Result<()> {
    let mut config = match &config_path {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => SimulationConfig::default(),
    };
    config.apply_overrides(overrides);
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let players = generate_players(config.players, config.level_mu, config.level_sigma, &mut rng)?;
    let seeding = level_standing(&players)?;
    info!(
        players = players.len(),
        format = ?config.format,
        seed = config.seed,
        "simulation configured"
    );

    let (results, games) = match config.format {
        FormatKind::SingleElimination => {
            simulate(&config, &players, seeding, SingleEliminationBracket::default())?
        }
        FormatKind::DoubleElimination => {
            simulate(&config, &players, seeding, DoubleEliminationBracket::default())?
        }
        FormatKind::Snake => simulate(&config, &players, seeding, Snake::default())?,
        FormatKind::Swiss => simulate(&config, &players, seeding, SwissBracket::new())?,
        FormatKind::RoundRobin => simulate(&config, &players, seeding, RoundRobin::default())?,
    };
    results.print_report();

    let mut ranking = EloRanking::new();
    ranking.register(&players)?;
    ranking.update(&games)?;
    ranking.print_leaderboard();

    if let Some(path) = &config.output {
        results
            .save(path)
            .with_context(|| format!("Failed to save results: {:?}", path))?;
        info!(path = %path.display(), "results saved");
    }
    Ok(())
}

fn solver(config: &SimulationConfig) -> Box<dyn Solver> {
    match config.solver {
        SolverKind::BetterWin if config.with_draw => Box::new(BetterWin::with_draw()),
        SolverKind::BetterWin => Box::new(BetterWin::new()),
        SolverKind::BradleyTerry => Box::new(BradleyTerry::seeded(config.seed)),
    }
}

fn simulate<F: Format>(
    config: &SimulationConfig,
    players: &[Player],
    seeding: Standing<Player>,
    format: F,
) -> Result<(TournamentResults, Vec<Duel>)> {
    let mut competition = Competition::new(config.name.clone(), seeding, solver(config), format)
        .with_cashprize(config.prizes()?);
    competition.registration(players.iter().cloned())?;
    competition.run()?;

    let games = competition.games_flat().into_iter().cloned().collect();
    Ok((TournamentResults::from_competition(&competition), games))
}
