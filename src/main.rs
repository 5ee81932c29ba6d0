//! Main entry point for the residency ranker
//!
//! Runs the interactive ranking loop: each new program is compared against
//! every existing one on every dimension, the ranking is printed after
//! each addition, and the scores are saved on exit.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use residency_ranker::config::AppConfig;
use residency_ranker::persistence::{load_global_or_empty, read_store_or_empty, write_store};
use residency_ranker::session::{ComparisonJudge, RankingSession};
use residency_ranker::{ComparisonRequest, Dimension, RankEntry, RankingError, Winner};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Residency Ranker - pairwise Elo ranking of residency programs
#[derive(Parser)]
#[command(
    name = "residency-ranker",
    version,
    about = "Rank residency programs by pairwise comparisons",
    long_about = "Residency Ranker compares each new program against every program already \
                 ranked on prestige, vibes and location, updates per-dimension Elo ratings, \
                 and ranks programs by a weighted sum of those ratings."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Local scores override
    #[arg(long, value_name = "FILE", help = "Override the local scores file")]
    local: Option<PathBuf>,

    /// Global scores override
    #[arg(long, value_name = "FILE", help = "Override the global scores file")]
    global: Option<PathBuf>,

    /// K-factor override
    #[arg(short, long, value_name = "K", help = "Override the Elo k-factor")]
    k_factor: Option<f64>,

    /// Never touch the global scores
    #[arg(long, help = "Do not update or save the global scores")]
    no_global: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the current ranking of the local scores
    Rank,
    /// Compare two existing programs on one dimension
    Compare {
        /// First program
        first: String,
        /// Second program
        second: String,
        /// Dimension (prestige, vibes or location)
        #[arg(short = 'D', long)]
        dimension: Dimension,
        /// Name of the winning program
        #[arg(short, long)]
        winner: String,
    },
    /// Write the local scores to another file
    Export {
        /// Destination file
        output: PathBuf,
    },
    /// Replace the local scores with the contents of a file
    Import {
        /// Source file
        input: PathBuf,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }
    if args.debug {
        config.service.log_level = "debug".to_string();
    }
    if let Some(local) = &args.local {
        config.storage.local_scores_path = local.clone();
    }
    if let Some(global) = &args.global {
        config.storage.global_scores_path = global.clone();
    }
    if let Some(k_factor) = args.k_factor {
        config.rating.k_factor = k_factor;
    }
    if args.no_global {
        config.storage.update_global = false;
    }

    residency_ranker::config::validate_config(&config)?;
    Ok(config)
}

/// Print `message` and read one line, `None` at end of input
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Judge that asks on the terminal for every comparison
struct TerminalJudge;

impl ComparisonJudge for TerminalJudge {
    fn judge(&mut self, request: &ComparisonRequest) -> Option<Winner> {
        println!(
            "Which program has better {}? {} or {}",
            request.dimension, request.first, request.second
        );
        let message = format!(
            "Enter your choice ('{}' or '{}'): ",
            request.first, request.second
        );
        match prompt(&message) {
            Ok(Some(answer)) => Winner::resolve(&request.first, &request.second, &answer),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read comparison answer: {}", e);
                None
            }
        }
    }
}

fn print_rankings(rankings: &[RankEntry]) {
    println!("\nCurrent Residency Program Rankings:");
    for (rank, entry) in rankings.iter().enumerate() {
        println!("{}. {} - {:.2}", rank + 1, entry.name, entry.score);
    }
}

fn build_session(config: &AppConfig) -> Result<RankingSession> {
    let default_rating = config.rating.default_rating;
    let local = read_store_or_empty(&config.storage.local_scores_path, default_rating)
        .context("Failed to load local scores")?;
    let global = load_global_or_empty(&config.storage.global_scores_path, default_rating);
    Ok(RankingSession::from_config(config, local, global)?)
}

fn save_session(config: &AppConfig, session: &RankingSession) -> Result<()> {
    write_store(&config.storage.local_scores_path, session.local())?;
    if session.updates_global() {
        write_store(&config.storage.global_scores_path, session.global())?;
    }
    Ok(())
}

/// Interactive loop, saving whatever was entered even when it stops on an error
fn run_interactive<F, J>(
    config: &AppConfig,
    mut session: RankingSession,
    mut read_line: F,
    judge: &mut J,
) -> Result<()>
where
    F: FnMut(&str) -> Result<Option<String>>,
    J: ComparisonJudge,
{
    let outcome = add_programs(&mut session, &mut read_line, judge);
    if let Err(e) = &outcome {
        error!("Stopped adding programs: {:#}", e);
    }

    save_session(config, &session)?;
    outcome
}

fn add_programs<F, J>(session: &mut RankingSession, read_line: &mut F, judge: &mut J) -> Result<()>
where
    F: FnMut(&str) -> Result<Option<String>>,
    J: ComparisonJudge,
{
    if session.updates_global() {
        let answer = read_line("Would you like to update the current global scores (yes or no)?: ")?;
        let enabled = answer.is_some_and(|a| a.to_lowercase() == "yes");
        session.set_global_updates(enabled);
    }

    loop {
        let Some(name) =
            read_line("Enter the name of a new program (or 'done' if finished adding programs): ")?
        else {
            break;
        };
        if name.to_lowercase() == "done" {
            break;
        }

        match session.add_item(&name, judge) {
            Ok(report) => {
                println!("{} added successfully!", report.name);
                print_rankings(&session.rankings()?);
            }
            Err(e @ (RankingError::InvalidInput { .. } | RankingError::DuplicateItem { .. })) => {
                println!("{}", e);
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn run_command(config: &AppConfig, mut session: RankingSession, command: Command) -> Result<()> {
    match command {
        Command::Rank => print_rankings(&session.rankings()?),
        Command::Compare {
            first,
            second,
            dimension,
            winner,
        } => match session.compare_by_name(&first, &second, dimension, &winner)? {
            Some(update) => {
                println!(
                    "{}: {} {:.2} -> {:.2}, {} {:.2} -> {:.2}",
                    dimension,
                    update.first.name,
                    update.first.old_rating,
                    update.first.new_rating,
                    update.second.name,
                    update.second.old_rating,
                    update.second.new_rating
                );
                save_session(config, &session)?;
            }
            None => println!("'{}' is neither '{}' nor '{}', nothing changed", winner, first, second),
        },
        Command::Export { output } => {
            write_store(&output, session.local())?;
            println!("Exported {} programs to {}", session.local().len(), output.display());
        }
        Command::Import { input } => {
            let payload = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            session.import_local(&payload)?;
            write_store(&config.storage.local_scores_path, session.local())?;
            println!("Imported {} programs from {}", session.local().len(), input.display());
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Local scores: {}, global scores: {}, k-factor: {}",
        config.storage.local_scores_path.display(),
        config.storage.global_scores_path.display(),
        config.rating.k_factor
    );

    let session = build_session(&config)?;

    let result = match args.command.take() {
        Some(command) => run_command(&config, session, command),
        None => run_interactive(&config, session, prompt, &mut TerminalJudge),
    };

    if let Err(e) = &result {
        error!("Residency ranker failed: {:#}", e);
    }
    result
}
