use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use horse_core::*;
use horse_protocol::{CREATE_PAYMENT_INTENT_PATH, CheckoutResult, PaymentIntentRequest};

mod simulate;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with a `[[level]]` table replacing the built-in levels
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the level table
    Levels,
    /// Play seeded games with a computer strategy and summarize the results
    Simulate {
        #[arg(short, long, default_value_t = 1)]
        level: Level,
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        /// Seed of the first game, later games count up from it
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = StrategyKind::Warnsdorff)]
        strategy: StrategyKind,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the request body that starts a premium checkout
    Checkout,
    /// Apply a checkout result to the stored progress and print the new record
    Unlock {
        #[arg(short, long)]
        level: Level,
        /// Checkout result as JSON, e.g. `{"status":"completed"}`
        #[arg(short, long)]
        result: String,
        /// Current progress record as JSON
        #[arg(short, long)]
        progress: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyKind {
    Warnsdorff,
    Random,
}

fn load_table(path: Option<&Path>) -> Result<LevelTable> {
    let Some(path) = path else {
        return Ok(LevelTable::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read level table {}", path.display()))?;
    let table = LevelTable::from_toml(&text)
        .with_context(|| format!("Could not load level table {}", path.display()))?;
    log::info!("Loaded {} levels from {}", table.max_level(), path.display());
    Ok(table)
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let table = load_table(args.config.as_deref())?;

    match args.command {
        Command::Levels => {
            println!("{:>5} {:>6} {:>6}  prefill", "level", "moves", "bonus");
            for (level, config) in table.iter() {
                println!(
                    "{:>5} {:>6} {:>6}  {:?}",
                    level, config.moves, config.bonus_interval, config.prefill
                );
            }
        }
        Command::Simulate {
            level,
            games,
            seed,
            strategy,
            json,
        } => {
            let summary = simulate::run(&table, level, games, seed, strategy)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary);
            }
        }
        Command::Checkout => {
            println!("POST {}", CREATE_PAYMENT_INTENT_PATH);
            println!("{}", PaymentIntentRequest::premium_unlock().to_json()?);
        }
        Command::Unlock {
            level,
            result,
            progress,
        } => {
            let result: CheckoutResult =
                serde_json::from_str(&result).context("Could not parse checkout result")?;
            let mut progress: Progress = match progress {
                Some(text) => serde_json::from_str(&text).context("Could not parse progress")?,
                None => Progress::default(),
            };

            match &result {
                CheckoutResult::Completed => progress.unlock(level),
                CheckoutResult::Canceled => log::info!("Payment canceled"),
                CheckoutResult::Failed { message } => log::error!("Payment failed: {}", message),
            }
            println!("{}", serde_json::to_string(&progress)?);
        }
    }

    Ok(())
}
