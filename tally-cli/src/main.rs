use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tally_core::LedgerError;
use tally_finance::category_rules::rules;
use tally_finance::{LedgerStore, Summary, explain, format_amount};
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod state;

#[derive(Parser, Debug)]
#[command(
    name = "tally",
    version,
    about = "Personal expense ledger with keyword categories"
)]
struct Cli {
    /// Ledger CSV to use instead of the configured one
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log a new expense; category and kind are derived from the description
    Add {
        description: String,

        /// Whole amount, no decimals
        #[arg(allow_negative_numbers = true)]
        amount: i64,

        /// Purchase date, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Category distribution, expense table, and totals
    Stats {
        /// Print the summary as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Threshold-based budgeting advice
    Tips,

    /// Show how a description would be categorized, without saving it
    Classify { description: String },

    /// List the keyword rules in priority order
    Rules,

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Add {
            description,
            amount,
            date,
        } => {
            let store = open_store(cli.ledger)?;
            let ledger = store.load().context("loading ledger")?;
            let date = date.unwrap_or_else(|| Local::now().date_naive());

            let ledger = match store.record(&ledger, date, &description, amount) {
                Ok(l) => l,
                Err(e @ LedgerError::InvalidRecord(_)) => bail!("{e}"),
                Err(e) => return Err(e).context("saving expense"),
            };
            let saved = ledger.records().last().context("ledger empty after save")?;
            println!(
                "Saved {} in {} ({}).",
                format_amount(saved.amount),
                saved.category,
                saved.kind
            );
        }

        Command::Stats { json } => {
            let store = open_store(cli.ledger)?;
            let ledger = store.load().context("loading ledger")?;
            if json {
                let summary = Summary::from_ledger(&ledger);
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::render_stats(&ledger));
            }
        }

        Command::Tips => {
            let cfg = config::load_config()?;
            let store = open_store_with(&cfg, cli.ledger)?;
            let ledger = store.load().context("loading ledger")?;
            print!("{}", render::render_tips(&ledger, &cfg.advisor));
        }

        Command::Classify { description } => {
            let e = explain(&description);
            println!(
                "{} / {}",
                e.classification.category, e.classification.kind
            );
            match e.keyword {
                Some(k) => println!("matched keyword: \"{}\"", k),
                None => println!("no keyword matched (default bucket)"),
            }
        }

        Command::Rules => {
            for (i, rule) in rules().iter().enumerate() {
                println!("{}. {} / {}", i + 1, rule.category, rule.kind);
                println!("   {}", rule.keywords.join(", "));
            }
            println!("*. Miscellaneous / General (no match)");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("Config file: {}", config::config_path()?.display());
                println!("Ledger:      {}", cfg.ledger_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg.advisor).context("serialize config")?);
            }
        },
    }

    Ok(())
}

/// Log to stderr; RUST_LOG overrides the default of warnings only.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(ledger: Option<PathBuf>) -> Result<LedgerStore<tally_finance::CsvFileStore>> {
    let cfg = config::load_config()?;
    open_store_with(&cfg, ledger)
}

fn open_store_with(
    cfg: &config::Config,
    ledger: Option<PathBuf>,
) -> Result<LedgerStore<tally_finance::CsvFileStore>> {
    let path = match ledger {
        Some(p) => p,
        None => cfg.ledger_path()?,
    };
    tracing::debug!(path = %path.display(), "using ledger");
    Ok(LedgerStore::open(path))
}
