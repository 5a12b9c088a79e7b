//! Command-line front end: applies the requested changes to a tracker and
//! prints the dashboard.

pub mod render;

use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
};

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::{AnimatedCounter, Clock, ExpenseTracker, FixedClock, SystemClock},
    currency,
    domain::{Amount, ExpenseId, MonthKey},
    errors::{ConfigError, TrackerError, ValidationError},
};

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "expense_glow", version, about = "Track. Visualize. Simplify.")]
pub struct Args {
    /// Configuration file; defaults to the per-user config location.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Month to show (YYYY-MM); defaults to the current month.
    #[arg(long)]
    pub month: Option<MonthKey>,

    /// Monthly limit for this run.
    #[arg(long)]
    pub limit: Option<Amount>,

    /// Store the given --limit in the configuration file.
    #[arg(long, requires = "limit")]
    pub save_limit: bool,

    /// Start from an empty list instead of the demo expenses.
    #[arg(long)]
    pub no_seed: bool,

    /// Add an expense dated today, as NAME=PRICE. Repeatable.
    #[arg(long = "add", value_name = "NAME=PRICE", value_parser = parse_expense)]
    pub add: Vec<(String, Amount)>,

    /// Delete the expense with this id. Repeatable.
    #[arg(long = "delete", value_name = "ID")]
    pub delete: Vec<u64>,

    /// List the preset monthly limits from the configuration and exit.
    #[arg(long)]
    pub presets: bool,

    /// Print the final total without animating it.
    #[arg(long)]
    pub no_animate: bool,
}

fn parse_expense(raw: &str) -> Result<(String, Amount), String> {
    let (name, price) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PRICE, got `{raw}`"))?;
    let price = price
        .parse::<Amount>()
        .map_err(|err| format!("invalid price `{price}`: {err}"))?;
    Ok((name.trim().to_string(), price))
}

pub fn run_cli() -> Result<(), CliError> {
    run(Args::parse())
}

pub fn run(args: Args) -> Result<(), CliError> {
    if !io::stdout().is_terminal() || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    let manager = match &args.config {
        Some(path) => ConfigManager::new(path.clone()),
        None => ConfigManager::from_default_location()?,
    };
    let mut config = manager.load()?;
    if args.presets {
        let current = args.limit.unwrap_or(config.monthly_limit);
        writeln!(io::stdout().lock(), "{}", render::presets(current, &config))?;
        return Ok(());
    }
    if args.no_seed {
        config.seed_mock_data = false;
    }

    let clock: Box<dyn Clock> = match args.today {
        Some(date) => Box::new(FixedClock(date)),
        None => Box::new(SystemClock),
    };
    let mut tracker = ExpenseTracker::from_config(&config, clock)?;

    let mut out = io::stdout().lock();
    if let Some(value) = args.limit {
        let limit = config.limit_policy().validate(value)?;
        tracker.apply_limit(limit);
        writeln!(out, "{}", render::limit_updated(limit.amount(), &config))?;
        if args.save_limit {
            config.monthly_limit = value;
            manager.save(&config)?;
        }
    }
    if let Some(month) = args.month {
        tracker.select_month(month);
    }

    for (name, price) in &args.add {
        let record = tracker.add_record(name, *price)?;
        writeln!(
            out,
            "Added {} - {} ({})",
            record.name(),
            currency::format_amount(record.price(), &config.currency_symbol),
            record.id()
        )?;
    }
    for raw in &args.delete {
        let id = ExpenseId::new(*raw);
        if tracker.delete_record(id) {
            writeln!(out, "Deleted {id}")?;
        } else {
            writeln!(out, "No expense {id}")?;
        }
    }

    write!(out, "{}", render::dashboard(&tracker, &config))?;
    animate_total(&mut out, &tracker, &config, !args.no_animate)?;
    write!(out, "{}", render::details(&tracker, &config))?;
    write!(out, "{}", render::alerts(&tracker.drain_alerts(), &config))?;
    out.flush()?;
    Ok(())
}

fn animate_total(
    out: &mut impl Write,
    tracker: &ExpenseTracker,
    config: &Config,
    animate: bool,
) -> Result<(), CliError> {
    let total = tracker.last_refresh().total;
    if !animate {
        writeln!(out, "{}", render::total_line(total, config))?;
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(async {
        let mut counter = AnimatedCounter::new(Amount::ZERO);
        let mut updates = counter.observe_total(total).await;
        loop {
            let shown = *updates.borrow_and_update();
            write!(out, "\r{}", render::total_line(shown, config))?;
            out.flush()?;
            if shown == total || updates.changed().await.is_err() {
                break;
            }
        }
        writeln!(out)?;
        Ok::<(), CliError>(())
    })
}
