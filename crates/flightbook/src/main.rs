//! `flightbook` - CLI for the flight-booking registry
//!
//! This binary seeds the registry from configuration and runs the interactive
//! menu, or prints the flight table and configuration for scripting.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use flightbook::cli::{Cli, Command, ConfigCommand, FlightsCommand, ShellCommand};
use flightbook::report;
use flightbook::{init_logging, BookingRegistry, Config, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone();

    // Path and validation must work even when the active file is broken
    match cli.into_command() {
        Command::Config(ConfigCommand::Path) => {
            println!("{}", Config::default_config_path().display());
            Ok(())
        }
        Command::Config(ConfigCommand::Validate { file }) => {
            handle_validate(file.or(config_path));
            Ok(())
        }
        Command::Config(ConfigCommand::Show { json }) => {
            handle_show(&load_config(config_path)?, json)
        }
        Command::Shell(shell_cmd) => handle_shell(&load_config(config_path)?, &shell_cmd),
        Command::Flights(flights_cmd) => {
            handle_flights(&load_config(config_path)?, &flights_cmd)
        }
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(config_path.clone()).with_context(|| {
        let path = config_path.unwrap_or_else(Config::default_config_path);
        format!("loading configuration from {}", path.display())
    })
}

fn build_registry(config: &Config) -> anyhow::Result<BookingRegistry> {
    let registry = BookingRegistry::from_seeds(&config.seed.flights)
        .with_seat_policy(config.seat_policy()?);
    Ok(registry)
}

fn handle_shell(config: &Config, cmd: &ShellCommand) -> anyhow::Result<()> {
    let mut registry = build_registry(config)?;
    let stdout = io::stdout();

    match &cmd.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening input script {}", path.display()))?;
            Session::new(&mut registry, BufReader::new(file), stdout.lock())
                .with_max_seat_attempts(config.max_seat_attempts())
                .run()?;
        }
        None => {
            Session::new(&mut registry, io::stdin().lock(), stdout.lock())
                .with_max_seat_attempts(config.max_seat_attempts())
                .run()?;
        }
    }
    Ok(())
}

fn handle_flights(config: &Config, cmd: &FlightsCommand) -> anyhow::Result<()> {
    let registry = build_registry(config)?;
    let mut out = io::stdout().lock();

    if cmd.json {
        report::write_flight_json(&mut out, registry.flights())?;
    } else {
        report::write_flight_table(&mut out, registry.flights())?;
    }
    Ok(())
}

fn handle_show(config: &Config, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Seed]");
    for seed in &config.seed.flights {
        println!(
            "  {:<8} {} -> {} ({} - {}), {} seats",
            seed.number, seed.origin, seed.destination, seed.departure, seed.arrival, seed.seats
        );
    }
    println!();
    println!("[Booking]");
    println!(
        "  Seat label pattern: {}",
        config
            .booking
            .seat_label_pattern
            .as_deref()
            .unwrap_or("(any)")
    );
    match config.max_seat_attempts() {
        Some(n) => println!("  Max seat attempts:  {n}"),
        None => println!("  Max seat attempts:  unlimited"),
    }
    Ok(())
}

/// Report whether the file at `path` (or the default path) loads cleanly.
fn handle_validate(path: Option<PathBuf>) -> bool {
    let path = path.unwrap_or_else(Config::default_config_path);
    println!("Validating configuration: {}", path.display());
    match Config::load_from(Some(path)) {
        Ok(_) => {
            println!("Configuration is valid.");
            true
        }
        Err(e) => {
            println!("Configuration error: {e}");
            false
        }
    }
}
