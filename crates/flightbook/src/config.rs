//! Configuration management for flightbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults. The
//! flights the registry starts with are part of the configuration.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::SeatPolicy;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "flightbook";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "FLIGHTBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTBOOK_`, `__` between levels)
/// 2. TOML config file at `~/.config/flightbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Flights loaded at startup.
    pub seed: SeedConfig,
    /// Booking workflow configuration.
    pub booking: BookingConfig,
}

/// Seed data for the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Flights to register, in order.
    pub flights: Vec<FlightSeed>,
}

/// One seeded flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSeed {
    /// Flight number.
    pub number: String,
    /// Departure city.
    pub origin: String,
    /// Arrival city.
    pub destination: String,
    /// Departure time.
    pub departure: String,
    /// Arrival time.
    pub arrival: String,
    /// Seat capacity.
    pub seats: usize,
}

/// Booking workflow configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Regex seat labels must match. Unset means any label is accepted.
    pub seat_label_pattern: Option<String>,
    /// Rejected seat entries allowed per booking.
    /// Set to 0 for unlimited.
    pub max_seat_attempts: u32,
}

impl FlightSeed {
    fn new(
        number: &str,
        origin: &str,
        destination: &str,
        departure: &str,
        arrival: &str,
        seats: usize,
    ) -> Self {
        Self {
            number: number.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure: departure.to_string(),
            arrival: arrival.to_string(),
            seats,
        }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            flights: default_flights(),
        }
    }
}

/// Flights available out of the box.
fn default_flights() -> Vec<FlightSeed> {
    vec![
        FlightSeed::new("BA123", "London", "New York", "08:00", "14:30", 50),
        FlightSeed::new("EK202", "Dubai", "Singapore", "15:45", "23:15", 40),
        FlightSeed::new("AA756", "Chicago", "Los Angeles", "09:30", "12:15", 30),
    ]
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// Sources are merged in order, later ones winning: defaults, the TOML
    /// file (if it exists), then `FLIGHTBOOK_` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for seed in &self.seed.flights {
            if seed.number.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "seed flight number cannot be empty".to_string(),
                });
            }
            if seed.seats == 0 {
                return Err(Error::ConfigValidation {
                    message: format!("flight {} must have at least one seat", seed.number),
                });
            }
        }

        self.seat_policy().map(|_| ())
    }

    /// Build the seat label policy.
    ///
    /// # Errors
    ///
    /// Returns an error if `seat_label_pattern` is not a valid regex.
    pub fn seat_policy(&self) -> Result<SeatPolicy> {
        match &self.booking.seat_label_pattern {
            Some(pattern) => SeatPolicy::with_pattern(pattern),
            None => Ok(SeatPolicy::permissive()),
        }
    }

    /// Rejected seat entries allowed per booking, `None` if unlimited.
    #[must_use]
    pub fn max_seat_attempts(&self) -> Option<u32> {
        match self.booking.max_seat_attempts {
            0 => None,
            n => Some(n),
        }
    }
}
