//! Error types for flightbook.
//!
//! This module defines all error types used throughout the flightbook crate.
//! Domain errors (missing flights, taken seats, bad seat counts) are reported
//! to the operator and the session carries on; the remaining variants end it.

use thiserror::Error;

/// The main error type for flightbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Registry Errors ===
    /// No flight with the given number is registered.
    #[error("flight {number} not found")]
    FlightNotFound {
        /// The flight number that was looked up.
        number: String,
    },

    /// No passenger with the given passport number is registered.
    #[error("passenger with passport {passport} not found")]
    PassengerNotFound {
        /// The passport number that was looked up.
        passport: String,
    },

    /// The flight is fully booked.
    #[error("no seats available on flight {number}")]
    NoSeatsAvailable {
        /// The flight number.
        number: String,
    },

    /// The requested number of seats is zero or exceeds availability.
    #[error("invalid number of seats: requested {requested}, available {available}")]
    InvalidSeatCount {
        /// How many seats were requested.
        requested: i64,
        /// How many seats the flight has left.
        available: usize,
    },

    /// The seat is already held on this flight.
    #[error("seat {seat} is not available on flight {number}")]
    SeatUnavailable {
        /// The flight number.
        number: String,
        /// The seat label.
        seat: String,
    },

    /// The seat label does not satisfy the configured label policy.
    #[error("seat label '{seat}' does not match pattern {pattern}")]
    SeatLabelRejected {
        /// The seat label.
        seat: String,
        /// The pattern it was checked against.
        pattern: String,
    },

    /// The operator gave up too many invalid answers at a retrying prompt.
    #[error("too many invalid attempts at '{prompt}' ({attempts})")]
    TooManyAttempts {
        /// The prompt that was being retried.
        prompt: String,
        /// Number of rejected attempts.
        attempts: u32,
    },

    // === Input Errors ===
    /// The input source ended while a prompt was waiting for an answer.
    #[error("input closed")]
    InputClosed,

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Console or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a flight-not-found error.
    #[must_use]
    pub fn flight_not_found(number: impl Into<String>) -> Self {
        Self::FlightNotFound {
            number: number.into(),
        }
    }

    /// Create a passenger-not-found error.
    #[must_use]
    pub fn passenger_not_found(passport: impl Into<String>) -> Self {
        Self::PassengerNotFound {
            passport: passport.into(),
        }
    }

    /// Create a seat-unavailable error.
    #[must_use]
    pub fn seat_unavailable(number: impl Into<String>, seat: impl Into<String>) -> Self {
        Self::SeatUnavailable {
            number: number.into(),
            seat: seat.into(),
        }
    }

    /// Check if this error is a booking condition the operator can recover from.
    ///
    /// These are reported and the session returns to the menu.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FlightNotFound { .. }
                | Self::PassengerNotFound { .. }
                | Self::NoSeatsAvailable { .. }
                | Self::InvalidSeatCount { .. }
                | Self::SeatUnavailable { .. }
                | Self::SeatLabelRejected { .. }
                | Self::TooManyAttempts { .. }
        )
    }

    /// Check if this error means the input source has ended.
    #[must_use]
    pub fn is_input_closed(&self) -> bool {
        matches!(self, Self::InputClosed)
    }
}
