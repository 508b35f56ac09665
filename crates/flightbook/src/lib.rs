//! `flightbook` - A console flight-booking registry
//!
//! This library provides the in-memory registry of flights and passengers,
//! the seat booking workflow, and the interactive console that drives it.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod flight;
pub mod logging;
pub mod passenger;
pub mod registry;
pub mod report;
pub mod ticket;

pub use config::Config;
pub use console::Session;
pub use error::{Error, Result};
pub use flight::Flight;
pub use logging::init_logging;
pub use passenger::Passenger;
pub use registry::{BookingRegistry, BookingRequest, PassengerDetails, SeatPolicy};
pub use ticket::{Ticket, TicketStatus};
