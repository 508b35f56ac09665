//! E-tickets issued by successful bookings.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flight::Flight;
use crate::passenger::Passenger;

/// Length of the booking reference, in hex characters.
const REFERENCE_LEN: usize = 6;

/// Status printed on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// All requested seats are held.
    Confirmed,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "CONFIRMED"),
        }
    }
}

/// Confirmation for the seats booked in one booking workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Short booking reference.
    pub reference: String,
    /// Passenger name.
    pub passenger_name: String,
    /// Passport number.
    pub passport: String,
    /// Passenger contact details.
    pub contact: String,
    /// Flight number.
    pub flight_number: String,
    /// Departure city.
    pub origin: String,
    /// Arrival city.
    pub destination: String,
    /// Departure time.
    pub departure: String,
    /// Arrival time.
    pub arrival: String,
    /// Seats booked by this workflow only.
    pub seats: BTreeSet<String>,
    /// Ticket status.
    pub status: TicketStatus,
    /// When the ticket was issued.
    pub issued_at: DateTime<Utc>,
}

impl Ticket {
    /// Issue a confirmed ticket for `seats` on `flight`.
    #[must_use]
    pub fn issue(passenger: &Passenger, flight: &Flight, seats: BTreeSet<String>) -> Self {
        let issued_at = Utc::now();
        let reference =
            Self::compute_reference(passenger.passport(), flight.number(), &seats, issued_at);
        Self {
            reference,
            passenger_name: passenger.name().to_string(),
            passport: passenger.passport().to_string(),
            contact: passenger.contact().to_string(),
            flight_number: flight.number().to_string(),
            origin: flight.origin().to_string(),
            destination: flight.destination().to_string(),
            departure: flight.departure().to_string(),
            arrival: flight.arrival().to_string(),
            seats,
            status: TicketStatus::Confirmed,
            issued_at,
        }
    }

    /// Derive a booking reference from the booking's contents.
    #[must_use]
    pub fn compute_reference(
        passport: &str,
        flight_number: &str,
        seats: &BTreeSet<String>,
        issued_at: DateTime<Utc>,
    ) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(passport.as_bytes());
        hasher.update(b"\0");
        hasher.update(flight_number.as_bytes());
        for seat in seats {
            hasher.update(b"\0");
            hasher.update(seat.as_bytes());
        }
        hasher.update(b"\0");
        hasher.update(issued_at.to_rfc3339().as_bytes());

        let mut hex = hasher.finalize().to_hex().to_string();
        hex.truncate(REFERENCE_LEN);
        hex.to_ascii_uppercase()
    }

    /// Seats as a space-separated list.
    #[must_use]
    pub fn seat_list(&self) -> String {
        self.seats
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============= E-TICKET ==============")?;
        writeln!(f, "REFERENCE: {}", self.reference)?;
        writeln!(f, "PASSENGER: {}", self.passenger_name)?;
        writeln!(f, "PASSPORT: {}", self.passport)?;
        writeln!(f, "CONTACT: {}", self.contact)?;
        writeln!(
            f,
            "FLIGHT: {} | {} to {}",
            self.flight_number, self.origin, self.destination
        )?;
        writeln!(
            f,
            "DEPARTURE: {} | ARRIVAL: {}",
            self.departure, self.arrival
        )?;
        writeln!(f, "SEATS: {}", self.seat_list())?;
        writeln!(f, "STATUS: {}", self.status)?;
        writeln!(f, "ISSUED: {}", self.issued_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        write!(f, "=====================================")
    }
}
