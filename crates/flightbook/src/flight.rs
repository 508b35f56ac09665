//! Flight records and their seat inventory.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A scheduled route instance with a fixed seat capacity.
///
/// Seats are tracked per passport number. Seat labels are free-form strings;
/// the conceptual seat range `1..=total_seats` is only used when listing the
/// seats that are still open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    number: String,
    origin: String,
    destination: String,
    departure: String,
    arrival: String,
    total_seats: usize,
    /// Passport number -> seats held on this flight.
    bookings: BTreeMap<String, BTreeSet<String>>,
}

impl Flight {
    /// Create a flight with no bookings.
    #[must_use]
    pub fn new(
        number: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        departure: impl Into<String>,
        arrival: impl Into<String>,
        total_seats: usize,
    ) -> Self {
        Self {
            number: number.into(),
            origin: origin.into(),
            destination: destination.into(),
            departure: departure.into(),
            arrival: arrival.into(),
            total_seats,
            bookings: BTreeMap::new(),
        }
    }

    /// The flight number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Departure airport or city.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Arrival airport or city.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Departure time, as given.
    #[must_use]
    pub fn departure(&self) -> &str {
        &self.departure
    }

    /// Arrival time, as given.
    #[must_use]
    pub fn arrival(&self) -> &str {
        &self.arrival
    }

    /// Seat capacity.
    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.total_seats
    }

    /// Number of seats held by all passengers.
    #[must_use]
    pub fn booked_count(&self) -> usize {
        self.bookings.values().map(BTreeSet::len).sum()
    }

    /// Seats left to sell.
    #[must_use]
    pub fn available_seats(&self) -> usize {
        self.total_seats.saturating_sub(self.booked_count())
    }

    /// Returns `true` if no passenger holds `seat` on this flight.
    #[must_use]
    pub fn is_seat_available(&self, seat: &str) -> bool {
        !self.bookings.values().any(|seats| seats.contains(seat))
    }

    /// Open seat labels in `1..=total_seats`, ascending.
    ///
    /// The iterator is lazy and borrows the flight; call again to restart.
    pub fn available_seat_labels(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.total_seats)
            .map(|n| n.to_string())
            .filter(|seat| self.is_seat_available(seat))
    }

    /// Book `seat` for `passport`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatUnavailable`] if any passenger, including this
    /// one, already holds the seat. Nothing is changed in that case.
    pub fn book_seat(&mut self, passport: &str, seat: &str) -> Result<()> {
        if !self.is_seat_available(seat) {
            return Err(Error::seat_unavailable(&self.number, seat));
        }
        self.bookings
            .entry(passport.to_string())
            .or_default()
            .insert(seat.to_string());
        Ok(())
    }

    /// Seats held by `passport` on this flight, empty if none.
    #[must_use]
    pub fn seats_for(&self, passport: &str) -> BTreeSet<String> {
        self.bookings.get(passport).cloned().unwrap_or_default()
    }
}
