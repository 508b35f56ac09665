//! The booking registry.
//!
//! [`BookingRegistry`] owns every flight and passenger and is the only place
//! where seat bookings are committed. Lookups are first-match over insertion
//! order, so a duplicate flight number is shadowed by the earlier entry.

use std::collections::BTreeSet;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::FlightSeed;
use crate::error::{Error, Result};
use crate::flight::Flight;
use crate::passenger::Passenger;
use crate::ticket::Ticket;

/// Optional tightening of free-form seat labels.
#[derive(Debug, Clone, Default)]
pub struct SeatPolicy {
    label_pattern: Option<Regex>,
}

impl SeatPolicy {
    /// Accept any seat label.
    #[must_use]
    pub fn permissive() -> Self {
        Self::default()
    }

    /// Only accept seat labels matching `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if the pattern is not a valid regex.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| Error::ConfigValidation {
            message: format!("invalid seat label pattern {pattern}: {e}"),
        })?;
        Ok(Self {
            label_pattern: Some(regex),
        })
    }

    /// Check a label against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatLabelRejected`] if a pattern is set and the label
    /// does not match it.
    pub fn check(&self, seat: &str) -> Result<()> {
        match &self.label_pattern {
            Some(regex) if !regex.is_match(seat) => Err(Error::SeatLabelRejected {
                seat: seat.to_string(),
                pattern: regex.as_str().to_string(),
            }),
            _ => Ok(()),
        }
    }
}

/// Passenger details collected by a booking workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassengerDetails {
    /// Full name.
    pub name: String,
    /// Passport number.
    pub passport: String,
    /// Contact details.
    pub contact: String,
}

/// Everything needed to commit a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Flight to book on.
    pub flight_number: String,
    /// Who is travelling.
    pub passenger: PassengerDetails,
    /// Seat labels to book.
    pub seats: BTreeSet<String>,
}

/// One row of a passenger's booking history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookedFlight<'a> {
    /// The booked flight.
    pub flight: &'a Flight,
    /// Every seat the passenger holds on it.
    pub seats: BTreeSet<String>,
}

/// In-memory registry of flights and passengers.
#[derive(Debug, Default)]
pub struct BookingRegistry {
    flights: Vec<Flight>,
    passengers: Vec<Passenger>,
    seat_policy: SeatPolicy,
}

impl BookingRegistry {
    /// Create an empty registry that accepts any seat label.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the given seed flights.
    #[must_use]
    pub fn from_seeds(seeds: &[FlightSeed]) -> Self {
        let mut registry = Self::new();
        for seed in seeds {
            registry.add_flight(
                &seed.number,
                &seed.origin,
                &seed.destination,
                &seed.departure,
                &seed.arrival,
                seed.seats,
            );
        }
        info!("Seeded registry with {} flights", registry.flights.len());
        registry
    }

    /// Replace the seat label policy.
    #[must_use]
    pub fn with_seat_policy(mut self, seat_policy: SeatPolicy) -> Self {
        self.seat_policy = seat_policy;
        self
    }

    /// Register a flight. Duplicate numbers are kept but shadowed.
    pub fn add_flight(
        &mut self,
        number: &str,
        origin: &str,
        destination: &str,
        departure: &str,
        arrival: &str,
        seats: usize,
    ) {
        if self.find_flight(number).is_some() {
            warn!(flight = %number, "Flight number already registered; lookups keep the first");
        }
        self.flights.push(Flight::new(
            number,
            origin,
            destination,
            departure,
            arrival,
            seats,
        ));
        debug!(flight = %number, seats, "Added flight");
    }

    /// All flights, in insertion order.
    #[must_use]
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// All passengers, in registration order.
    #[must_use]
    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    /// First flight with the given number.
    #[must_use]
    pub fn find_flight(&self, number: &str) -> Option<&Flight> {
        self.flights.iter().find(|f| f.number() == number)
    }

    /// First passenger with the given passport number.
    #[must_use]
    pub fn find_passenger(&self, passport: &str) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.passport() == passport)
    }

    /// Resolve a flight that still has seats to sell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FlightNotFound`] or [`Error::NoSeatsAvailable`].
    pub fn bookable_flight(&self, number: &str) -> Result<&Flight> {
        let flight = self
            .find_flight(number)
            .ok_or_else(|| Error::flight_not_found(number))?;
        if flight.available_seats() == 0 {
            return Err(Error::NoSeatsAvailable {
                number: number.to_string(),
            });
        }
        Ok(flight)
    }

    /// Validate a requested seat count against a flight's availability.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeatCount`] if `requested` is not in
    /// `1..=available`, or the errors of [`Self::bookable_flight`].
    pub fn check_seat_count(&self, number: &str, requested: i64) -> Result<usize> {
        let available = self.bookable_flight(number)?.available_seats();
        match usize::try_from(requested) {
            Ok(count) if count > 0 && count <= available => Ok(count),
            _ => Err(Error::InvalidSeatCount {
                requested,
                available,
            }),
        }
    }

    /// Check that `seat` can join a selection on the given flight.
    ///
    /// A seat is selectable when it passes the label policy, no passenger
    /// holds it, and it isn't already in `selected`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeatLabelRejected`], [`Error::SeatUnavailable`] or
    /// [`Error::FlightNotFound`].
    pub fn check_seat(
        &self,
        number: &str,
        seat: &str,
        selected: &BTreeSet<String>,
    ) -> Result<()> {
        self.seat_policy.check(seat)?;
        let flight = self
            .find_flight(number)
            .ok_or_else(|| Error::flight_not_found(number))?;
        if selected.contains(seat) || !flight.is_seat_available(seat) {
            return Err(Error::seat_unavailable(number, seat));
        }
        Ok(())
    }

    /// Commit a booking and issue its ticket.
    ///
    /// Everything is validated before anything changes: on error the registry
    /// is untouched. On success the seats are held under the passport, the
    /// passenger is registered if new, and the flight is appended to their
    /// history.
    ///
    /// # Errors
    ///
    /// Returns any error of [`Self::check_seat_count`] or [`Self::check_seat`].
    pub fn book(&mut self, request: BookingRequest) -> Result<Ticket> {
        let BookingRequest {
            flight_number,
            passenger,
            seats,
        } = request;

        let requested = i64::try_from(seats.len()).unwrap_or(i64::MAX);
        self.check_seat_count(&flight_number, requested)?;
        let no_selection = BTreeSet::new();
        for seat in &seats {
            self.check_seat(&flight_number, seat, &no_selection)?;
        }

        let flight_index = self
            .flights
            .iter()
            .position(|f| f.number() == flight_number)
            .ok_or_else(|| Error::flight_not_found(&flight_number))?;
        let flight = &mut self.flights[flight_index];
        for seat in &seats {
            flight.book_seat(&passenger.passport, seat)?;
        }

        let passenger_index = self.register_passenger(passenger);
        let record = &mut self.passengers[passenger_index];
        record.add_flight(flight_number.as_str());

        let ticket = Ticket::issue(record, &self.flights[flight_index], seats);
        info!(
            flight = %ticket.flight_number,
            passport = %ticket.passport,
            seats = ticket.seats.len(),
            reference = %ticket.reference,
            "Booking confirmed"
        );
        Ok(ticket)
    }

    /// Find the passenger by passport, or register them.
    ///
    /// Details of an existing passenger are never edited.
    fn register_passenger(&mut self, details: PassengerDetails) -> usize {
        if let Some(index) = self
            .passengers
            .iter()
            .position(|p| p.passport() == details.passport)
        {
            debug!(passport = %details.passport, "Passenger already registered");
            return index;
        }
        debug!(passport = %details.passport, "Registering passenger");
        self.passengers.push(Passenger::new(
            details.name,
            details.passport,
            details.contact,
        ));
        self.passengers.len() - 1
    }

    /// A passenger and their booking history.
    ///
    /// One row per history entry, duplicates included. Entries whose flight
    /// no longer resolves are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PassengerNotFound`] if the passport is unknown.
    pub fn passenger_bookings(
        &self,
        passport: &str,
    ) -> Result<(&Passenger, Vec<BookedFlight<'_>>)> {
        let passenger = self
            .find_passenger(passport)
            .ok_or_else(|| Error::passenger_not_found(passport))?;
        let rows = passenger
            .booked_flights()
            .iter()
            .filter_map(|number| self.find_flight(number))
            .map(|flight| BookedFlight {
                flight,
                seats: flight.seats_for(passport),
            })
            .collect();
        Ok((passenger, rows))
    }
}
