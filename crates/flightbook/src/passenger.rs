//! Passenger records.

use serde::{Deserialize, Serialize};

/// An identity record keyed by passport number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    name: String,
    passport: String,
    contact: String,
    /// Flight numbers in booking order; the same flight may appear twice.
    booked_flights: Vec<String>,
}

impl Passenger {
    /// Create a passenger with an empty booking history.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        passport: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passport: passport.into(),
            contact: contact.into(),
            booked_flights: Vec::new(),
        }
    }

    /// Full name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Passport number.
    #[must_use]
    pub fn passport(&self) -> &str {
        &self.passport
    }

    /// Contact details, free text.
    #[must_use]
    pub fn contact(&self) -> &str {
        &self.contact
    }

    /// Booked flight numbers, oldest first.
    #[must_use]
    pub fn booked_flights(&self) -> &[String] {
        &self.booked_flights
    }

    /// Record a booking on `flight_number`. No duplicate check.
    pub fn add_flight(&mut self, flight_number: impl Into<String>) {
        self.booked_flights.push(flight_number.into());
    }
}
