//! Text reports: the flight table, flight details and passenger information.
//!
//! Every function writes to any [`std::io::Write`], so the console session,
//! the one-shot CLI commands and the tests share the same layout.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::flight::Flight;
use crate::passenger::Passenger;
use crate::registry::BookedFlight;

/// Width of the flight table rule.
const FLIGHT_TABLE_WIDTH: usize = 90;

/// Width of the passenger bookings rule.
const BOOKINGS_TABLE_WIDTH: usize = 70;

/// Flight row as exported by `flights --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightSummary<'a> {
    /// Flight number.
    pub number: &'a str,
    /// Departure city.
    pub origin: &'a str,
    /// Arrival city.
    pub destination: &'a str,
    /// Departure time.
    pub departure: &'a str,
    /// Arrival time.
    pub arrival: &'a str,
    /// Seat capacity.
    pub total_seats: usize,
    /// Seats held.
    pub booked: usize,
    /// Seats left.
    pub available: usize,
}

impl<'a> From<&'a Flight> for FlightSummary<'a> {
    fn from(flight: &'a Flight) -> Self {
        Self {
            number: flight.number(),
            origin: flight.origin(),
            destination: flight.destination(),
            departure: flight.departure(),
            arrival: flight.arrival(),
            total_seats: flight.total_seats(),
            booked: flight.booked_count(),
            available: flight.available_seats(),
        }
    }
}

/// Write every flight with its booked and available counts.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_flight_table<W: Write>(out: &mut W, flights: &[Flight]) -> Result<()> {
    if flights.is_empty() {
        writeln!(out, "No flights available!")?;
        return Ok(());
    }

    let rule = "-".repeat(FLIGHT_TABLE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "| {:<12}| {:<15}| {:<15}| {:<12}| {:<12}| {:<8}| {:<8} |",
        "Flight No.",
        "Departure",
        "Destination",
        "Depart Time",
        "Arrival Time",
        "Booked",
        "Available"
    )?;
    writeln!(out, "{rule}")?;
    for flight in flights {
        writeln!(
            out,
            "| {:<12}| {:<15}| {:<15}| {:<12}| {:<12}| {:<8}| {:<8} |",
            flight.number(),
            flight.origin(),
            flight.destination(),
            flight.departure(),
            flight.arrival(),
            flight.booked_count(),
            flight.available_seats()
        )?;
    }
    writeln!(out, "{rule}")?;
    Ok(())
}

/// Write every flight as a pretty-printed JSON array of [`FlightSummary`].
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_flight_json<W: Write>(out: &mut W, flights: &[Flight]) -> Result<()> {
    let summaries: Vec<FlightSummary<'_>> = flights.iter().map(FlightSummary::from).collect();
    serde_json::to_writer_pretty(&mut *out, &summaries)?;
    writeln!(out)?;
    Ok(())
}

/// Write the full details of one flight.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_flight_detail<W: Write>(out: &mut W, flight: &Flight) -> Result<()> {
    writeln!(out, "Flight Details:")?;
    writeln!(out, "Flight Number: {}", flight.number())?;
    writeln!(
        out,
        "Route: {} to {}",
        flight.origin(),
        flight.destination()
    )?;
    writeln!(out, "Time: {} - {}", flight.departure(), flight.arrival())?;
    writeln!(
        out,
        "Seats Available: {}/{}",
        flight.available_seats(),
        flight.total_seats()
    )?;
    Ok(())
}

/// Write the open seat labels of a flight on one line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_available_seats<W: Write>(out: &mut W, flight: &Flight) -> Result<()> {
    write!(out, "Available Seats:")?;
    for seat in flight.available_seat_labels() {
        write!(out, " {seat}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// Write a passenger's identity and booking history.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_passenger_info<W: Write>(
    out: &mut W,
    passenger: &Passenger,
    bookings: &[BookedFlight<'_>],
) -> Result<()> {
    writeln!(out, "========== PASSENGER INFORMATION ==========")?;
    writeln!(out, "NAME: {}", passenger.name())?;
    writeln!(out, "PASSPORT: {}", passenger.passport())?;
    writeln!(out, "CONTACT: {}", passenger.contact())?;

    if passenger.booked_flights().is_empty() {
        writeln!(out)?;
        writeln!(out, "No flights booked.")?;
        return Ok(());
    }

    let rule = "-".repeat(BOOKINGS_TABLE_WIDTH);
    writeln!(out)?;
    writeln!(out, "BOOKED FLIGHTS:")?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "| {:<12}| {:<15}| {:<15}| {:<10}|",
        "Flight No.", "Departure", "Destination", "Seats"
    )?;
    writeln!(out, "{rule}")?;
    for booking in bookings {
        let seats = booking
            .seats
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            out,
            "| {:<12}| {:<15}| {:<15}| {:<10}|",
            booking.flight.number(),
            booking.flight.origin(),
            booking.flight.destination(),
            seats
        )?;
    }
    writeln!(out, "{rule}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn sample_flight() -> Flight {
        Flight::new("BA123", "London", "New York", "08:00", "14:30", 50)
    }

    #[test]
    fn test_flight_table_empty() {
        let text = render(|out| write_flight_table(out, &[]));
        assert_eq!(text, "No flights available!\n");
    }

    #[test]
    fn test_flight_table_rows() {
        let mut flight = sample_flight();
        flight.book_seat("P1", "12").unwrap();
        let text = render(|out| write_flight_table(out, &[flight]));

        assert!(text.contains("Flight No."));
        assert!(text.contains("Available"));
        let row = text.lines().find(|l| l.contains("BA123")).unwrap();
        assert!(row.contains("London"));
        assert!(row.contains("New York"));
        assert!(row.contains("| 1       "));
        assert!(row.contains("| 49      "));
        assert_eq!(text.lines().filter(|l| l.starts_with("---")).count(), 3);
    }

    #[test]
    fn test_flight_detail() {
        let text = render(|out| write_flight_detail(out, &sample_flight()));
        assert!(text.contains("Flight Number: BA123"));
        assert!(text.contains("Route: London to New York"));
        assert!(text.contains("Time: 08:00 - 14:30"));
        assert!(text.contains("Seats Available: 50/50"));
    }

    #[test]
    fn test_available_seats_line() {
        let mut flight = Flight::new("T1", "A", "B", "1", "2", 4);
        flight.book_seat("P1", "3").unwrap();
        let text = render(|out| write_available_seats(out, &flight));
        assert_eq!(text, "Available Seats: 1 2 4\n");
    }

    #[test]
    fn test_passenger_without_bookings() {
        let passenger = Passenger::new("Ada", "P1", "ada@example.com");
        let text = render(|out| write_passenger_info(out, &passenger, &[]));
        assert!(text.contains("NAME: Ada"));
        assert!(text.contains("No flights booked."));
        assert!(!text.contains("BOOKED FLIGHTS"));
    }

    #[test]
    fn test_passenger_with_bookings() {
        let mut passenger = Passenger::new("Ada", "P1", "ada@example.com");
        passenger.add_flight("BA123");
        let flight = sample_flight();
        let bookings = [BookedFlight {
            flight: &flight,
            seats: BTreeSet::from(["12".to_string(), "14".to_string()]),
        }];

        let text = render(|out| write_passenger_info(out, &passenger, &bookings));
        assert!(text.contains("BOOKED FLIGHTS:"));
        let row = text.lines().find(|l| l.starts_with("| BA123")).unwrap();
        assert!(row.contains("12 14"));
    }

    #[test]
    fn test_flight_summary_serialize() {
        let flight = sample_flight();
        let summary = FlightSummary::from(&flight);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"number\":\"BA123\""));
        assert!(json.contains("\"available\":50"));
    }

    #[test]
    fn test_flight_json_array() {
        let text = render(|out| write_flight_json(out, &[sample_flight()]));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["number"], "BA123");
        assert_eq!(rows[0]["total_seats"], 50);
        assert!(text.ends_with("]\n"));
    }
}
