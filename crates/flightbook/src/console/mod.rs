//! Interactive console for flightbook.
//!
//! A [`Session`] shows the menu, reads one command at a time and runs it
//! against a borrowed [`BookingRegistry`]. Booking conditions such as an
//! unknown flight or a bad seat count are reported and the menu comes back;
//! end of input ends the session cleanly.

mod menu;
mod prompt;

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::registry::{BookingRegistry, BookingRequest, PassengerDetails};
use crate::report;

pub use menu::{Menu, MenuChoice};
pub use prompt::Prompter;

/// An interactive session over one input source.
#[derive(Debug)]
pub struct Session<'r, R, W> {
    registry: &'r mut BookingRegistry,
    prompter: Prompter<R, W>,
    max_seat_attempts: Option<u32>,
}

impl<'r, R: BufRead, W: Write> Session<'r, R, W> {
    /// Create a session reading from `input` and writing to `output`.
    pub fn new(registry: &'r mut BookingRegistry, input: R, output: W) -> Self {
        Self {
            registry,
            prompter: Prompter::new(input, output),
            max_seat_attempts: None,
        }
    }

    /// Limit rejected seat entries per booking. `None` means unlimited.
    #[must_use]
    pub fn with_max_seat_attempts(mut self, max_seat_attempts: Option<u32>) -> Self {
        self.max_seat_attempts = max_seat_attempts;
        self
    }

    /// Consume the session, returning the output sink.
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run the menu loop until the operator exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading or writing the console fails.
    pub fn run(&mut self) -> Result<()> {
        info!("Console session started");
        loop {
            writeln!(self.prompter.output())?;
            writeln!(self.prompter.output(), "{}", Menu)?;
            let answer = match self.prompter.ask("Enter your choice: ") {
                Ok(answer) => answer,
                Err(e) if e.is_input_closed() => {
                    writeln!(self.prompter.output())?;
                    info!("Input closed, ending session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            let Some(choice) = MenuChoice::parse(&answer) else {
                debug!(answer = %answer, "Unrecognised menu choice");
                writeln!(self.prompter.output(), "Invalid choice! Please try again.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                writeln!(self.prompter.output(), "Exiting system. Goodbye!")?;
                info!("Console session ended");
                return Ok(());
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(e) if e.is_recoverable() => {
                    debug!(error = %e, "Command ended early");
                    writeln!(self.prompter.output(), "{}", notice(&e))?;
                }
                Err(e) if e.is_input_closed() => {
                    writeln!(self.prompter.output())?;
                    info!("Input closed mid-command, ending session");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Run one menu command.
    ///
    /// # Errors
    ///
    /// Returns the command's error; recoverable ones are reported by
    /// [`Self::run`].
    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::ListFlights => self.list_flights(),
            MenuChoice::SearchFlight => self.search_flight(),
            MenuChoice::BookTicket => self.book_ticket(),
            MenuChoice::PassengerInfo => self.show_passenger_info(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn list_flights(&mut self) -> Result<()> {
        let out = self.prompter.output();
        writeln!(out)?;
        report::write_flight_table(out, self.registry.flights())
    }

    fn search_flight(&mut self) -> Result<()> {
        let number = self.prompter.ask_word("Enter Flight Number: ")?;
        let flight = self
            .registry
            .find_flight(&number)
            .ok_or_else(|| Error::flight_not_found(&number))?;

        let out = self.prompter.output();
        writeln!(out)?;
        report::write_flight_detail(out, flight)
    }

    /// Collect a booking, then commit it in one step.
    ///
    /// Nothing reaches the registry until every seat is chosen, so a
    /// cancelled or interrupted workflow leaves no trace.
    fn book_ticket(&mut self) -> Result<()> {
        writeln!(self.prompter.output())?;
        let number = self.prompter.ask_word("Enter Flight Number: ")?;
        self.registry.bookable_flight(&number)?;

        let passenger = PassengerDetails {
            name: self.prompter.ask_line("Passenger Name: ")?,
            passport: self.prompter.ask_line("Passport Number: ")?,
            contact: self.prompter.ask_line("Contact Info: ")?,
        };

        // A non-numeric answer counts as zero seats.
        let requested = self
            .prompter
            .ask_number("Number of seats to book: ")?
            .unwrap_or(0);
        let count = self.registry.check_seat_count(&number, requested)?;

        let flight = self
            .registry
            .find_flight(&number)
            .ok_or_else(|| Error::flight_not_found(&number))?;
        let out = self.prompter.output();
        writeln!(out)?;
        report::write_available_seats(out, flight)?;

        // One rejection budget covers every seat of the booking.
        let registry = &*self.registry;
        let mut seats = BTreeSet::new();
        let mut rejections = 0;
        for slot in 1..=count {
            let seat = self.prompter.ask_until(
                &format!("Select seat #{slot}: "),
                self.max_seat_attempts,
                &mut rejections,
                |answer| match registry.check_seat(&number, answer, &seats) {
                    Ok(()) => Ok(answer.to_string()),
                    Err(Error::SeatUnavailable { .. } | Error::SeatLabelRejected { .. }) => {
                        Err(format!("Seat {answer} not available!"))
                    }
                    Err(e) => Err(e.to_string()),
                },
            )?;
            writeln!(self.prompter.output(), "Seat {seat} selected.")?;
            seats.insert(seat);
        }

        let ticket = self.registry.book(BookingRequest {
            flight_number: number,
            passenger,
            seats,
        })?;

        let out = self.prompter.output();
        writeln!(out)?;
        writeln!(out, "{ticket}")?;
        writeln!(out, "Booking successful! E-ticket generated.")?;
        Ok(())
    }

    fn show_passenger_info(&mut self) -> Result<()> {
        let passport = self.prompter.ask_line("Enter Passport Number: ")?;
        let (passenger, bookings) = self.registry.passenger_bookings(&passport)?;

        let out = self.prompter.output();
        writeln!(out)?;
        report::write_passenger_info(out, passenger, &bookings)
    }
}

/// Operator-facing message for a recoverable error.
fn notice(error: &Error) -> String {
    match error {
        Error::FlightNotFound { .. } => "Flight not found!".to_string(),
        Error::PassengerNotFound { .. } => "Passenger not found!".to_string(),
        Error::NoSeatsAvailable { .. } => "No seats available on this flight!".to_string(),
        Error::InvalidSeatCount { .. } => "Invalid number of seats!".to_string(),
        Error::TooManyAttempts { attempts, .. } => {
            format!("Too many invalid seat selections ({attempts}). Booking cancelled.")
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeedConfig;
    use std::io::Cursor;

    fn seeded() -> BookingRegistry {
        BookingRegistry::from_seeds(&SeedConfig::default().flights)
    }

    /// Run a scripted session and return everything it printed.
    fn run_script(registry: &mut BookingRegistry, script: &str) -> String {
        run_script_with(registry, script, None)
    }

    fn run_script_with(
        registry: &mut BookingRegistry,
        script: &str,
        max_seat_attempts: Option<u32>,
    ) -> String {
        crate::logging::init_test_logging();
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut session =
            Session::new(registry, input, Vec::new()).with_max_seat_attempts(max_seat_attempts);
        session.run().unwrap();
        String::from_utf8(session.into_output()).unwrap()
    }

    #[test]
    fn test_exit_immediately() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "5\n");
        assert!(text.contains("FLIGHT MANAGEMENT SYSTEM"));
        assert!(text.contains("Exiting system. Goodbye!"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "");
        assert!(text.contains("Enter your choice: "));
        assert!(!text.contains("Goodbye"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "abc\n9\n5\n");
        assert_eq!(text.matches("Invalid choice! Please try again.").count(), 2);
        assert_eq!(text.matches("Enter your choice: ").count(), 3);
    }

    #[test]
    fn test_list_flights() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "1\n5\n");
        assert!(text.contains("BA123"));
        assert!(text.contains("EK202"));
        assert!(text.contains("AA756"));
    }

    #[test]
    fn test_list_flights_empty() {
        let mut registry = BookingRegistry::new();
        let text = run_script(&mut registry, "1\n5\n");
        assert!(text.contains("No flights available!"));
    }

    #[test]
    fn test_search_flight() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "2\nEK202\n2\nZZ000\n5\n");
        assert!(text.contains("Route: Dubai to Singapore"));
        assert!(text.contains("Seats Available: 40/40"));
        assert!(text.contains("Flight not found!"));
    }

    #[test]
    fn test_book_ticket() {
        let mut registry = seeded();
        let script = "3\nBA123\nAda Lovelace\nP1\nada@example.com\n2\n12\n14\n5\n";
        let text = run_script(&mut registry, script);

        assert!(text.contains("Available Seats: 1 2 3"));
        assert!(text.contains("E-TICKET"));
        assert!(text.contains("SEATS: 12 14"));
        assert!(text.contains("STATUS: CONFIRMED"));
        assert!(text.contains("Booking successful! E-ticket generated."));

        let flight = registry.find_flight("BA123").unwrap();
        assert_eq!(flight.available_seats(), 48);
        assert_eq!(
            flight.seats_for("P1"),
            BTreeSet::from(["12".to_string(), "14".to_string()])
        );
        assert_eq!(registry.find_passenger("P1").unwrap().booked_flights(), ["BA123"]);
    }

    #[test]
    fn test_taken_seat_retries_same_slot() {
        let mut registry = seeded();
        run_script(
            &mut registry,
            "3\nBA123\nAda\nP1\nada@example.com\n2\n12\n14\n5\n",
        );

        let text = run_script(
            &mut registry,
            "3\nBA123\nBob\nP2\nbob@example.com\n1\n12\n13\n5\n",
        );
        assert!(text.contains("Seat 12 not available!"));
        assert_eq!(text.matches("Select seat #1: ").count(), 2);
        assert!(!text.contains("Select seat #2"));

        let flight = registry.find_flight("BA123").unwrap();
        assert_eq!(flight.available_seats(), 47);
        assert_eq!(flight.seats_for("P2"), BTreeSet::from(["13".to_string()]));
    }

    #[test]
    fn test_same_seat_twice_in_one_booking() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "3\nAA756\nAda\nP1\n-\n2\n7\n7\n8\n5\n");
        assert!(text.contains("Seat 7 not available!"));
        assert!(text.contains("SEATS: 7 8"));
    }

    #[test]
    fn test_invalid_seat_counts_change_nothing() {
        let mut registry = seeded();
        let text = run_script(
            &mut registry,
            "3\nAA756\nAda\nP1\n-\n0\n3\nAA756\nAda\nP1\n-\n31\n3\nAA756\nAda\nP1\n-\nmany\n5\n",
        );
        assert_eq!(text.matches("Invalid number of seats!").count(), 3);
        assert_eq!(registry.find_flight("AA756").unwrap().booked_count(), 0);
        assert!(registry.find_passenger("P1").is_none());
    }

    #[test]
    fn test_book_unknown_flight() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "3\nZZ000\n5\n");
        assert!(text.contains("Flight not found!"));
        assert!(!text.contains("Passenger Name: "));
    }

    #[test]
    fn test_book_full_flight() {
        let mut registry = BookingRegistry::new();
        registry.add_flight("T1", "A", "B", "1", "2", 1);
        run_script(&mut registry, "3\nT1\nAda\nP1\n-\n1\n1\n5\n");

        let text = run_script(&mut registry, "3\nT1\n5\n");
        assert!(text.contains("No seats available on this flight!"));
    }

    #[test]
    fn test_interrupted_booking_leaves_no_trace() {
        let mut registry = seeded();
        let text = run_script(&mut registry, "3\nBA123\nAda\nP1\n-\n2\n12\n");
        assert!(!text.contains("E-TICKET"));
        assert_eq!(registry.find_flight("BA123").unwrap().booked_count(), 0);
        assert!(registry.find_passenger("P1").is_none());
    }

    #[test]
    fn test_bounded_seat_attempts() {
        let mut registry = seeded();
        run_script(&mut registry, "3\nBA123\nAda\nP1\n-\n1\n12\n5\n");

        let text = run_script_with(
            &mut registry,
            "3\nBA123\nBob\nP2\n-\n1\n12\n12\n5\n",
            Some(2),
        );
        assert!(text.contains("Too many invalid seat selections (2). Booking cancelled."));
        assert!(registry.find_passenger("P2").is_none());
        assert!(text.contains("Exiting system. Goodbye!"));
    }

    #[test]
    fn test_seat_attempts_counted_across_slots() {
        let policy = crate::registry::SeatPolicy::with_pattern("^[0-9]+$").unwrap();
        let mut registry = seeded().with_seat_policy(policy);
        let text = run_script_with(
            &mut registry,
            "3\nBA123\nAda\nP1\n-\n2\nX\n1\nX\n2\n5\n",
            Some(2),
        );
        assert!(text.contains("Seat 1 selected."));
        assert!(text.contains("Too many invalid seat selections (2). Booking cancelled."));
        assert!(!text.contains("E-TICKET"));
        assert_eq!(registry.find_flight("BA123").unwrap().booked_count(), 0);
        assert!(registry.find_passenger("P1").is_none());
    }

    #[test]
    fn test_seat_labels_kept_as_typed() {
        let mut registry = seeded();
        run_script(&mut registry, "3\nBA123\nAda\nP1\n-\n1\n 12\n5\n");

        let flight = registry.find_flight("BA123").unwrap();
        assert!(flight.is_seat_available("12"));
        assert!(!flight.is_seat_available(" 12"));
    }

    #[test]
    fn test_seat_policy_rejection_message() {
        let policy = crate::registry::SeatPolicy::with_pattern("^[0-9]+$").unwrap();
        let mut registry = seeded().with_seat_policy(policy);
        let text = run_script(&mut registry, "3\nBA123\nAda\nP1\n-\n1\n12A\n12\n5\n");
        assert!(text.contains("Seat 12A not available!"));
        assert!(text.contains("SEATS: 12"));
    }

    #[test]
    fn test_passenger_info() {
        let mut registry = seeded();
        let text = run_script(
            &mut registry,
            "3\nBA123\nAda Lovelace\nP1\nada@example.com\n2\n12\n14\n\
             3\nBA123\nAda Lovelace\nP1\nada@example.com\n1\n20\n\
             4\nP1\n4\nP9\n5\n",
        );

        assert!(text.contains("NAME: Ada Lovelace"));
        assert!(text.contains("PASSPORT: P1"));
        assert!(text.contains("CONTACT: ada@example.com"));
        // One row per history entry, each listing every seat on that flight.
        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with("| BA123")).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.contains("12 14 20")));
        assert!(text.contains("Passenger not found!"));
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(notice(&Error::flight_not_found("X")), "Flight not found!");
        assert_eq!(notice(&Error::passenger_not_found("P")), "Passenger not found!");
        assert_eq!(
            notice(&Error::InvalidSeatCount {
                requested: 0,
                available: 1
            }),
            "Invalid number of seats!"
        );
    }
}
