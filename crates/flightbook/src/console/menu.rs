//! The main menu.

use std::fmt;

/// A numbered menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    /// 1. Display all flights.
    ListFlights,
    /// 2. Search for one flight.
    SearchFlight,
    /// 3. Book a ticket.
    BookTicket,
    /// 4. Show a passenger's information.
    PassengerInfo,
    /// 5. Leave the program.
    Exit,
}

impl MenuChoice {
    /// All choices in menu order.
    pub const ALL: [Self; 5] = [
        Self::ListFlights,
        Self::SearchFlight,
        Self::BookTicket,
        Self::PassengerInfo,
        Self::Exit,
    ];

    /// Parse an answer to the menu prompt.
    ///
    /// Only the first word counts; anything that isn't one of the menu
    /// numbers yields `None`.
    #[must_use]
    pub fn parse(answer: &str) -> Option<Self> {
        let number: u8 = answer.split_whitespace().next()?.parse().ok()?;
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// The menu number.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::ListFlights => 1,
            Self::SearchFlight => 2,
            Self::BookTicket => 3,
            Self::PassengerInfo => 4,
            Self::Exit => 5,
        }
    }

    /// Menu label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ListFlights => "Display All Flights",
            Self::SearchFlight => "Search Flight",
            Self::BookTicket => "Book Ticket",
            Self::PassengerInfo => "Show Passenger Information",
            Self::Exit => "Exit",
        }
    }
}

/// The menu as printed before each prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Menu;

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== FLIGHT MANAGEMENT SYSTEM =====")?;
        for choice in MenuChoice::ALL {
            writeln!(f, "{}. {}", choice.number(), choice.label())?;
        }
        write!(f, "===================================")
    }
}
