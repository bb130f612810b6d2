use crate::error::{DateField, Result, Section, TicketError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::ops::RangeInclusive;
use std::str::FromStr;

// zone -> boxes that exist inside it
const SEATING: &[(&str, &[&str])] = &[
    ("A", &["1", "2", "3", "4"]),
    ("B", &["1", "2", "3", "4", "5", "6"]),
    ("C", &["1", "2", "3", "4", "5", "6", "7", "8"]),
    ("D", &["1", "2", "3", "4", "5", "6", "7", "8", "9", "10"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Sport,
    Concert,
    Performance,
}

impl Event {
    /// Order in which categories are reported.
    pub const ALL: [Event; 3] = [Event::Sport, Event::Performance, Event::Concert];

    pub fn label(&self) -> &'static str {
        match self {
            Event::Sport => "Sports",
            Event::Concert => "Concert",
            Event::Performance => "Performance",
        }
    }

    pub fn multiplier(&self) -> Decimal {
        match self {
            Event::Sport => dec!(4),
            Event::Concert => dec!(6),
            Event::Performance => dec!(2),
        }
    }
}

impl FromStr for Event {
    type Err = TicketError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sport" => Ok(Event::Sport),
            "concert" => Ok(Event::Concert),
            "performance" => Ok(Event::Performance),
            _ => Err(TicketError::missing(Section::Event)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDate {
    day: u32,
    month: u32,
    year: i32,
}

impl EventDate {
    pub fn new(day: u32, month: u32, year: i32, years: &RangeInclusive<i32>) -> Result<Self> {
        if !years.contains(&year) {
            return Err(TicketError::invalid_date(DateField::Year, year.to_string()));
        }
        if !(1..=12).contains(&month) {
            return Err(TicketError::invalid_date(DateField::Month, month.to_string()));
        }
        if day < 1 || day > days_in_month(month, year) {
            return Err(TicketError::invalid_date(DateField::Day, day.to_string()));
        }
        Ok(EventDate { day, month, year })
    }

    /// Builds a date from the raw text of a record.
    pub fn parse(day: &str, month: &str, year: &str, years: &RangeInclusive<i32>) -> Result<Self> {
        let year = year
            .trim()
            .parse::<i32>()
            .map_err(|_| TicketError::invalid_date(DateField::Year, year))?;
        let month = month
            .trim()
            .parse::<u32>()
            .map_err(|_| TicketError::invalid_date(DateField::Month, month))?;
        let day = day
            .trim()
            .parse::<u32>()
            .map_err(|_| TicketError::invalid_date(DateField::Day, day))?;
        EventDate::new(day, month, year, years)
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    zone: String,
    box_id: String,
}

impl Location {
    pub fn new(zone: &str, box_id: &str) -> Result<Self> {
        let (zone_id, boxes) = SEATING
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(zone.trim()))
            .ok_or_else(|| TicketError::invalid_location(zone, box_id))?;

        if !boxes.contains(&box_id.trim()) {
            return Err(TicketError::invalid_location(zone, box_id));
        }
        Ok(Location {
            zone: zone_id.to_string(),
            box_id: box_id.trim().to_string(),
        })
    }

    pub fn zone(&self) -> &str {
        &self.zone
    }

    pub fn box_id(&self) -> &str {
        &self.box_id
    }
}

/// A record that passed validation and has been priced.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    event: Event,
    date: EventDate,
    name: String,
    location: Location,
    price: Decimal,
}

impl Ticket {
    pub fn new(
        event: Event,
        date: EventDate,
        name: String,
        location: Location,
        base_cost: Decimal,
    ) -> Self {
        Ticket {
            event,
            date,
            name,
            location,
            price: base_cost * event.multiplier(),
        }
    }

    pub fn event(&self) -> Event {
        self.event
    }

    pub fn date(&self) -> &EventDate {
        &self.date
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn price(&self) -> Decimal {
        self.price
    }
}

#[cfg(test)]
use crate::config::DEFAULT_YEARS;

#[test]
fn event_names() {
    assert_eq!("sport".parse::<Event>().unwrap(), Event::Sport);
    assert_eq!(" Concert ".parse::<Event>().unwrap(), Event::Concert);
    assert_eq!("PERFORMANCE".parse::<Event>().unwrap(), Event::Performance);
    let err = "opera".parse::<Event>().unwrap_err();
    assert!(matches!(
        err,
        TicketError::MissingInformation { section: Section::Event }
    ));
    assert_eq!(err.to_string(), "Datafile is missing information");
}

#[test]
fn leap_years() {
    assert!(is_leap_year(2024));
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(1900));
    assert!(!is_leap_year(2023));

    assert!(EventDate::new(29, 2, 2024, &DEFAULT_YEARS).is_ok());
    assert!(EventDate::new(29, 2, 2000, &DEFAULT_YEARS).is_ok());
    assert!(matches!(
        EventDate::new(29, 2, 1900, &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Day, .. })
    ));
    assert!(matches!(
        EventDate::new(29, 2, 2023, &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Day, .. })
    ));
}

#[test]
fn date_bounds() {
    assert!(EventDate::new(31, 12, 2100, &DEFAULT_YEARS).is_ok());
    assert!(EventDate::new(1, 1, 1900, &DEFAULT_YEARS).is_ok());
    assert!(matches!(
        EventDate::new(31, 4, 2024, &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Day, .. })
    ));
    assert!(matches!(
        EventDate::new(0, 4, 2024, &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Day, .. })
    ));
    assert!(matches!(
        EventDate::new(1, 0, 2024, &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Month, .. })
    ));
    assert!(matches!(
        EventDate::new(1, 13, 2024, &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Month, .. })
    ));
    assert!(matches!(
        EventDate::new(1, 1, 2101, &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Year, .. })
    ));
}

#[test]
fn date_from_text() {
    let date = EventDate::parse("7", " 11", "2025 ", &DEFAULT_YEARS).unwrap();
    assert_eq!((date.day(), date.month(), date.year()), (7, 11, 2025));

    assert!(matches!(
        EventDate::parse("seven", "11", "2025", &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Day, value }) if value == "seven"
    ));
    assert!(matches!(
        EventDate::parse("7", "-1", "2025", &DEFAULT_YEARS),
        Err(TicketError::InvalidDate { field: DateField::Month, .. })
    ));
}

#[test]
fn seating_table() {
    let location = Location::new("c", "8").unwrap();
    assert_eq!(location.zone(), "C");
    assert_eq!(location.box_id(), "8");

    assert!(Location::new("D", "10").is_ok());
    assert!(matches!(
        Location::new("A", "5"),
        Err(TicketError::InvalidLocation { zone, box_id }) if zone == "A" && box_id == "5"
    ));
    assert!(matches!(
        Location::new("Z", "1"),
        Err(TicketError::InvalidLocation { .. })
    ));
}

#[test]
fn ticket_price() {
    let date = EventDate::new(1, 6, 2024, &DEFAULT_YEARS).unwrap();
    let location = Location::new("A", "1").unwrap();
    let sport = Ticket::new(Event::Sport, date, "Sam".into(), location.clone(), dec!(16));
    let concert = Ticket::new(Event::Concert, date, "Sam".into(), location.clone(), dec!(16));
    let show = Ticket::new(Event::Performance, date, "Sam".into(), location, dec!(16));

    assert_eq!(sport.price(), dec!(64));
    assert_eq!(concert.price(), dec!(96));
    assert_eq!(show.price(), dec!(32));
}
