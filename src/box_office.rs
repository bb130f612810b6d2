use log::{error, info};
use rust_decimal::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

mod config;
mod error;
mod reader;
mod ticket;

pub use crate::config::TicketConfig;
pub use crate::error::{DateField, Result, Section, TicketError};
pub use crate::reader::read_tickets;
pub use crate::ticket::{is_leap_year, Event, EventDate, Location, Ticket};

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    sold: usize,
    revenue: Decimal,
}

impl Tally {
    fn add(&mut self, price: Decimal) {
        self.sold += 1;
        self.revenue += price;
    }
}

/// Tickets admitted by a single load, with running totals per event.
#[derive(Debug, Default)]
struct Ledger {
    tickets: Vec<Ticket>,
    tallies: HashMap<Event, Tally>,
}

impl Ledger {
    fn admit(&mut self, ticket: Ticket) {
        self.tallies
            .entry(ticket.event())
            .or_default()
            .add(ticket.price());
        self.tickets.push(ticket);
    }

    fn tally(&self, event: Event) -> Tally {
        self.tallies.get(&event).copied().unwrap_or_default()
    }
}

/// Sales totals for the most recently loaded ticket datafile.
///
/// Every load starts from an empty ledger. A load that fails on any record
/// leaves the box office empty; a successful one replaces whatever was there.
#[derive(Debug, Default)]
pub struct BoxOffice {
    config: TicketConfig,
    ledger: Ledger,
}

impl BoxOffice {
    pub fn new() -> Self {
        BoxOffice::default()
    }

    pub fn with_config(config: TicketConfig) -> Self {
        BoxOffice {
            config,
            ledger: Ledger::default(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut box_office = BoxOffice::new();
        box_office.load(path)?;
        Ok(box_office)
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.ledger = Ledger::default();

        let path = path.as_ref();
        if !path.exists() {
            error!("datafile {} does not exist", path.display());
            return Err(TicketError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|err| TicketError::Read(err.into()))?;
        info!("loading tickets from {}", path.display());
        self.load_reader(file)
    }

    pub fn load_reader<R: io::Read>(&mut self, source: R) -> Result<()> {
        self.ledger = Ledger::default();

        let tickets = reader::read_tickets(source, &self.config)?;
        let mut ledger = Ledger::default();
        tickets.into_iter().for_each(|ticket| ledger.admit(ticket));
        self.ledger = ledger;

        info!(
            "loaded {} tickets worth ${}",
            self.total_tickets_sold(),
            self.total_revenue().round_dp(2)
        );
        Ok(())
    }

    pub fn total_tickets_sold(&self) -> usize {
        self.ledger.tickets.len()
    }

    pub fn tickets_sold(&self, event: Event) -> usize {
        self.ledger.tally(event).sold
    }

    pub fn total_revenue(&self) -> Decimal {
        Event::ALL.iter().map(|event| self.revenue(*event)).sum()
    }

    pub fn revenue(&self, event: Event) -> Decimal {
        self.ledger.tally(event).revenue
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.ledger.tickets
    }

    pub fn config(&self) -> &TicketConfig {
        &self.config
    }

    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BoxOffice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total number of tickets sold: {}\nTotal Revenue: ${:.2}",
            self.total_tickets_sold(),
            self.total_revenue().round_dp(2)
        )?;
        for event in Event::ALL {
            write!(
                f,
                "\nTotal {} Revenue: ${:.2}",
                event.label(),
                self.revenue(event).round_dp(2)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
const HEADER: &str = "event,day,month,year,name,zone,box\n";

#[cfg(test)]
fn source(body: &str) -> Vec<u8> {
    format!("{}{}", HEADER, body).into_bytes()
}

#[test]
fn sanity() {
    let mut box_office = BoxOffice::new();

    box_office
        .load_reader(&source("concert,12,3,2024,Ana,A,2\n")[..])
        .unwrap();

    assert_eq!(box_office.total_tickets_sold(), 1);
    assert_eq!(box_office.tickets_sold(Event::Concert), 1);
    assert_eq!(box_office.tickets_sold(Event::Sport), 0);
    assert_eq!(box_office.total_revenue(), dec!(96));
    assert_eq!(box_office.revenue(Event::Concert), dec!(96));
    assert_eq!(box_office.revenue(Event::Sport), dec!(0));
    assert_eq!(box_office.revenue(Event::Performance), dec!(0));
}

#[test]
fn empty_box_office() {
    let box_office = BoxOffice::new();

    assert_eq!(box_office.total_tickets_sold(), 0);
    assert_eq!(box_office.total_revenue(), dec!(0));
    assert_eq!(
        box_office.summary(),
        "Total number of tickets sold: 0\nTotal Revenue: $0.00\nTotal Sports Revenue: $0.00\nTotal Performance Revenue: $0.00\nTotal Concert Revenue: $0.00"
    );
}

#[test]
fn totals_add_up() {
    let mut box_office = BoxOffice::new();

    box_office
        .load_reader(
            &source(
                "sport,1,1,2024,Ana,A,1\n\
                 sport,2,1,2024,Bo,B,2\n\
                 concert,3,1,2024,Cy,C,3\n\
                 performance,4,1,2024,Di,D,4\n\
                 performance,5,1,2024,Ed,D,5\n",
            )[..],
        )
        .unwrap();

    let sold: usize = Event::ALL.iter().map(|e| box_office.tickets_sold(*e)).sum();
    assert_eq!(sold, box_office.total_tickets_sold());
    assert_eq!(sold, 5);
    assert_eq!(box_office.revenue(Event::Sport), dec!(128));
    assert_eq!(box_office.revenue(Event::Concert), dec!(96));
    assert_eq!(box_office.revenue(Event::Performance), dec!(64));
    assert_eq!(box_office.total_revenue(), dec!(288));
    assert_eq!(box_office.tickets()[3].name(), "Di");
}

#[test]
fn failed_load_clears_totals() {
    let mut box_office = BoxOffice::new();
    box_office
        .load_reader(&source("sport,1,1,2024,Ana,A,1\n")[..])
        .unwrap();

    let result = box_office.load_reader(&source("sport,1,1,2024,Ana,A,1\nsport,1,1,2024,Ana,A,9\n")[..]);

    assert!(matches!(result, Err(TicketError::InvalidLocation { .. })));
    assert_eq!(box_office.total_tickets_sold(), 0);
    assert_eq!(box_office.total_revenue(), dec!(0));
    assert!(box_office.tickets().is_empty());
}

#[test]
fn missing_path_clears_totals() {
    let mut box_office = BoxOffice::new();
    box_office
        .load_reader(&source("concert,1,1,2024,Ana,A,1\n")[..])
        .unwrap();

    let result = box_office.load("no/such/tickets.txt");

    assert!(matches!(result, Err(TicketError::SourceNotFound { .. })));
    assert_eq!(box_office.total_tickets_sold(), 0);
    assert_eq!(box_office.revenue(Event::Concert), dec!(0));
}

#[test]
fn unreadable_path_clears_totals() {
    let mut box_office = BoxOffice::new();
    box_office
        .load_reader(&source("sport,1,1,2024,Ana,A,1\n")[..])
        .unwrap();

    // a directory exists but cannot be read as a datafile
    let result = box_office.load(env!("CARGO_MANIFEST_DIR"));

    assert!(result.is_err());
    assert_eq!(box_office.total_tickets_sold(), 0);
    assert!(box_office.tickets().is_empty());
}

#[test]
fn summary_rounds_to_cents() {
    let config = TicketConfig::default().with_base_cost(dec!(12.345));
    let mut box_office = BoxOffice::with_config(config);
    box_office
        .load_reader(&source("performance,1,1,2024,Ana,A,1\n")[..])
        .unwrap();

    assert_eq!(box_office.revenue(Event::Performance), dec!(24.690));
    assert!(box_office.summary().contains("Total Performance Revenue: $24.69"));
}
