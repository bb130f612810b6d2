use crate::config::TicketConfig;
use crate::error::{Result, Section, TicketError};
use crate::ticket::{Event, EventDate, Location, Ticket};
use csv::{ReaderBuilder, Trim};
use log::{debug, error, warn};
use serde::Deserialize;
use std::io;

/// One line of a datafile, before any validation. Empty cells and short rows
/// leave the corresponding fields as `None`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TicketRecord {
    event: Option<String>,
    day: Option<String>,
    month: Option<String>,
    year: Option<String>,
    name: Option<String>,
    zone: Option<String>,
    #[serde(alias = "box")]
    box_id: Option<String>,
}

impl TicketRecord {
    fn into_ticket(self, config: &TicketConfig) -> Result<Ticket> {
        let event = required(self.event, Section::Event)?;
        let day = required(self.day, Section::Date)?;
        let month = required(self.month, Section::Date)?;
        let year = required(self.year, Section::Date)?;
        let name = required(self.name, Section::Name)?;
        let zone = required(self.zone, Section::Location)?;
        let box_id = required(self.box_id, Section::Location)?;

        let event = event.parse::<Event>()?;
        let date = EventDate::parse(&day, &month, &year, &config.years)?;
        let location = Location::new(&zone, &box_id)?;
        Ok(Ticket::new(event, date, name, location, config.base_cost))
    }
}

fn required(field: Option<String>, section: Section) -> Result<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| TicketError::missing(section))
}

/// Reads and validates every record in `source`, stopping at the first bad one.
pub fn read_tickets<R: io::Read>(source: R, config: &TicketConfig) -> Result<Vec<Ticket>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    let mut tickets = Vec::new();
    for record in reader.deserialize::<TicketRecord>() {
        let record = record.map_err(|err| {
            error!("ticket datafile could not be read: {}", err);
            err
        })?;
        let number = tickets.len() + 1;
        let ticket = record.into_ticket(config).map_err(|err| {
            warn!("ticket record {} rejected: {}", number, err);
            err
        })?;
        debug!("admitting {:?}", ticket);
        tickets.push(ticket);
    }

    if tickets.is_empty() {
        warn!("ticket datafile holds no records");
        return Err(TicketError::missing(Section::Records));
    }
    Ok(tickets)
}

#[cfg(test)]
use crate::error::DateField;
#[cfg(test)]
use rust_decimal_macros::dec;

#[cfg(test)]
const HEADER: &str = "event,day,month,year,name,zone,box\n";

#[cfg(test)]
fn read(body: &str) -> Result<Vec<Ticket>> {
    let data = format!("{}{}", HEADER, body);
    read_tickets(data.as_bytes(), &TicketConfig::default())
}

#[test]
fn reads_valid_records() {
    let tickets = read("sport,12,3,2024,Ana Lopez,A,2\n concert , 1 , 7 , 2025 , Bo Chen , d , 10 \n")
        .unwrap();

    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].event(), Event::Sport);
    assert_eq!(tickets[0].name(), "Ana Lopez");
    assert_eq!(tickets[0].price(), dec!(64));
    assert_eq!(tickets[1].event(), Event::Concert);
    assert_eq!(tickets[1].name(), "Bo Chen");
    assert_eq!(tickets[1].location().zone(), "D");
    assert_eq!(tickets[1].location().box_id(), "10");
    assert_eq!(tickets[1].date().month(), 7);
}

#[test]
fn blank_lines_are_skipped() {
    let tickets = read("\nperformance,2,2,2022,Cy,B,6\n\n").unwrap();
    assert_eq!(tickets.len(), 1);
}

#[test]
fn empty_source() {
    assert!(matches!(
        read_tickets("".as_bytes(), &TicketConfig::default()),
        Err(TicketError::MissingInformation { section: Section::Records })
    ));
    assert!(matches!(
        read(""),
        Err(TicketError::MissingInformation { section: Section::Records })
    ));
}

#[test]
fn first_line_is_always_the_header() {
    let headerless = "sport,12,3,2024,Ana,A,2\n";
    assert!(matches!(
        read_tickets(headerless.as_bytes(), &TicketConfig::default()),
        Err(TicketError::MissingInformation { section: Section::Records })
    ));

    // with a second row, the first one is still consumed as the header
    let two_rows = "sport,12,3,2024,Ana,A,2\nconcert,1,7,2025,Bo,D,10\n";
    let tickets = read_tickets(two_rows.as_bytes(), &TicketConfig::default()).unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].event(), Event::Concert);
}

#[test]
fn missing_sections() {
    let cases = [
        (",12,3,2024,Ana,A,2", Section::Event),
        ("sport,,3,2024,Ana,A,2", Section::Date),
        ("sport,12,3,,Ana,A,2", Section::Date),
        ("sport,12,3,2024,,A,2", Section::Name),
        ("sport,12,3,2024,   ,A,2", Section::Name),
        ("sport,12,3,2024,Ana,,2", Section::Location),
        ("sport,12,3,2024,Ana,A,", Section::Location),
        ("sport,12,3,2024,Ana", Section::Location),
    ];
    for (body, expected) in cases {
        match read(body) {
            Err(TicketError::MissingInformation { section }) => assert_eq!(section, expected),
            other => panic!("{:?} gave {:?}", body, other),
        }
    }
}

#[test]
fn presence_is_checked_before_values() {
    // bad month, but the name is missing
    assert!(matches!(
        read("sport,12,13,2024,,A,2"),
        Err(TicketError::MissingInformation { section: Section::Name })
    ));
}

#[test]
fn first_bad_record_wins() {
    let err = read("sport,12,3,2024,Ana,A,2\nsport,12,3,2024,Ana,Q,2\nsport,40,3,2024,Ana,A,2\n")
        .unwrap_err();
    assert!(matches!(err, TicketError::InvalidLocation { .. }));
}

#[test]
fn date_and_event_errors() {
    assert!(matches!(
        read("sport,12,3,1850,Ana,A,2"),
        Err(TicketError::InvalidDate { field: DateField::Year, .. })
    ));
    assert!(matches!(
        read("ballet,12,3,2024,Ana,A,2"),
        Err(TicketError::MissingInformation { section: Section::Event })
    ));
}

#[test]
fn custom_delimiter_and_cost() {
    let config = TicketConfig::default()
        .with_delimiter(b';')
        .with_base_cost(dec!(10));
    let data = "event;day;month;year;name;zone;box\nconcert;5;5;2025;Di;C;3\n";

    let tickets = read_tickets(data.as_bytes(), &config).unwrap();
    assert_eq!(tickets[0].price(), dec!(60));
}
