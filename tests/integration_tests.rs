use box_office::{BoxOffice, DateField, Event, Section, TicketError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

const BASE_COST: Decimal = dec!(16);

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn load(name: &str) -> Result<BoxOffice, TicketError> {
    init();
    BoxOffice::from_path(data(name))
}

fn assert_totals(box_office: &BoxOffice, tickets: usize, revenue: Decimal) {
    assert_eq!(box_office.total_tickets_sold(), tickets);
    assert_eq!(box_office.total_revenue(), revenue);
}

#[test]
fn one_ticket() {
    let box_office = load("validOneTicketData.txt").unwrap();
    assert_totals(&box_office, 1, BASE_COST * dec!(2));
}

#[test]
fn summary() {
    let box_office = load("validMultipleTicketData.txt").unwrap();

    assert_eq!(
        box_office.summary(),
        "Total number of tickets sold: 3\nTotal Revenue: $192.00\nTotal Sports Revenue: $64.00\nTotal Performance Revenue: $32.00\nTotal Concert Revenue: $96.00"
    );
    assert_eq!(box_office.to_string(), box_office.summary());
}

#[test]
fn revenue_by_event() {
    let box_office = load("validMultipleTicketData.txt").unwrap();

    assert_eq!(box_office.total_tickets_sold(), 3);
    assert_eq!(box_office.total_revenue(), BASE_COST * dec!(12));
    assert_eq!(box_office.revenue(Event::Sport), BASE_COST * dec!(4));
    assert_eq!(box_office.revenue(Event::Concert), BASE_COST * dec!(6));
    assert_eq!(box_office.revenue(Event::Performance), BASE_COST * dec!(2));

    let by_event: Decimal = Event::ALL.iter().map(|e| box_office.revenue(*e)).sum();
    assert_eq!(by_event, box_office.total_revenue());
}

#[test]
fn reload_replaces_totals() {
    let mut box_office = load("validOneTicketData.txt").unwrap();
    box_office.load(data("validMultipleTicketData.txt")).unwrap();
    assert_totals(&box_office, 3, BASE_COST * dec!(12));

    box_office.load(data("validOneTicketData.txt")).unwrap();
    assert_totals(&box_office, 1, BASE_COST * dec!(2));
}

#[test]
fn missing_file() {
    let err = load("dne.txt").unwrap_err();
    assert!(matches!(err, TicketError::SourceNotFound { .. }));
}

#[test]
fn missing_file_clears_totals() {
    let mut box_office = load("validMultipleTicketData.txt").unwrap();

    let result = box_office.load(data("dne.txt"));

    assert!(matches!(result, Err(TicketError::SourceNotFound { .. })));
    assert_totals(&box_office, 0, dec!(0));
}

#[test]
fn empty_file() {
    let err = load("emptyTicketData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::MissingInformation {
            section: Section::Records
        }
    ));
}

#[test]
fn invalid_day() {
    let err = load("invalidDateDayData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::InvalidDate {
            field: DateField::Day,
            ..
        }
    ));
}

#[test]
fn invalid_month() {
    let err = load("invalidDateMonthData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::InvalidDate {
            field: DateField::Month,
            ..
        }
    ));
}

#[test]
fn invalid_year() {
    let err = load("invalidDateYearData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::InvalidDate {
            field: DateField::Year,
            ..
        }
    ));
}

#[test]
fn no_such_zone() {
    let err = load("invalidZoneData.txt").unwrap_err();
    assert!(matches!(err, TicketError::InvalidLocation { .. }));
}

#[test]
fn no_such_box() {
    let err = load("invalidBoxData.txt").unwrap_err();
    assert!(matches!(err, TicketError::InvalidLocation { .. }));
    assert_eq!(
        err.to_string(),
        "NoSuchLocationException: Box or Zone value is invalid"
    );
}

#[test]
fn invalid_box_after_valid_ticket_leaves_nothing() {
    let mut box_office = load("validOneTicketData.txt").unwrap();

    assert!(box_office.load(data("invalidBoxData.txt")).is_err());
    assert_totals(&box_office, 0, dec!(0));
    assert!(box_office.tickets().is_empty());
}

#[test]
fn missing_event() {
    let err = load("invalidMissingEventData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::MissingInformation {
            section: Section::Event
        }
    ));
    assert_eq!(err.to_string(), "Datafile is missing information");
}

#[test]
fn missing_date() {
    let err = load("invalidMissingDateData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::MissingInformation {
            section: Section::Date
        }
    ));
}

#[test]
fn missing_name() {
    let err = load("invalidMissingNameData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::MissingInformation {
            section: Section::Name
        }
    ));
}

#[test]
fn missing_location() {
    let err = load("invalidMissingLocationData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::MissingInformation {
            section: Section::Location
        }
    ));
}

#[test]
fn unrecognised_event() {
    let err = load("invalidEventData.txt").unwrap_err();
    assert!(matches!(
        err,
        TicketError::MissingInformation {
            section: Section::Event
        }
    ));
    assert_eq!(err.to_string(), "Datafile is missing information");
}
