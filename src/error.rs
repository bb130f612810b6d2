use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Part of a ticket record that can be absent from a datafile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Event,
    Date,
    Name,
    Location,
    /// The datafile holds no ticket records at all.
    Records,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Day,
    Month,
    Year,
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DateField::Day => "Day",
            DateField::Month => "Month",
            DateField::Year => "Year",
        };
        f.write_str(name)
    }
}

/// Everything that can abort loading a ticket datafile.
#[derive(Error, Debug)]
pub enum TicketError {
    #[error("Datafile not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Datafile is missing information")]
    MissingInformation { section: Section },

    #[error("InvalidDateException: {field} value is invalid")]
    InvalidDate { field: DateField, value: String },

    #[error("NoSuchLocationException: Box or Zone value is invalid")]
    InvalidLocation { zone: String, box_id: String },

    #[error("Datafile could not be read: {0}")]
    Read(#[from] csv::Error),
}

impl TicketError {
    pub fn missing(section: Section) -> Self {
        Self::MissingInformation { section }
    }

    pub fn invalid_date(field: DateField, value: impl Into<String>) -> Self {
        Self::InvalidDate {
            field,
            value: value.into(),
        }
    }

    pub fn invalid_location(zone: impl Into<String>, box_id: impl Into<String>) -> Self {
        Self::InvalidLocation {
            zone: zone.into(),
            box_id: box_id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TicketError>;

#[test]
fn messages_are_fixed() {
    assert_eq!(
        TicketError::missing(Section::Name).to_string(),
        "Datafile is missing information"
    );
    assert_eq!(
        TicketError::invalid_location("Q", "1").to_string(),
        "NoSuchLocationException: Box or Zone value is invalid"
    );
    assert_eq!(
        TicketError::invalid_date(DateField::Month, "13").to_string(),
        "InvalidDateException: Month value is invalid"
    );
}
