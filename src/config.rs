use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::ops::RangeInclusive;

pub const DEFAULT_BASE_COST: Decimal = dec!(16);
pub const DEFAULT_YEARS: RangeInclusive<i32> = 1900..=2100;

/// Knobs for reading and pricing a ticket datafile.
#[derive(Debug, Clone)]
pub struct TicketConfig {
    /// Cost of a ticket before the event multiplier is applied.
    pub base_cost: Decimal,
    /// Years an event date may fall in.
    pub years: RangeInclusive<i32>,
    pub delimiter: u8,
}

impl TicketConfig {
    pub fn with_base_cost(mut self, base_cost: Decimal) -> Self {
        self.base_cost = base_cost;
        self
    }

    pub fn with_years(mut self, years: RangeInclusive<i32>) -> Self {
        self.years = years;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl Default for TicketConfig {
    fn default() -> Self {
        TicketConfig {
            base_cost: DEFAULT_BASE_COST,
            years: DEFAULT_YEARS,
            delimiter: b',',
        }
    }
}

#[test]
fn builder_overrides_defaults() {
    let config = TicketConfig::default()
        .with_base_cost(dec!(20.50))
        .with_years(2000..=2030)
        .with_delimiter(b';');

    assert_eq!(config.base_cost, dec!(20.50));
    assert_eq!(config.years, 2000..=2030);
    assert_eq!(config.delimiter, b';');
}
