//! Common types used throughout the faro workspace.
//!
//! This module defines symbols, dates and evaluation windows, and the
//! polars-backed [`MarketData`] panel that price providers hand to the
//! evaluator.

use std::{fmt, str::FromStr};

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{FaroError, Observation, PriceSeries, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier, e.g. `"AAPL"` or `"^GSPC"`.
pub type Symbol = String;

/// Date format used on the command line and in provider payloads.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string in `YYYY-MM-DD` format.
pub fn parse_date(date_str: &str) -> Result<Date> {
    Date::parse_from_str(date_str, DATE_FORMAT)
        .map_err(|e| FaroError::InvalidDate(format!("'{date_str}': {e}")))
}

/// An inclusive calendar window over which a run is evaluated.
///
/// Deserialization goes through [`DateRange::new`], so a window whose start
/// is after its end is rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: Date,
    end: Date,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: Date,
    end: Date,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = FaroError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Create a new range.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::InvalidDate`] when `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self> {
        if start > end {
            return Err(FaroError::InvalidDate(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a range from two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// First day of the range.
    pub const fn start(&self) -> Date {
        self.start
    }

    /// Last day of the range.
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whether `date` falls inside the range (both ends inclusive).
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days between start and end.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: Date::from_ymd_opt(2016, 1, 1).unwrap(),
            end: Date::from_ymd_opt(2023, 12, 31).unwrap(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Which daily price a series is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceField {
    /// Opening price.
    #[default]
    Open,
    /// Closing price.
    Close,
    /// Split- and dividend-adjusted close.
    AdjClose,
}

impl PriceField {
    /// Column name of this field in a [`MarketData`] panel.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::AdjClose => "adj_close",
        }
    }
}

impl FromStr for PriceField {
    type Err = FaroError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "open" => Ok(Self::Open),
            "close" => Ok(Self::Close),
            "adj_close" | "adjclose" => Ok(Self::AdjClose),
            other => Err(FaroError::InvalidData(format!(
                "unknown price field '{other}' (expected open, close or adj-close)"
            ))),
        }
    }
}

impl fmt::Display for PriceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Container for market data.
///
/// `MarketData` wraps a long-format Polars DataFrame with one row per
/// `(symbol, date)` bar.
///
/// # Expected Schema
///
/// - `symbol`: Security identifier
/// - `date`: Trading date as `YYYY-MM-DD`
/// - `open`, `close`, `adj_close`: Price data
///
/// # Example
///
/// ```no_run
/// use faro_traits::{MarketData, PriceField};
/// use polars::prelude::*;
///
/// let df = df! {
///     "symbol" => &["AAPL", "AAPL"],
///     "date" => &["2024-01-02", "2024-01-03"],
///     "open" => &[187.15, 184.22],
/// }.unwrap();
///
/// let market_data = MarketData::new(df);
/// let series = market_data.price_series("AAPL", PriceField::Open).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MarketData {
    data: DataFrame,
}

impl MarketData {
    /// Creates a new `MarketData` instance from a DataFrame.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// Returns the number of rows in the market data.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Returns whether the market data is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Checks if a column exists in the market data.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Distinct symbols present in the panel, sorted.
    pub fn symbols(&self) -> Result<Vec<Symbol>> {
        if !self.has_column("symbol") {
            return Err(FaroError::MissingColumn("symbol".to_string()));
        }

        let mut symbols: Vec<Symbol> = self
            .data
            .column("symbol")?
            .as_materialized_series()
            .str()?
            .unique()?
            .into_iter()
            .filter_map(|s: Option<&str>| s.map(|s| s.to_string()))
            .collect();
        symbols.sort();
        Ok(symbols)
    }

    /// Extract one symbol's price history for the given field.
    ///
    /// Null prices are carried as NaN so that the return computation drops
    /// the affected rows.
    ///
    /// # Errors
    ///
    /// Returns an error if a required column is missing, a date cannot be
    /// parsed, or the symbol has no rows.
    pub fn price_series(&self, symbol: &str, field: PriceField) -> Result<PriceSeries> {
        for name in ["symbol", "date", field.column()] {
            if !self.has_column(name) {
                return Err(FaroError::MissingColumn(name.to_string()));
            }
        }

        let mask = self
            .data
            .column("symbol")?
            .as_materialized_series()
            .str()?
            .equal(symbol);
        let rows = self.data.filter(&mask)?;

        if rows.is_empty() {
            return Err(FaroError::SymbolNotFound(symbol.to_string()));
        }

        let dates = rows.column("date")?.as_materialized_series().str()?;
        let prices = rows.column(field.column())?.as_materialized_series().f64()?;

        let observations = dates
            .into_iter()
            .zip(prices.into_iter())
            .filter_map(|(date, price)| date.map(|d| (d, price)))
            .map(|(date, price)| {
                Ok(Observation::new(
                    parse_date(date)?,
                    price.unwrap_or(f64::NAN),
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        PriceSeries::new(symbol, observations)
    }
}
