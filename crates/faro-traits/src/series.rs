//! Dated price and return series.

use serde::{Deserialize, Serialize};

use crate::{Date, FaroError, Result, Symbol};

/// A single dated value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date.
    pub date: Date,
    /// Observed value. Missing prices are carried as NaN.
    pub value: f64,
}

impl Observation {
    /// Create a new observation.
    pub const fn new(date: Date, value: f64) -> Self {
        Self { date, value }
    }
}

/// Sort observations by date and reject duplicates.
fn into_ordered(symbol: &str, mut observations: Vec<Observation>) -> Result<Vec<Observation>> {
    observations.sort_by_key(|o| o.date);
    if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(FaroError::InvalidData(format!(
            "duplicate observation for {symbol} on {}",
            pair[0].date
        )));
    }
    Ok(observations)
}

/// Price history of one security or index, ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    observations: Vec<Observation>,
}

impl PriceSeries {
    /// Build a series, sorting the observations by date.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::InvalidData`] if two observations share a date.
    pub fn new(symbol: impl Into<Symbol>, observations: Vec<Observation>) -> Result<Self> {
        let symbol = symbol.into();
        let observations = into_ordered(&symbol, observations)?;
        Ok(Self {
            symbol,
            observations,
        })
    }

    /// Build a series from `(date, price)` pairs.
    pub fn from_pairs(
        symbol: impl Into<Symbol>,
        pairs: impl IntoIterator<Item = (Date, f64)>,
    ) -> Result<Self> {
        let observations = pairs
            .into_iter()
            .map(|(date, value)| Observation::new(date, value))
            .collect();
        Self::new(symbol, observations)
    }

    /// Symbol this series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Observations in date order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Prices in date order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Date of the first observation.
    pub fn first_date(&self) -> Option<Date> {
        self.observations.first().map(|o| o.date)
    }

    /// Date of the last observation.
    pub fn last_date(&self) -> Option<Date> {
        self.observations.last().map(|o| o.date)
    }

    /// First observation with a finite price.
    pub fn first_valid(&self) -> Option<Observation> {
        self.observations.iter().find(|o| o.value.is_finite()).copied()
    }

    /// Last observation with a finite price.
    pub fn last_valid(&self) -> Option<Observation> {
        self.observations
            .iter()
            .rev()
            .find(|o| o.value.is_finite())
            .copied()
    }

    /// A new series holding the observations for which `keep` returns true.
    pub fn filter_dates(&self, mut keep: impl FnMut(Date) -> bool) -> Self {
        Self {
            symbol: self.symbol.clone(),
            observations: self
                .observations
                .iter()
                .filter(|o| keep(o.date))
                .copied()
                .collect(),
        }
    }
}

/// Period-over-period returns of one security or index, ascending by date.
///
/// Each return is dated at the later of the two prices it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    symbol: Symbol,
    observations: Vec<Observation>,
}

impl ReturnSeries {
    /// Build a return series, sorting the observations by date.
    ///
    /// # Errors
    ///
    /// Returns [`FaroError::InvalidData`] if two observations share a date.
    pub fn new(symbol: impl Into<Symbol>, observations: Vec<Observation>) -> Result<Self> {
        let symbol = symbol.into();
        let observations = into_ordered(&symbol, observations)?;
        Ok(Self {
            symbol,
            observations,
        })
    }

    /// Build a return series from `(date, return)` pairs.
    pub fn from_pairs(
        symbol: impl Into<Symbol>,
        pairs: impl IntoIterator<Item = (Date, f64)>,
    ) -> Result<Self> {
        let observations = pairs
            .into_iter()
            .map(|(date, value)| Observation::new(date, value))
            .collect();
        Self::new(symbol, observations)
    }

    /// Symbol this series belongs to.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Observations in date order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Returns in date order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series has no returns.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Inner join with `other` on date.
    ///
    /// Returns `(self, other)` value pairs for every date present in both
    /// series, in date order.
    pub fn align(&self, other: &Self) -> Vec<(Date, f64, f64)> {
        let (mut i, mut j) = (0, 0);
        let (left, right) = (&self.observations, &other.observations);
        let mut pairs = Vec::with_capacity(left.len().min(right.len()));

        while i < left.len() && j < right.len() {
            match left[i].date.cmp(&right[j].date) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    pairs.push((left[i].date, left[i].value, right[j].value));
                    i += 1;
                    j += 1;
                }
            }
        }

        pairs
    }
}
