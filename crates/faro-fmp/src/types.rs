//! Data types for FMP API responses.

use chrono::NaiveDate;
use faro_traits::{MarketData, Observation, PriceField, PriceSeries};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Symbol under which treasury quotes are stored as a [`PriceSeries`].
pub const TREASURY_3M_SYMBOL: &str = "UST3M";

/// Member of the S&P 500 constituent list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constituent {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// GICS sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// GICS sub-industry.
    #[serde(default)]
    pub sub_sector: Option<String>,
    /// Date the company joined the index.
    #[serde(default)]
    pub date_first_added: Option<String>,
}

/// Historical price data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Adjusted close. Not every endpoint variant carries it.
    #[serde(rename = "adjClose", default)]
    pub adj_close: Option<f64>,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Price for the requested field, if the bar carries it.
    #[must_use]
    pub const fn price(&self, field: PriceField) -> Option<f64> {
        match field {
            PriceField::Open => Some(self.open),
            PriceField::Close => Some(self.close),
            PriceField::AdjClose => self.adj_close,
        }
    }
}

/// Daily US treasury par yields, in percent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryRate {
    /// Date.
    pub date: String,
    /// 1-month yield.
    #[serde(default)]
    pub month1: Option<f64>,
    /// 3-month yield.
    #[serde(default)]
    pub month3: Option<f64>,
    /// 6-month yield.
    #[serde(default)]
    pub month6: Option<f64>,
    /// 1-year yield.
    #[serde(default)]
    pub year1: Option<f64>,
    /// 10-year yield.
    #[serde(default)]
    pub year10: Option<f64>,
}

impl TreasuryRate {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Build a long-format [`MarketData`] panel from one symbol's bars.
///
/// Columns: `symbol`, `date`, `open`, `close`, `adj_close`. A missing
/// adjusted close becomes a null.
///
/// # Errors
///
/// Returns an error if the DataFrame cannot be assembled.
pub fn to_market_data(symbol: &str, bars: &[HistoricalPrice]) -> Result<MarketData> {
    let mut columns = vec![
        Column::new("symbol".into(), vec![symbol; bars.len()]),
        Column::new(
            "date".into(),
            bars.iter().map(|b| b.date.as_str()).collect::<Vec<_>>(),
        ),
    ];
    for field in [PriceField::Open, PriceField::Close, PriceField::AdjClose] {
        let prices: Vec<Option<f64>> = bars.iter().map(|b| b.price(field)).collect();
        columns.push(Column::new(field.column().into(), prices));
    }

    Ok(MarketData::new(DataFrame::new(columns)?))
}

/// Turn treasury quotes into a 3-month rate series, in percent.
///
/// Rows with an unparseable date are skipped; a missing 3-month quote is
/// carried as NaN.
///
/// # Errors
///
/// Returns an error if two rows share a date.
pub fn treasury_series(rates: &[TreasuryRate]) -> faro_traits::Result<PriceSeries> {
    let observations = rates
        .iter()
        .filter_map(|r| {
            r.parsed_date()
                .map(|date| Observation::new(date, r.month3.unwrap_or(f64::NAN)))
        })
        .collect();

    PriceSeries::new(TREASURY_3M_SYMBOL, observations)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARS: &str = r#"[
        {"symbol":"AAPL","date":"2024-01-03","open":184.22,"high":185.88,"low":183.43,"close":184.25,"volume":58414460},
        {"symbol":"AAPL","date":"2024-01-02","open":187.15,"high":188.44,"low":183.89,"close":185.64,"adjClose":185.1,"volume":82488700}
    ]"#;

    #[test]
    fn test_parse_historical_prices() {
        let bars: Vec<HistoricalPrice> = serde_json::from_str(BARS).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].parsed_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(bars[0].adj_close, None);
        assert_eq!(bars[1].price(PriceField::AdjClose), Some(185.1));
        assert_eq!(bars[1].price(PriceField::Open), Some(187.15));
    }

    #[test]
    fn test_market_data_panel() {
        let bars: Vec<HistoricalPrice> = serde_json::from_str(BARS).unwrap();
        let panel = to_market_data("AAPL", &bars).unwrap();

        assert_eq!(panel.len(), 2);
        assert_eq!(panel.symbols().unwrap(), vec!["AAPL"]);

        let series = panel.price_series("AAPL", PriceField::Open).unwrap();
        assert_eq!(series.values(), vec![187.15, 184.22]);

        let adjusted = panel.price_series("AAPL", PriceField::AdjClose).unwrap();
        assert_eq!(adjusted.values()[0], 185.1);
        assert!(adjusted.values()[1].is_nan());
    }

    #[test]
    fn test_parse_constituents() {
        let json = r#"[{"symbol":"AAPL","name":"Apple Inc.","sector":"Information Technology",
            "subSector":"Technology Hardware, Storage & Peripherals","headQuarter":"Cupertino, CA",
            "dateFirstAdded":"1982-11-30","cik":"0000320193","founded":"1977"}]"#;
        let list: Vec<Constituent> = serde_json::from_str(json).unwrap();
        assert_eq!(list[0].symbol, "AAPL");
        assert_eq!(list[0].sector.as_deref(), Some("Information Technology"));
    }

    #[test]
    fn test_treasury_series() {
        let json = r#"[
            {"date":"2024-01-03","month1":5.54,"month3":5.48,"year10":3.91},
            {"date":"2024-01-02","month1":5.55,"month3":5.46,"year10":3.95},
            {"date":"2024-01-01"}
        ]"#;
        let rates: Vec<TreasuryRate> = serde_json::from_str(json).unwrap();
        let series = treasury_series(&rates).unwrap();

        assert_eq!(series.symbol(), TREASURY_3M_SYMBOL);
        assert_eq!(series.len(), 3);
        assert!(series.values()[0].is_nan());
        assert_eq!(series.first_valid().map(|o| o.value), Some(5.46));
    }
}
