//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{Constituent, HistoricalPrice, TreasuryRate, to_market_data, treasury_series},
};
use faro_traits::{DateRange, PriceField, PriceSeries, PriceSource, Symbol};
use reqwest::Client;
use std::env;
use tracing::{debug, warn};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        debug!(endpoint, "FMP request");
        let response = self.client.get(self.url(endpoint)).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        if text.contains("\"Error Message\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get the current S&P 500 constituents.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn sp500_constituents(&self) -> Result<Vec<Constituent>> {
        self.get("sp500-constituent").await
    }

    /// Get historical daily prices for a symbol, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::NoData`] if the API has no bars for the symbol in
    /// the range, or an error if the request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        range: &DateRange,
    ) -> Result<Vec<HistoricalPrice>> {
        let endpoint = format!(
            "historical-price-eod/full?symbol={}&from={}&to={}",
            symbol.to_uppercase(),
            range.start(),
            range.end()
        );
        // The stable API returns a flat array, newest first
        let mut bars: Vec<HistoricalPrice> = self.get(&endpoint).await?;
        if bars.is_empty() {
            return Err(FmpError::NoData(symbol.to_string()));
        }
        bars.reverse();
        debug!(symbol, bars = bars.len(), "fetched price history");
        Ok(bars)
    }

    /// Get daily treasury yields over a range.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn treasury_rates(&self, range: &DateRange) -> Result<Vec<TreasuryRate>> {
        let endpoint = format!("treasury-rates?from={}&to={}", range.start(), range.end());
        self.get(&endpoint).await
    }
}

impl PriceSource for FmpClient {
    async fn constituents(&self) -> faro_traits::Result<Vec<Symbol>> {
        let list = self.sp500_constituents().await?;
        Ok(list.into_iter().map(|c| c.symbol).collect())
    }

    async fn price_history(
        &self,
        symbol: &str,
        range: &DateRange,
        field: PriceField,
    ) -> faro_traits::Result<PriceSeries> {
        let bars = self.historical_prices(symbol, range).await?;
        let panel = to_market_data(symbol, &bars)?;
        panel.price_series(symbol, field)
    }

    async fn risk_free_rates(&self, range: &DateRange) -> faro_traits::Result<PriceSeries> {
        let rates = self.treasury_rates(range).await?;
        if rates.is_empty() {
            warn!(%range, "no treasury quotes returned");
        }
        treasury_series(&rates)
    }
}
