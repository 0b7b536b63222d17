//! Financial Modeling Prep (FMP) API client for faro.
//!
//! This crate fetches the data a CAPM evaluation needs from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API:
//! S&P 500 constituents, end-of-day prices and treasury yields. The client
//! implements [`faro_traits::PriceSource`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use faro_fmp::FmpClient;
//! use faro_traits::{DateRange, PriceField, PriceSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!     let range = DateRange::default();
//!
//!     let universe = client.constituents().await?;
//!     let prices = client.price_history("AAPL", &range, PriceField::Open).await?;
//!     let rates = client.risk_free_rates(&range).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
