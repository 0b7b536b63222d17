//! CAPM evaluation of randomly sampled equity portfolios.
//!
//! This crate holds the numeric core of faro:
//! - Portfolio sampling from a ticker universe with an injected random source
//! - Simple daily returns and per-ticker beta against a benchmark
//! - Portfolio beta with weights re-normalized over the tickers that have data
//! - CAPM expected return, realized yields and a per-year breakdown
//!
//! Nothing here performs I/O. Price histories arrive as
//! [`faro_traits::PriceSeries`] values, typically loaded through a
//! [`faro_traits::PriceSource`].
//!
//! # Example
//!
//! ```rust,ignore
//! use faro_capm::{CapmEvaluator, CapmInputs, EvaluatorConfig, sample_portfolio};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let portfolio = sample_portfolio(&universe, 8, &mut rng)?;
//!
//! let inputs = CapmInputs { portfolio, prices, benchmark, risk_free };
//! let report = CapmEvaluator::new(EvaluatorConfig::default()).evaluate(&inputs)?;
//! ```

pub mod beta;
pub mod capm;
pub mod evaluator;
pub mod portfolio;
pub mod report;
pub mod returns;
pub mod yearly;

pub use beta::{BetaEstimate, benchmark_variance, compute_beta};
pub use capm::{
    DAYS_PER_YEAR, DEFAULT_MAX_RATE_GAP_DAYS, RateUnit, RiskFreeConvention, compute_capm,
    mean_realized_yield, normalize_risk_free, realized_yield, risk_free_at,
};
pub use evaluator::{CapmEvaluator, CapmInputs, EvaluatorConfig};
pub use portfolio::{Holding, Portfolio, PortfolioBeta, compute_portfolio_beta, sample_portfolio};
pub use report::{CapmReport, Exclusion, ReportPrecision, TickerBeta, round_to};
pub use returns::{MIN_PRICE_OBSERVATIONS, compute_returns};
pub use yearly::{RatePolicy, YearlyYield, yearly_yields};
