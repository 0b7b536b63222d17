//! faro CLI binary.
//!
//! Compares the CAPM expected return of a random equity portfolio with what
//! the portfolio actually realized.

mod chart;
mod cmd;
mod data;
mod render;

use std::{path::PathBuf, process, str::FromStr};

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use faro_capm::{DEFAULT_MAX_RATE_GAP_DAYS, RateUnit, RiskFreeConvention};
use faro_traits::{FaroError, PriceField};
use render::OutputFormat;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "faro")]
#[command(about = "CAPM expectations versus random portfolios", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a random portfolio from the S&P 500 and evaluate it
    Run {
        /// Number of tickers to sample
        #[arg(short = 'n', long = "count", default_value = "8")]
        n: usize,

        /// Seed for the sampler (OS entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        eval: EvalArgs,
    },

    /// Evaluate an explicit equal-weight portfolio
    Beta {
        /// Ticker symbols
        #[arg(short, long, value_delimiter = ',', required = true)]
        symbols: Vec<String>,

        #[command(flatten)]
        eval: EvalArgs,
    },

    /// List the constituent universe
    Universe {
        /// Show at most this many symbols
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Options shared by the evaluating subcommands.
#[derive(Args, Debug, Clone)]
pub(crate) struct EvalArgs {
    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) end: Option<String>,

    /// Benchmark index symbol
    #[arg(short, long, default_value = "^GSPC")]
    pub(crate) benchmark: String,

    /// Price used for returns and yields (open, close, adj-close)
    #[arg(long, default_value = "open", value_parser = parse_flag::<PriceField>)]
    pub(crate) price_field: PriceField,

    /// Unit of the risk-free quotes (percent, decimal)
    #[arg(long, default_value = "percent", value_parser = parse_flag::<RateUnit>)]
    pub(crate) rate_unit: RateUnit,

    /// Risk-free horizon convention (as-quoted, period-scaled)
    #[arg(long, default_value = "as-quoted", value_parser = parse_flag::<RiskFreeConvention>)]
    pub(crate) risk_free: RiskFreeConvention,

    /// Days a risk-free quote may lie from the start of a period
    #[arg(long, default_value_t = DEFAULT_MAX_RATE_GAP_DAYS)]
    pub(crate) max_rate_gap: i64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,

    /// Write a yearly SVG bar chart to this path
    #[arg(long)]
    pub(crate) chart: Option<PathBuf>,

    /// Maximum concurrent price requests
    #[arg(long, default_value = "8")]
    pub(crate) concurrency: usize,
}

fn parse_flag<T>(value: &str) -> Result<T, String>
where
    T: FromStr<Err = FaroError>,
{
    value.parse().map_err(|e: FaroError| e.to_string())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { n, seed, eval } => {
            cmd::run::run_random(n, seed, &eval).await?;
        }
        Commands::Beta { symbols, eval } => {
            cmd::beta::run_explicit(&symbols, &eval).await?;
        }
        Commands::Universe { limit } => {
            cmd::universe::list_universe(limit).await?;
        }
    }

    Ok(())
}
