//! CLI subcommand modules.
//!
//! `run` and `beta` differ only in how the portfolio is chosen; both hand off
//! to [`evaluate`] for loading, evaluation and output.

pub(crate) mod beta;
pub(crate) mod run;
pub(crate) mod universe;

use anyhow::Result;
use faro_capm::{CapmEvaluator, CapmReport, EvaluatorConfig, Portfolio, RatePolicy};
use faro_traits::PriceSource;
use tracing::{info, warn};

use crate::{
    EvalArgs, chart,
    data::{self, LoadRequest},
    render::{self, OutputFormat},
};

/// Evaluator configuration derived from the command-line options.
pub(crate) fn evaluator_config(args: &EvalArgs) -> Result<EvaluatorConfig> {
    Ok(EvaluatorConfig {
        period: data::parse_range(args.start.as_deref(), args.end.as_deref())?,
        rates: RatePolicy {
            unit: args.rate_unit,
            convention: args.risk_free,
            max_gap_days: args.max_rate_gap,
        },
        ..Default::default()
    })
}

/// Replace the generic "not found" exclusion of tickers whose fetch failed
/// with the fetch error itself.
fn attach_fetch_failures(
    report: &mut CapmReport,
    failures: &std::collections::BTreeMap<String, String>,
) {
    for exclusion in &mut report.excluded {
        if let Some(reason) = failures.get(&exclusion.symbol) {
            exclusion.reason.clone_from(reason);
        }
    }
}

/// Load data for `portfolio`, evaluate it and print the report.
pub(crate) async fn evaluate<S: PriceSource>(
    source: &S,
    portfolio: Portfolio,
    args: &EvalArgs,
) -> Result<()> {
    let config = evaluator_config(args)?;
    let request = LoadRequest {
        benchmark: args.benchmark.clone(),
        range: config.period,
        field: args.price_field,
        concurrency: args.concurrency,
    };

    let loaded = data::load_inputs(source, portfolio, &request).await?;

    info!("evaluating portfolio");
    let precision = config.precision;
    let evaluator = CapmEvaluator::new(config);
    let mut report = evaluator.evaluate(&loaded.inputs)?;
    attach_fetch_failures(&mut report, &loaded.failures);

    for exclusion in &report.excluded {
        warn!(symbol = %exclusion.symbol, reason = %exclusion.reason, "ticker excluded");
    }

    let rounded = report.rounded(precision);
    match args.format {
        OutputFormat::Text => print!("{}", render::render_text(&rounded, precision)),
        OutputFormat::Json => println!("{}", render::render_json(&rounded)?),
    }

    if let Some(path) = &args.chart {
        let title = format!(
            "Yearly yields: portfolio vs {} vs CAPM",
            report.benchmark
        );
        chart::write_svg(path, &report.yearly, &title)?;
        info!(path = %path.display(), "chart written");
    }

    Ok(())
}
