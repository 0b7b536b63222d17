//! Console and JSON rendering of evaluation reports.

use std::fmt::Write;

use clap::ValueEnum;
use faro_capm::{CapmReport, ReportPrecision};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable tables.
    #[default]
    Text,
    /// Pretty-printed JSON on stdout.
    Json,
}

pub(crate) fn banner(title: &str) -> String {
    format!(
        "\n╔══════════════════════════════════════════════════════════════╗\n\
         ║{title:^62}║\n\
         ╚══════════════════════════════════════════════════════════════╝\n"
    )
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{RULE}\n{title}\n{RULE}\n");
}

/// Render a report as console tables.
///
/// Values are printed with the digits of `precision`; the report is expected
/// to have been rounded with the same precision.
pub(crate) fn render_text(report: &CapmReport, precision: ReportPrecision) -> String {
    let b = precision.beta as usize;
    let y = precision.yield_pct as usize;
    let mut out = banner("CAPM vs. Random Portfolio");

    let _ = writeln!(out, "Period:     {}", report.period);
    let _ = writeln!(out, "Benchmark:  {}", report.benchmark);
    let _ = writeln!(out, "Portfolio:  {}", report.portfolio.symbols().join(", "));
    let _ = writeln!(out);

    section(&mut out, "BETAS");
    let _ = writeln!(
        out,
        "{:<10} {:>8} {:>10} {:>8} {:>12}",
        "Ticker", "Weight", "Beta", "Obs", "Yield %"
    );
    for row in &report.betas {
        let realized = row
            .realized_yield
            .map_or_else(|| "-".to_string(), |v| format!("{v:.y$}"));
        let _ = writeln!(
            out,
            "{:<10} {:>8.4} {:>10.b$} {:>8} {:>12}",
            row.symbol, row.weight, row.beta, row.observations, realized
        );
    }
    if !report.excluded.is_empty() {
        let _ = writeln!(out, "\nExcluded:");
        for exclusion in &report.excluded {
            let _ = writeln!(out, "  {:<10} {}", exclusion.symbol, exclusion.reason);
        }
    }
    let _ = writeln!(out);

    section(&mut out, "CAPM");
    let _ = writeln!(out, "  Portfolio beta:      {:>10.b$}", report.portfolio_beta);
    let _ = writeln!(out, "  Risk-free rate:      {:>10.y$}%", report.risk_free_rate);
    let _ = writeln!(out, "  Benchmark yield:     {:>10.y$}%", report.benchmark_yield);
    let _ = writeln!(out, "  CAPM expected:       {:>10.y$}%", report.expected_return);
    let _ = writeln!(out, "  Portfolio realized:  {:>10.y$}%", report.portfolio_yield);
    let gap = report.portfolio_yield - report.expected_return;
    let verdict = if report.outperformed() {
        "beat"
    } else {
        "fell short of"
    };
    let _ = writeln!(
        out,
        "\n  The portfolio {verdict} CAPM by {:.y$} percentage points.\n",
        gap.abs()
    );

    if !report.yearly.is_empty() {
        section(&mut out, "BY YEAR");
        let _ = writeln!(
            out,
            "{:<6} {:>11} {:>11} {:>10} {:>10} {:>8}",
            "Year", "Portfolio", "Benchmark", "Risk-free", "CAPM", "Tickers"
        );
        for row in &report.yearly {
            let _ = writeln!(
                out,
                "{:<6} {:>11.y$} {:>11.y$} {:>10.y$} {:>10.y$} {:>8}",
                row.year,
                row.portfolio_yield,
                row.benchmark_yield,
                row.risk_free_rate,
                row.expected_return,
                row.constituents
            );
        }
        let _ = writeln!(out);
    }

    out
}

/// Render a report as pretty-printed JSON.
pub(crate) fn render_json(report: &CapmReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
