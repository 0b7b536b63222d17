//! Universe listing command implementation.

use anyhow::Result;
use faro_fmp::{Constituent, FmpClient};

use crate::render::banner;

/// Print the S&P 500 constituents, grouped by sector.
pub(crate) async fn list_universe(limit: Option<usize>) -> Result<()> {
    let client = FmpClient::from_env()?;
    let constituents = client.sp500_constituents().await?;

    print!("{}", format_universe(&constituents, limit));
    Ok(())
}

fn format_universe(constituents: &[Constituent], limit: Option<usize>) -> String {
    let mut sorted: Vec<&Constituent> = constituents.iter().collect();
    sorted.sort_by(|a, b| a.sector.cmp(&b.sector).then_with(|| a.symbol.cmp(&b.symbol)));
    let shown = limit.unwrap_or(sorted.len()).min(sorted.len());

    let mut out = banner("S&P 500 Constituents");
    out.push('\n');

    let mut current: Option<&str> = None;
    for c in &sorted[..shown] {
        let sector = c.sector.as_deref().unwrap_or("Unclassified");
        if current != Some(sector) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{}:\n{}\n", sector, "-".repeat(60)));
            current = Some(sector);
        }
        out.push_str(&format!("  {:<8} {}\n", c.symbol, c.name));
    }

    out.push_str(&format!(
        "\nShowing {} of {} symbols.\n",
        shown,
        constituents.len()
    ));
    out
}
