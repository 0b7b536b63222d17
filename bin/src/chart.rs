//! SVG bar chart of yearly portfolio, benchmark and CAPM yields.

use std::path::Path;

use anyhow::{Context, Result};
use faro_capm::YearlyYield;

const WIDTH: f64 = 720.0;
const HEIGHT: f64 = 360.0;
const LEFT_PAD: f64 = 48.0;
const RIGHT_PAD: f64 = 16.0;
const TOP_PAD: f64 = 40.0;
const BOTTOM_PAD: f64 = 28.0;

/// One bar of every year group, left to right.
const SERIES: [(&str, &str); 3] = [
    ("Benchmark", "#1f4e9c"),
    ("Portfolio", "#c0392b"),
    ("CAPM expected", "#212121"),
];

fn values(row: &YearlyYield) -> [f64; 3] {
    [row.benchmark_yield, row.portfolio_yield, row.expected_return]
}

/// Value range shown on the y axis; always includes zero.
fn extent(years: &[YearlyYield]) -> (f64, f64) {
    let (mut lo, mut hi) = years
        .iter()
        .flat_map(values)
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Escape text for use as XML character data.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Grouped bars per calendar year, in percent.
pub(crate) fn render_svg(years: &[YearlyYield], title: &str) -> String {
    let (min_v, max_v) = extent(years);
    let inner_height = HEIGHT - TOP_PAD - BOTTOM_PAD;
    let value_to_y = |v: f64| TOP_PAD + (max_v - v) / (max_v - min_v) * inner_height;
    let zero_y = value_to_y(0.0);

    let group_width = (WIDTH - LEFT_PAD - RIGHT_PAD) / (years.len() as f64).max(1.0);
    let bar_width = group_width * 0.25;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}"><style>text{{font-family:Arial,sans-serif;font-size:11px;fill:#555}}</style>"#
    );
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="20" text-anchor="middle" fill="#222" font-size="14">{title}</text>"##,
        x = WIDTH / 2.0,
        title = escape_xml(title)
    ));
    svg.push_str(&format!(
        r##"<line x1="{LEFT_PAD}" y1="{zero_y:.2}" x2="{x2:.2}" y2="{zero_y:.2}" stroke="#999" stroke-width="1" />"##,
        x2 = WIDTH - RIGHT_PAD
    ));
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{max_v:.0}%</text><text x="{x:.2}" y="{y2:.2}" text-anchor="end">{min_v:.0}%</text>"##,
        x = LEFT_PAD - 6.0,
        y = TOP_PAD + 4.0,
        y2 = HEIGHT - BOTTOM_PAD
    ));

    for (idx, row) in years.iter().enumerate() {
        let cx = LEFT_PAD + (idx as f64 + 0.5) * group_width;
        svg.push_str(&format!(
            r#"<text x="{cx:.2}" y="{y:.2}" text-anchor="middle">{year}</text>"#,
            y = HEIGHT - BOTTOM_PAD + 16.0,
            year = row.year
        ));

        for (i, (value, (_, color))) in values(row).into_iter().zip(SERIES).enumerate() {
            if !value.is_finite() {
                continue;
            }
            let y_val = value_to_y(value);
            let (top, bottom) = if value >= 0.0 {
                (y_val, zero_y)
            } else {
                (zero_y, y_val)
            };
            let x = cx + (i as f64 - 1.5) * bar_width;
            svg.push_str(&format!(
                r#"<rect x="{x:.2}" y="{top:.2}" width="{w:.2}" height="{h:.2}" fill="{color}"><title>{value:.2}%</title></rect>"#,
                w = bar_width,
                h = bottom - top
            ));
        }
    }

    let mut y = TOP_PAD;
    for (label, color) in SERIES {
        let x = WIDTH - RIGHT_PAD - 120.0;
        svg.push_str(&format!(
            r#"<rect x="{x:.2}" y="{ry:.2}" width="10" height="10" fill="{color}" /><text x="{tx:.2}" y="{y:.2}">{label}</text>"#,
            ry = y - 9.0,
            tx = x + 16.0
        ));
        y += 16.0;
    }

    svg.push_str("</svg>");
    svg
}

/// Render the chart to `path`.
pub(crate) fn write_svg(path: &Path, years: &[YearlyYield], title: &str) -> Result<()> {
    std::fs::write(path, render_svg(years, title))
        .with_context(|| format!("failed to write chart to {}", path.display()))
}
