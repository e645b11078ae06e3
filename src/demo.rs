//! Bundled sample dashboard.
//!
//! Exercises every element kind with a fixed dataset, so the emitted
//! document is reproducible across runs. Used by the `demo` subcommand.

use serde_json::json;

use crate::builder::{HeaderLevel, ReportBuilder};
use crate::chart::VegaLiteChart;
use crate::error::Result;
use crate::table::DataTable;

const REGIONS: [&str; 4] = ["LATAM", "EMEA", "NA", "APAC"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun",
    "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const REGION_COLORS: [&str; 4] = ["#aa423a", "#f6b404", "#327a88", "#303e55"];

const DEMO_CSS: &str = "
body {
  font-family: sans-serif;
  margin: 2rem;
}

h1 {
  color: #303e55;
}

p.lead {
  color: #555555;
  max-width: 48rem;
}

table.dataframe {
  border-collapse: collapse;
}

table.dataframe th,
table.dataframe td {
  padding: 4px 10px;
}
";

/// Fixed monthly sales figure for one region. Deterministic stand-in
/// for real transaction data.
fn monthly_amount(region: usize, month: usize) -> f64 {
    let wobble = ((region * 31 + month * 17) % 23) as f64;
    50_000.0 + (region as f64 + 1.0) * 12_500.0 + wobble * 1_850.0
}

/// Build the sample sales dashboard.
pub fn sample_report() -> Result<ReportBuilder> {
    let mut report = ReportBuilder::with_css(DEMO_CSS);

    report.insert_header("title", "2022 Sales Dashboard", HeaderLevel::H1, None);
    report.insert_text(
        "intro",
        "Yearly sales across all regions.\nFigures are aggregated per region and month.",
        Some("lead"),
    );

    let mut monthly_values = Vec::new();
    for (r, region) in REGIONS.iter().enumerate() {
        for (m, month) in MONTHS.iter().enumerate() {
            monthly_values.push(json!({
                "month": month,
                "region": region,
                "amount": monthly_amount(r, m),
            }));
        }
    }

    let monthly_chart = VegaLiteChart::from_value(json!({
        "title": "Monthly Sales",
        "width": 700,
        "data": {"values": monthly_values},
        "mark": "bar",
        "encoding": {
            "x": {"field": "month", "type": "ordinal", "sort": MONTHS},
            "y": {
                "aggregate": "sum",
                "field": "amount",
                "type": "quantitative",
                "title": "Total Sales"
            },
            "color": {
                "field": "region",
                "type": "nominal",
                "title": "Region",
                "scale": {"domain": REGIONS, "range": REGION_COLORS}
            }
        }
    }));
    report.insert_chart("monthly-sales", &monthly_chart, None)?;

    let region_totals: Vec<(usize, f64)> = REGIONS
        .iter()
        .enumerate()
        .map(|(r, _)| (r, (0..MONTHS.len()).map(|m| monthly_amount(r, m)).sum()))
        .collect();

    let pie_values: Vec<serde_json::Value> = region_totals
        .iter()
        .map(|(r, total)| json!({"region": REGIONS[*r], "amount": total}))
        .collect();

    let region_pie = VegaLiteChart::from_value(json!({
        "title": "Region Sales",
        "data": {"values": pie_values},
        "mark": {"type": "arc", "innerRadius": 50},
        "encoding": {
            "theta": {
                "field": "amount",
                "type": "quantitative",
                "title": "Sum of Transactions"
            },
            "color": {
                "field": "region",
                "type": "nominal",
                "title": "Region",
                "scale": {"domain": REGIONS, "range": REGION_COLORS}
            }
        }
    }));
    report.insert_chart("region-pie", &region_pie, None)?;

    let mut summary = DataTable::new(["total sales"]);
    for (_, total) in &region_totals {
        summary.push_row([format!("{total:.2}")])?;
    }
    summary.set_index(REGIONS)?;
    report.insert_header("summary-title", "Totals per region", HeaderLevel::H3, None);
    report.insert_table("region-summary", &summary, None, false);

    let mut monthly_table = DataTable::new(REGIONS);
    // wide layout: one row per month, one column per region
    for m in 0..MONTHS.len() {
        monthly_table.push_row(
            (0..REGIONS.len()).map(|r| format!("{:.2}", monthly_amount(r, m))),
        )?;
    }
    monthly_table.set_index(MONTHS)?;
    report.insert_header("monthly-title", "Monthly breakdown", HeaderLevel::H3, None);
    report.insert_table("monthly-breakdown", &monthly_table, None, true);

    Ok(report)
}
