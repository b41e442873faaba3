//! Console rendering of the structural checks and analysis findings.

use crate::{
    analysis::{CityCount, DatasetAnalysis, RiskDistribution},
    dataset::{LoadedDataset, NullCount},
    record::COLUMNS,
    stats::Summary,
};
use std::fmt::Write;

const COLUMN_TYPES: [&str; 8] = [
    "string", "datetime", "category", "float64", "category", "int64", "category", "bool",
];

/// Row count, columns with their types and non-null counts.
pub fn structure(loaded: &LoadedDataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Shape and Types ---");
    let _ = writeln!(out, "source:  {}", loaded.path.display());
    let _ = writeln!(out, "rows:    {}", loaded.total_rows);
    let _ = writeln!(out, "columns: {}", COLUMNS.len());
    for ((column, ty), nulls) in COLUMNS.iter().zip(COLUMN_TYPES).zip(&loaded.null_counts) {
        let non_null = loaded.total_rows - nulls.nulls;
        let _ = writeln!(out, "  {column:<20} {non_null:>8} non-null  {ty}");
    }
    out
}

pub fn null_counts(loaded: &LoadedDataset) -> String {
    let mut out = column_nulls(&loaded.null_counts);
    if loaded.dropped_rows > 0 {
        let _ = writeln!(out, "  ({} row(s) with nulls excluded from analysis)", loaded.dropped_rows);
    }
    out
}

/// The null table on its own, for data that has not been through a file.
pub fn column_nulls(counts: &[NullCount]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Null Values ---");
    for n in counts {
        let _ = writeln!(out, "  {:<20} {}", n.column, n.nulls);
    }
    out
}

pub fn risk_distribution(dist: &RiskDistribution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Risk distribution:");
    let _ = writeln!(out, "  0  {}", dist.low_risk);
    let _ = writeln!(out, "  1  {}", dist.high_risk);
    out
}

fn fmt_stat(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.2}")
    }
}

/// Side-by-side describe() table for amount and time-to-withdrawal.
pub fn summary_statistics(analysis: &DatasetAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Summary Statistics ---");
    let _ = writeln!(out, "{:<8} {:>16} {:>20}", "", "fraud_amount", "time_to_withdrawal");

    let (Some(a), Some(t)) = (&analysis.amount_summary, &analysis.withdrawal_summary) else {
        let _ = writeln!(out, "(no rows)");
        return out;
    };
    let rows: [(&str, fn(&Summary) -> f64); 8] = [
        ("count", |s| s.count as f64),
        ("mean", |s| s.mean),
        ("std", |s| s.std),
        ("min", |s| s.min),
        ("25%", |s| s.q25),
        ("50%", |s| s.median),
        ("75%", |s| s.q75),
        ("max", |s| s.max),
    ];
    for (label, get) in rows {
        let _ = writeln!(out, "{label:<8} {:>16} {:>20}", fmt_stat(get(a)), fmt_stat(get(t)));
    }
    out
}

pub fn fraud_type_frequency(analysis: &DatasetAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- Fraud Type Frequency ---");
    for c in &analysis.fraud_type_counts {
        let _ = writeln!(out, "  {:<22} {}", c.fraud_type.as_str(), c.count);
    }
    out
}

pub fn city_counts(counts: &[CityCount]) -> String {
    counts
        .iter()
        .map(|c| format!("  {:<12} {}", c.city.as_str(), c.count))
        .collect::<Vec<_>>()
        .join("\n")
}

/// High-risk share, hotspot cities, fast withdrawals and correlation.
pub fn findings(analysis: &DatasetAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Percentage of High-Risk Cases: {:.2}%", analysis.high_risk_pct);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Top {} Withdrawal Cities for High-Risk Cases:",
        analysis.top_high_risk_cities.len()
    );
    if analysis.top_high_risk_cities.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(out, "{}", city_counts(&analysis.top_high_risk_cities));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "--- Anomalies/Biases ---");
    let _ = writeln!(
        out,
        "Number of cases with < {} min withdrawal: {}",
        analysis.fast_withdrawal_minutes, analysis.fast_withdrawals
    );
    let corr = analysis
        .amount_time_correlation
        .map_or_else(|| "NaN".to_string(), |r| format!("{r:.4}"));
    let _ = writeln!(out, "Correlation between Amount and Time to Withdrawal: {corr}");
    let _ = writeln!(
        out,
        "Withdrawals in the victim's own city: {:.2}%",
        analysis.same_city_pct
    );
    out
}
