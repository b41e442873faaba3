//! Static SVG charts for the exploratory analysis.
//!
//! Each chart is written once into the charts directory and the backend is
//! dropped before the next one is opened.

use crate::{
    analysis::{DatasetAnalysis, TypeCount, TypeDistribution, TypeMean},
    error::{DatasetError, DatasetResult},
    record::ComplaintRecord,
    stats,
    types::City,
};
use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::{Path, PathBuf};

pub const DIST_FRAUD_AMOUNT: &str = "dist_fraud_amount.svg";
pub const DIST_TIME_WITHDRAWAL: &str = "dist_time_withdrawal.svg";
pub const FREQ_FRAUD_TYPE: &str = "freq_fraud_type.svg";
pub const HEATMAP_CITIES: &str = "heatmap_cities.svg";
pub const AVG_AMOUNT_BY_TYPE: &str = "avg_amount_by_type.svg";
pub const TIME_WITHDRAWAL_BY_TYPE: &str = "time_withdrawal_by_type.svg";
pub const HOURLY_HIGH_RISK: &str = "hourly_high_risk.svg";

const WIDE: (u32, u32) = (1200, 600);
const SQUARE: (u32, u32) = (1200, 1000);
const FONT: &str = "sans-serif";

/// Render every chart into `dir`, creating it if absent.
/// Returns the written paths in a fixed order.
pub fn render_all(
    analysis: &DatasetAnalysis,
    records: &[ComplaintRecord],
    dir: &Path,
    histogram_bins: usize,
) -> DatasetResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| DatasetError::io(dir, e))?;

    let amounts: Vec<f64> = records.iter().map(|r| r.fraud_amount).collect();
    let minutes: Vec<f64> = records.iter().map(|r| f64::from(r.time_to_withdrawal)).collect();
    let quartiles = withdrawal_quartiles(records, &analysis.withdrawal_by_type);

    let written = vec![
        render(dir, DIST_FRAUD_AMOUNT, |p| {
            draw_histogram(p, "Distribution of Fraud Amount", "Amount (INR)", &amounts, histogram_bins, RED)
        })?,
        render(dir, DIST_TIME_WITHDRAWAL, |p| {
            draw_histogram(p, "Distribution of Time to Withdrawal", "Time (Minutes)", &minutes, histogram_bins, BLUE)
        })?,
        render(dir, FREQ_FRAUD_TYPE, |p| draw_type_frequency(p, &analysis.fraud_type_counts))?,
        render(dir, HEATMAP_CITIES, |p| draw_city_heatmap(p, analysis))?,
        render(dir, AVG_AMOUNT_BY_TYPE, |p| draw_mean_amount(p, &analysis.mean_amount_by_type))?,
        render(dir, TIME_WITHDRAWAL_BY_TYPE, |p| draw_withdrawal_boxes(p, &analysis.withdrawal_by_type, &quartiles))?,
        render(dir, HOURLY_HIGH_RISK, |p| draw_hourly(p, &analysis.hourly_high_risk))?,
    ];
    log::info!("Rendered {} charts into {}", written.len(), dir.display());
    Ok(written)
}

fn render<F>(dir: &Path, name: &str, draw: F) -> DatasetResult<PathBuf>
where
    F: FnOnce(&Path) -> anyhow::Result<()>,
{
    let path = dir.join(name);
    draw(&path).map_err(|source| DatasetError::Chart {
        path: path.clone(),
        source,
    })?;
    log::debug!("rendered {}", path.display());
    Ok(path)
}

fn segment_label<S: AsRef<str>>(v: &SegmentValue<u32>, labels: &[S]) -> String {
    match v {
        SegmentValue::CenterOf(i) => labels
            .get(*i as usize)
            .map(|s| s.as_ref().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Index of the last segment for `n` categories (segmented ranges are inclusive).
fn last_segment(n: usize) -> u32 {
    n.max(1) as u32 - 1
}

fn draw_histogram(
    path: &Path,
    title: &str,
    x_desc: &str,
    values: &[f64],
    bins: usize,
    color: RGBColor,
) -> anyhow::Result<()> {
    let bins = stats::histogram(values, bins);
    let lo = bins.first().map_or(0.0, |b| b.lo);
    let hi = bins.last().map_or(1.0, |b| b.hi);
    let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0) + 1;

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0u32..y_max)?;

    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Count")
        .draw()?;

    chart.draw_series(
        bins.iter()
            .map(|b| Rectangle::new([(b.lo, 0), (b.hi, b.count)], color.mix(0.7).filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_type_frequency(path: &Path, counts: &[TypeCount]) -> anyhow::Result<()> {
    let labels: Vec<&str> = counts.iter().map(|c| c.fraud_type.as_str()).collect();
    let x_max = counts.iter().map(|c| c.count).max().unwrap_or(0) as u32;

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Frequency of Fraud Types", (FONT, 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(180)
        .build_cartesian_2d(0u32..x_max + x_max / 20 + 1, (0u32..last_segment(labels.len())).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len().max(1))
        .y_label_formatter(&|v| segment_label(v, &labels))
        .x_desc("count")
        .draw()?;

    chart.draw_series(
        Histogram::horizontal(&chart)
            .style(RGBColor(68, 1, 84).mix(0.8).filled())
            .margin(8)
            .data(counts.iter().enumerate().map(|(i, c)| (i as u32, c.count as u32))),
    )?;

    root.present()?;
    Ok(())
}

fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    RGBColor(lerp(255, 8), lerp(255, 29), lerp(217, 88))
}

fn draw_city_heatmap(path: &Path, analysis: &DatasetAnalysis) -> anyhow::Result<()> {
    let names: Vec<&str> = City::ALL.iter().map(|c| c.as_str()).collect();
    let last = last_segment(names.len());
    let max = analysis.city_crosstab.max().max(1) as f64;

    let root = SVGBackend::new(path, SQUARE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Victim City vs Withdrawal City Frequency", (FONT, 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d((0u32..last).into_segmented(), (0u32..last).into_segmented())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(names.len())
        .y_labels(names.len())
        .x_label_formatter(&|v| segment_label(v, &names))
        .y_label_formatter(&|v| segment_label(v, &names))
        .x_desc("withdrawal_city")
        .y_desc("victim_city")
        .draw()?;

    let cells: Vec<(u32, u32, usize)> = City::ALL
        .iter()
        .flat_map(|&victim| {
            City::ALL.iter().map(move |&withdrawal| {
                (
                    withdrawal.index() as u32,
                    victim.index() as u32,
                    analysis.city_crosstab.get(victim, withdrawal),
                )
            })
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(x, y, count)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
            ],
            heat_color(count as f64 / max).filled(),
        )
    }))?;

    let label_style = (FONT, 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.iter().map(|&(x, y, count)| {
        let style = if count as f64 / max > 0.6 {
            label_style.color(&WHITE)
        } else {
            label_style.clone()
        };
        Text::new(
            count.to_string(),
            (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
            style,
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_mean_amount(path: &Path, means: &[TypeMean]) -> anyhow::Result<()> {
    let labels: Vec<&str> = means.iter().map(|m| m.fraud_type.as_str()).collect();
    let x_max = means.iter().map(|m| m.mean_amount).fold(0.0, f64::max) * 1.1 + 1.0;

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Average Fraud Amount by Type", (FONT, 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(180)
        .build_cartesian_2d(0.0..x_max, (0u32..last_segment(labels.len())).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len().max(1))
        .y_label_formatter(&|v| segment_label(v, &labels))
        .x_label_formatter(&|v| format!("{v:.0}"))
        .x_desc("fraud_amount")
        .draw()?;

    chart.draw_series(
        Histogram::horizontal(&chart)
            .style(RGBColor(183, 55, 121).mix(0.85).filled())
            .margin(8)
            .data(means.iter().enumerate().map(|(i, m)| (i as u32, m.mean_amount))),
    )?;

    root.present()?;
    Ok(())
}

/// One quartile set per fraud type, in the order of `dists`.
fn withdrawal_quartiles(records: &[ComplaintRecord], dists: &[TypeDistribution]) -> Vec<Quartiles> {
    dists
        .iter()
        .map(|d| {
            let minutes: Vec<u32> = records
                .iter()
                .filter(|r| r.fraud_type == d.fraud_type)
                .map(|r| r.time_to_withdrawal)
                .collect();
            Quartiles::new(&minutes)
        })
        .collect()
}

fn draw_withdrawal_boxes(
    path: &Path,
    dists: &[TypeDistribution],
    quartiles: &[Quartiles],
) -> anyhow::Result<()> {
    let labels: Vec<&str> = dists.iter().map(|d| d.fraud_type.as_str()).collect();
    let x_max = dists.iter().map(|d| d.summary.max as f32).fold(0.0, f32::max);
    let x_max = quartiles
        .iter()
        .map(|q| q.values()[4])
        .fold(x_max, f32::max)
        * 1.05
        + 1.0;
    let x_min = quartiles.iter().map(|q| q.values()[0]).fold(0.0, f32::min);

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Time to Withdrawal by Fraud Type", (FONT, 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(180)
        .build_cartesian_2d(x_min..x_max, (0u32..last_segment(labels.len())).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(labels.len().max(1))
        .y_label_formatter(&|v| segment_label(v, &labels))
        .x_desc("time_to_withdrawal")
        .draw()?;

    chart.draw_series(quartiles.iter().enumerate().map(|(i, q)| {
        Boxplot::new_horizontal(SegmentValue::CenterOf(i as u32), q)
            .width(30)
            .whisker_width(0.5)
            .style(&RGBColor(59, 76, 192))
    }))?;

    root.present()?;
    Ok(())
}

fn draw_hourly(path: &Path, hourly: &[usize; 24]) -> anyhow::Result<()> {
    let y_max = hourly.iter().copied().max().unwrap_or(0) as u32;
    let hours: Vec<String> = (0..24).map(|h| h.to_string()).collect();

    let root = SVGBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("High-Risk Cases by Hour of Day", (FONT, 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..23).into_segmented(), 0u32..y_max + y_max / 20 + 1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(24)
        .x_label_formatter(&|v| segment_label(v, &hours))
        .x_desc("Hour (0-23)")
        .y_desc("Count of High-Risk Cases")
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(RGBColor(139, 0, 0).filled())
            .margin(4)
            .data(hourly.iter().enumerate().map(|(h, c)| (h as u32, *c as u32))),
    )?;

    root.present()?;
    Ok(())
}
