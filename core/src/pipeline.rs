//! The two batch stages, wired end to end.
//!
//! STAGE ORDER:
//!   1. Generate: validate config, draw every record, write the file.
//!   2. Analyze:  read the file, compute the analysis, render charts.
//!
//! The stages share nothing but the file on disk.

use crate::{
    analysis::DatasetAnalysis,
    charts,
    config::{AnalysisConfig, GeneratorConfig},
    dataset::{self, LoadedDataset, NullCount},
    error::{DatasetError, DatasetResult},
    generator::ComplaintGenerator,
    record::ComplaintRecord,
};
use std::path::{Path, PathBuf};

pub struct GenerationRun {
    pub output: PathBuf,
    pub records: Vec<ComplaintRecord>,
    pub null_counts: Vec<NullCount>,
}

/// Generate `config.rows` records and write them to `output`.
/// Configuration errors surface before any record is drawn.
pub fn run_generation(config: GeneratorConfig, output: &Path) -> DatasetResult<GenerationRun> {
    let records = ComplaintGenerator::new(config)?.generate();
    let null_counts = dataset::null_counts(&records)?;
    dataset::write_csv(output, &records)?;
    Ok(GenerationRun {
        output: output.to_path_buf(),
        records,
        null_counts,
    })
}

pub struct AnalysisRun {
    pub loaded: LoadedDataset,
    pub analysis: DatasetAnalysis,
    pub charts: Vec<PathBuf>,
}

/// Load `config.input`, analyze it, and render charts into `config.charts_dir`.
pub fn run_analysis(config: &AnalysisConfig) -> DatasetResult<AnalysisRun> {
    let loaded = dataset::read_csv(&config.input)?;
    if loaded.records.is_empty() {
        return Err(DatasetError::EmptyDataset(config.input.clone()));
    }
    let analysis = DatasetAnalysis::compute(&loaded.records, config);
    let charts = charts::render_all(
        &analysis,
        &loaded.records,
        &config.charts_dir,
        config.histogram_bins,
    )?;
    Ok(AnalysisRun {
        loaded,
        analysis,
        charts,
    })
}
