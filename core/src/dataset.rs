//! Delimited-file I/O for complaint tables.

use crate::{
    error::{DatasetError, DatasetResult},
    record::{ComplaintRecord, COLUMNS},
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Write `records` with a header row. Parent directories are created.
pub fn write_csv(path: impl AsRef<Path>, records: &[ComplaintRecord]) -> DatasetResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| DatasetError::io(path, e))?;
    write_to(BufWriter::new(file), records, path)?;
    log::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Serialize to any writer. `path` is only used to label errors.
pub fn write_to<W: Write>(writer: W, records: &[ComplaintRecord], path: &Path) -> DatasetResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)
        .map_err(|e| DatasetError::csv(path, e))?;
    for record in records {
        wtr.serialize(record).map_err(|e| DatasetError::csv(path, e))?;
    }
    wtr.flush().map_err(|e| DatasetError::io(path, e))?;
    Ok(())
}

/// Empty-field count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NullCount {
    pub column: String,
    pub nulls: usize,
}

/// A table read back from disk plus its structural checks.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub path: PathBuf,
    pub records: Vec<ComplaintRecord>,
    /// Data rows in the file, including rows dropped for nulls.
    pub total_rows: usize,
    pub null_counts: Vec<NullCount>,
    pub dropped_rows: usize,
}

impl LoadedDataset {
    pub fn total_nulls(&self) -> usize {
        self.null_counts.iter().map(|n| n.nulls).sum()
    }
}

/// Per-column empty-field counts for `records` as they serialize, using the
/// same rule `read_from` applies to a file.
pub fn null_counts(records: &[ComplaintRecord]) -> DatasetResult<Vec<NullCount>> {
    let label = Path::new("<in-memory>");
    let mut buf = Vec::new();
    write_to(&mut buf, records, label)?;
    Ok(read_from(buf.as_slice(), label)?.null_counts)
}

pub fn read_csv(path: impl AsRef<Path>) -> DatasetResult<LoadedDataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DatasetError::io(path, e))?;
    let loaded = read_from(file, path)?;
    log::info!(
        "Loaded {} of {} rows from {}",
        loaded.records.len(),
        loaded.total_rows,
        path.display()
    );
    Ok(loaded)
}

/// Parse a table from any reader. Every expected column must be present;
/// extra columns are ignored. Rows with an empty expected field are counted
/// as nulls and left out of `records`.
pub fn read_from<R: Read>(reader: R, path: &Path) -> DatasetResult<LoadedDataset> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().map_err(|e| DatasetError::csv(path, e))?.clone();

    let mut positions = Vec::with_capacity(COLUMNS.len());
    for column in COLUMNS {
        let pos = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| DatasetError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            })?;
        positions.push(pos);
    }

    let mut nulls = vec![0usize; COLUMNS.len()];
    let mut records = Vec::new();
    let mut total_rows = 0;
    let mut dropped_rows = 0;

    for row in rdr.records() {
        let row = row.map_err(|e| DatasetError::csv(path, e))?;
        total_rows += 1;

        let mut has_null = false;
        for (i, &pos) in positions.iter().enumerate() {
            if row.get(pos).map_or(true, |v| v.trim().is_empty()) {
                nulls[i] += 1;
                has_null = true;
            }
        }
        if has_null {
            dropped_rows += 1;
            continue;
        }

        let record: ComplaintRecord = row
            .deserialize(Some(&headers))
            .map_err(|e| DatasetError::csv(path, e))?;
        records.push(record);
    }

    if dropped_rows > 0 {
        log::warn!(
            "{dropped_rows} row(s) in {} contain empty fields and were skipped",
            path.display()
        );
    }

    Ok(LoadedDataset {
        path: path.to_path_buf(),
        records,
        total_rows,
        null_counts: COLUMNS
            .iter()
            .zip(nulls)
            .map(|(column, nulls)| NullCount {
                column: column.to_string(),
                nulls,
            })
            .collect(),
        dropped_rows,
    })
}
