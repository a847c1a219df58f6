use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::error::{Result, SampleError};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a comma-separated file with a header row.
///
/// Every data row must have as many fields as the header. Cells are kept as
/// source text; each column gets an inferred dtype. The file handle is closed
/// before this returns, on success and on error.
pub fn load_csv(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| SampleError::file_access(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let header = reader
        .headers()
        .map_err(|e| classify_csv_error(path, e))?
        .clone();
    if header.is_empty() {
        return Err(SampleError::parse(path, "missing header row"));
    }
    let names = dedupe_column_names(header.iter().map(|h| h.to_string()).collect());

    let mut records: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| classify_csv_error(path, e))?;
        records.push(record.iter().map(|f| f.to_string()).collect());
    }

    let dataset = Dataset::from_records(names, records);
    for col in &dataset.columns {
        log::debug!("column {:?}: {}", col.name, col.dtype);
    }
    log::info!(
        "loaded {} rows x {} columns from {}",
        dataset.len(),
        dataset.columns.len(),
        path.display()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split csv errors into I/O failures and structural ones.
fn classify_csv_error(path: &Path, err: csv::Error) -> SampleError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => SampleError::file_access(path, source),
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.map(|p| p.line()).unwrap_or_default();
            SampleError::parse(
                path,
                format!("line {line}: expected {expected_len} fields, found {len}"),
            )
        }
        _ => SampleError::parse(path, message),
    }
}

/// Disambiguate repeated header names: the second `X` becomes `X.1`, the
/// third `X.2`, skipping any suffix already taken by another column.
fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut taken: Vec<String> = Vec::with_capacity(names.len());

    for name in names {
        let count = seen.entry(name.clone()).or_insert(0);
        if *count == 0 && !taken.contains(&name) {
            *count = 1;
            taken.push(name);
            continue;
        }
        *count = (*count).max(1);
        let mut candidate = format!("{name}.{count}");
        while taken.contains(&candidate) {
            *count += 1;
            candidate = format!("{name}.{count}");
        }
        *count += 1;
        taken.push(candidate);
    }
    taken
}
