// 📂 Extract Reader - Pipe-delimited person extracts
// Header row defines field names; every value is a string; absent values
// normalize to empty string, never null.

use crate::error::{LoadError, Result};
use crate::record::{ExtractRecord, RecordSet};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

/// Read one population extract (or a previous condensed snapshot) and sort
/// it ascending by identity key.
///
/// A missing file is fatal. A missing column for a required business field
/// surfaces as a CSV deserialization error naming the field.
pub fn read_extract<R>(path: &Path) -> Result<RecordSet<R>>
where
    R: ExtractRecord + DeserializeOwned,
{
    if !path.exists() {
        return Err(LoadError::MissingInputFile {
            path: path.to_path_buf(),
        });
    }

    info!("Reading {} file \"{}\"...", R::POPULATION, path.display());

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .from_path(path)?;

    let mut records: Vec<R> = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }

    info!("Read {} {} records, sorting by EMPLID", records.len(), R::POPULATION);
    Ok(RecordSet::new(records))
}

// ============================================================================
// TESTS
// ============================================================================
