use super::deriver::{derive_records, RawCallRow};
use super::domain::CallRecord;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CallLogImportError {
    #[error("failed to read call log: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid call log CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Loads daily call activity exports into enriched [`CallRecord`]s.
pub struct CallLogImporter;

impl CallLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CallRecord>, CallLogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        debug!(path = %path.display(), "reading call log");
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CallRecord>, CallLogImportError> {
        let rows = read_rows(reader)?;
        let records = derive_records(rows);

        let missing_cells: usize = records.iter().map(CallRecord::missing_counters).sum();
        let undated = records.iter().filter(|record| record.date.is_none()).count();
        debug!(
            rows = records.len(),
            missing_cells, undated, "derived call metrics"
        );

        Ok(records)
    }
}

fn read_rows<R: Read>(reader: R) -> Result<Vec<RawCallRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    csv_reader.deserialize::<RawCallRow>().collect()
}
