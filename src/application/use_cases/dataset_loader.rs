// ============================================================
// DATASET LOADER USE CASE
// ============================================================
// Orchestrate CSV parsing and aggregation into a percentage table

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::application::use_cases::tag_aggregator::aggregate_with_summary;
use crate::domain::csv::QuestionRecord;
use crate::domain::error::{AppError, Result};
use crate::domain::stats::{DatasetSummary, PercentageTable};
use crate::infrastructure::csv::CsvParser;

/// A fully aggregated dataset. `table` may be empty when no row had a
/// usable date and tag.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub table: PercentageTable,
    pub summary: DatasetSummary,
}

/// Load-and-aggregate use case
#[derive(Default)]
pub struct DatasetLoader {
    parser: CsvParser,
}

impl DatasetLoader {
    pub fn new(parser: CsvParser) -> Self {
        Self { parser }
    }

    /// Load a questions export from disk.
    ///
    /// Fails with `ResourceMissing` when the file does not exist and with
    /// `SchemaError` when a required column is absent.
    pub fn load(&self, path: &Path) -> Result<LoadedDataset> {
        if !path.exists() {
            return Err(AppError::ResourceMissing(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let start = Instant::now();
        let records = self.parser.parse_file(path)?;
        let dataset = Self::build(&records);

        debug!(
            path = %path.display(),
            rows = dataset.summary.rows_read,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Aggregated questions export"
        );

        Ok(dataset)
    }

    /// Load a questions export already held in memory
    pub fn load_content(&self, content: &str) -> Result<LoadedDataset> {
        let records = self.parser.parse_content(content)?;
        Ok(Self::build(&records))
    }

    fn build(records: &[QuestionRecord]) -> LoadedDataset {
        let (table, summary) = aggregate_with_summary(records);
        LoadedDataset { table, summary }
    }
}

/// Load `path` with the default parser settings
pub fn load_percentage_table(path: &Path) -> Result<LoadedDataset> {
    DatasetLoader::default().load(path)
}
