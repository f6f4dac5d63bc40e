use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::{current_table, load_percentage_table, LoadedDataset, PublishedTable};
use crate::domain::error::AppError;
use crate::domain::stats::PercentageTable;
use crate::infrastructure::config::ServiceConfig;
use crate::infrastructure::storage::resolve_data_path;

/// Load the questions export once and publish it as the process-wide table.
/// Load failures are logged and leave an empty table published.
pub fn setup(config: &ServiceConfig) -> Arc<PublishedTable> {
    let data_path = resolve_data_path(&config.data_file);
    let published = current_table();
    publish_from_path(&published, &data_path);
    published
}

pub fn publish_from_path(published: &PublishedTable, data_path: &Path) {
    let table = load_table_or_empty(data_path);
    if let Err(err) = published.publish(table) {
        error!(error = %err, "Failed to publish percentage table");
    }
}

pub fn load_table_or_empty(data_path: &Path) -> PercentageTable {
    match load_percentage_table(data_path) {
        Ok(LoadedDataset { table, summary }) => {
            if summary.rows_dropped > 0 {
                warn!(
                    rows_dropped = summary.rows_dropped,
                    rows_read = summary.rows_read,
                    "Skipped rows with an unparseable date or missing tag"
                );
            }
            if table.is_empty() {
                warn!(
                    path = %data_path.display(),
                    rows_read = summary.rows_read,
                    "CSV parsed but no row carried a usable date and tag"
                );
            } else {
                info!(
                    path = %data_path.display(),
                    rows_kept = summary.rows_kept,
                    years = summary.years,
                    tags = summary.tags,
                    "CSV processed successfully"
                );
            }
            table
        }
        Err(err @ AppError::ResourceMissing(_)) => {
            error!(error = %err, path = %data_path.display(), "Data file not found");
            PercentageTable::new()
        }
        Err(err @ AppError::SchemaError(_)) => {
            error!(error = %err, path = %data_path.display(), "Data file has an unexpected schema");
            PercentageTable::new()
        }
        Err(err) => {
            error!(error = %err, path = %data_path.display(), "Failed to process CSV");
            PercentageTable::new()
        }
    }
}
