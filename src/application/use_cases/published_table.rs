use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};

use crate::domain::error::{AppError, Result};
use crate::domain::stats::PercentageTable;

static EMPTY_TABLE: Lazy<PercentageTable> = Lazy::new(PercentageTable::new);

static CURRENT_TABLE: Lazy<Arc<PublishedTable>> = Lazy::new(|| Arc::new(PublishedTable::new()));

/// Write-once holder for the percentage table served to clients.
/// Reads never lock; the table is visible only once fully built.
#[derive(Debug, Default)]
pub struct PublishedTable {
    cell: OnceCell<PercentageTable>,
}

impl PublishedTable {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn publish(&self, table: PercentageTable) -> Result<()> {
        self.cell.set(table).map_err(|_| {
            AppError::Internal("Percentage table has already been published".to_string())
        })
    }

    /// The published table, or an empty one before publication
    pub fn get(&self) -> &PercentageTable {
        self.cell.get().unwrap_or(&*EMPTY_TABLE)
    }

    pub fn is_published(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_empty()
    }
}

/// Process-wide table, published once by bootstrap
pub fn current_table() -> Arc<PublishedTable> {
    CURRENT_TABLE.clone()
}
