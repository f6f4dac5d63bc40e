pub mod use_cases;

pub use use_cases::dataset_loader::{load_percentage_table, DatasetLoader, LoadedDataset};
pub use use_cases::published_table::{current_table, PublishedTable};
pub use use_cases::tag_aggregator::{aggregate, aggregate_with_summary};
