pub mod dataset_loader;
pub mod published_table;
pub mod tag_aggregator;
