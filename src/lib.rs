pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

mod app;

pub use app::{init_tracing, run};
pub use application::{aggregate, load_percentage_table, PublishedTable};
pub use domain::error::{AppError, Result};
pub use domain::stats::{PercentageTable, Year};
