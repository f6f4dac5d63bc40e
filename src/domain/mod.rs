pub mod error;
pub mod stats;

// Question CSV records
pub mod csv;
