// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// CSV parsing, encoding fallback, and published-date parsing

mod csv_parser;
mod date_parser;

pub use csv_parser::CsvParser;
pub use date_parser::parse_year;
