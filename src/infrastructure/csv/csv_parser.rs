// ============================================================
// CSV PARSER
// ============================================================
// Parse question exports with encoding fallback and schema checks

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use encoding_rs::WINDOWS_1252;

use crate::domain::csv::{ColumnLayout, QuestionRecord};
use crate::domain::error::{AppError, Result};

/// CSV parser for question exports
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Parse a CSV file into question records
    pub fn parse_file(&self, path: &Path) -> Result<Vec<QuestionRecord>> {
        let content = self.read_with_encoding_fallback(path)?;
        self.parse_content(&content)
    }

    /// Parse CSV content from string.
    ///
    /// The header row is checked before any data row is read, so a file
    /// without the required columns fails with `SchemaError` up front.
    pub fn parse_content(&self, content: &str) -> Result<Vec<QuestionRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();
        let layout = ColumnLayout::from_headers(headers.iter())?;

        let mut records = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            records.push(Self::parse_row(&layout, &record));
        }

        Ok(records)
    }

    /// Read file as UTF-8, falling back to Windows-1252 for legacy exports
    fn read_with_encoding_fallback(&self, path: &Path) -> Result<String> {
        let buffer = fs::read(path).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(decode_bytes(buffer))
    }

    /// Short rows yield empty strings for the missing cells
    fn parse_row(layout: &ColumnLayout, record: &StringRecord) -> QuestionRecord {
        let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();

        QuestionRecord {
            question: cell(layout.question),
            tag: cell(layout.tag),
            published_date: cell(layout.published_date),
        }
    }
}

fn decode_bytes(buffer: Vec<u8>) -> String {
    match String::from_utf8(buffer) {
        Ok(content) => content,
        Err(err) => {
            let (decoded, _, _) = WINDOWS_1252.decode(err.as_bytes());
            decoded.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_csv() {
        let content = "Question,Tag,Published Date\n\
                       How do I borrow?,rust,2021-03-04\n\
                       What is a decorator?,python,2020-01-15";
        let records = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], QuestionRecord::new("How do I borrow?", "rust", "2021-03-04"));
        assert_eq!(records[1].tag, "python");
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let content = "Question,Tag,Published Date\n\"Why, oh why?\",go,\"Jan 5, 2020\"";
        let records = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(records[0].question, "Why, oh why?");
        assert_eq!(records[0].published_date, "Jan 5, 2020");
    }

    #[test]
    fn test_missing_tag_column_is_schema_error() {
        let content = "Question,Published Date\nWhat?,2020-01-01";
        let err = CsvParser::new().parse_content(content).unwrap_err();
        assert!(matches!(err, AppError::SchemaError(msg) if msg.contains("Tag")));
    }

    #[test]
    fn test_empty_content_is_schema_error() {
        let err = CsvParser::new().parse_content("").unwrap_err();
        assert!(matches!(err, AppError::SchemaError(_)));
    }

    #[test]
    fn test_short_row_yields_empty_cells() {
        let content = "Question,Tag,Published Date\nOnly a question";
        let records = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(records[0], QuestionRecord::new("Only a question", "", ""));
    }

    #[test]
    fn test_custom_delimiter_and_trim() {
        let content = "Question;Tag;Published Date\n  Q  ; sql ;2019-07-01";
        let records = CsvParser::new()
            .with_delimiter(b';')
            .parse_content(content)
            .unwrap();
        assert_eq!(records[0].tag, "sql");

        let untrimmed = CsvParser::new()
            .with_delimiter(b';')
            .with_trim(false)
            .parse_content("Question;Tag;Published Date\nQ; sql ;2019-07-01")
            .unwrap();
        assert_eq!(untrimmed[0].tag, " sql ");
    }

    #[test]
    fn test_parse_file_with_latin1_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Question,Tag,Published Date\nCaf\xe9 crash?,java,2018-02-02\n")
            .unwrap();

        let records = CsvParser::new().parse_file(file.path()).unwrap();
        assert_eq!(records[0].question, "Café crash?");
        assert_eq!(records[0].tag, "java");
    }

    #[test]
    fn test_parse_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvParser::new()
            .parse_file(&dir.path().join("absent.csv"))
            .unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
