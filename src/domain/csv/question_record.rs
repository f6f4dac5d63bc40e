// ============================================================
// QUESTION RECORD TYPES
// ============================================================
// One row of the Stack Overflow questions export

use crate::domain::error::{AppError, Result};

pub const QUESTION_COLUMN: &str = "Question";
pub const TAG_COLUMN: &str = "Tag";
pub const PUBLISHED_DATE_COLUMN: &str = "Published Date";

/// Columns every questions export must carry
pub const REQUIRED_COLUMNS: [&str; 3] = [QUESTION_COLUMN, TAG_COLUMN, PUBLISHED_DATE_COLUMN];

/// Cell values that spreadsheet and dataframe exports write for "no value"
pub const MISSING_VALUE_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing_value(value: &str) -> bool {
    MISSING_VALUE_MARKERS.contains(&value.trim())
}

/// A single question row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    /// Question text (schema only, never aggregated)
    pub question: String,

    /// Tag label
    pub tag: String,

    /// Raw published date as found in the source
    pub published_date: String,
}

impl QuestionRecord {
    pub fn new(
        question: impl Into<String>,
        tag: impl Into<String>,
        published_date: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            tag: tag.into(),
            published_date: published_date.into(),
        }
    }

    /// False when the tag cell is empty or holds a missing-value marker
    pub fn has_tag(&self) -> bool {
        !is_missing_value(&self.tag)
    }
}

/// Positions of the required columns within a header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub question: usize,
    pub tag: usize,
    pub published_date: usize,
}

impl ColumnLayout {
    /// Locate the required columns, failing with a `SchemaError` that lists
    /// every missing one. Extra columns are ignored; the first occurrence of
    /// a duplicated header wins.
    pub fn from_headers<'a, I>(headers: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = headers.into_iter().map(normalize_header).collect();
        let position = |column: &str| names.iter().position(|name| name == column);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| position(*column).is_none())
            .collect();

        match (
            position(QUESTION_COLUMN),
            position(TAG_COLUMN),
            position(PUBLISHED_DATE_COLUMN),
        ) {
            (Some(question), Some(tag), Some(published_date)) => Ok(Self {
                question,
                tag,
                published_date,
            }),
            _ => Err(AppError::SchemaError(format!(
                "missing required columns: {} (CSV must contain columns: {})",
                missing.join(", "),
                REQUIRED_COLUMNS.join(", ")
            ))),
        }
    }
}

fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}
