// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Typed question records and the column layout they are read from
// No I/O, no async, no external dependencies

mod question_record;

pub use question_record::{
    is_missing_value, ColumnLayout, QuestionRecord, MISSING_VALUE_MARKERS, PUBLISHED_DATE_COLUMN,
    QUESTION_COLUMN, REQUIRED_COLUMNS, TAG_COLUMN,
};
