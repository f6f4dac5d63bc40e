// ============================================================
// TAG STATISTICS TYPES
// ============================================================
// Year/tag counts and the published percentage table

use serde::Serialize;
use std::collections::BTreeMap;

/// Calendar year derived from a question's published date
pub type Year = i32;

/// Number of questions per tag, grouped by year.
/// Tags that never occur in a year have no entry.
pub type YearTagCounts = BTreeMap<Year, BTreeMap<String, u64>>;

/// Per-year share of questions for each tag, in percent.
///
/// For every year present, the percentages of its tags sum to 100
/// (within floating-point rounding). Serialized as
/// `{"2020": {"python": 62.5, "rust": 37.5}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PercentageTable(BTreeMap<Year, BTreeMap<String, f64>>);

impl PercentageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no year has any data
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of years in the table
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn year(&self, year: Year) -> Option<&BTreeMap<String, f64>> {
        self.0.get(&year)
    }

    pub fn percentage(&self, year: Year, tag: &str) -> Option<f64> {
        self.0.get(&year).and_then(|tags| tags.get(tag)).copied()
    }

    pub fn years(&self) -> impl Iterator<Item = Year> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Year, &BTreeMap<String, f64>)> {
        self.0.iter()
    }

    /// Number of distinct tags across all years
    pub fn distinct_tags(&self) -> usize {
        let mut tags: Vec<&str> = self
            .0
            .values()
            .flat_map(|tags| tags.keys().map(String::as_str))
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags.len()
    }
}

impl From<BTreeMap<Year, BTreeMap<String, f64>>> for PercentageTable {
    fn from(map: BTreeMap<Year, BTreeMap<String, f64>>) -> Self {
        Self(map)
    }
}

/// Row accounting for a single load of the question dataset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Data rows read from the source
    pub rows_read: usize,

    /// Rows that contributed to the table
    pub rows_kept: usize,

    /// Rows excluded for an unparseable date or a missing tag
    pub rows_dropped: usize,

    /// Years present in the table
    pub years: usize,

    /// Distinct tags across all years
    pub tags: usize,
}
