// ============================================================
// TAG AGGREGATOR
// ============================================================
// Turn question records into per-year tag percentages

use std::collections::BTreeMap;

use crate::domain::csv::QuestionRecord;
use crate::domain::stats::{DatasetSummary, PercentageTable, Year, YearTagCounts};
use crate::infrastructure::csv::parse_year;

/// Count questions per (year, tag).
///
/// Returns the counts and the number of records left out because their
/// date has no recognisable year or their tag is missing.
pub fn count_by_year_and_tag(records: &[QuestionRecord]) -> (YearTagCounts, usize) {
    let mut counts = YearTagCounts::new();
    let mut dropped = 0;

    for record in records {
        let year = match parse_year(&record.published_date) {
            Some(year) if record.has_tag() => year,
            _ => {
                dropped += 1;
                continue;
            }
        };

        *counts
            .entry(year)
            .or_default()
            .entry(record.tag.clone())
            .or_insert(0) += 1;
    }

    (counts, dropped)
}

/// Convert counts into percentages of each year's total.
/// A year only appears in `counts` with a non-zero total.
pub fn normalize(counts: &YearTagCounts) -> PercentageTable {
    let table: BTreeMap<Year, BTreeMap<String, f64>> = counts
        .iter()
        .map(|(year, tags)| {
            let total: u64 = tags.values().sum();
            let shares = tags
                .iter()
                .map(|(tag, count)| (tag.clone(), *count as f64 / total as f64 * 100.0))
                .collect();
            (*year, shares)
        })
        .collect();

    PercentageTable::from(table)
}

pub fn aggregate(records: &[QuestionRecord]) -> PercentageTable {
    aggregate_with_summary(records).0
}

pub fn aggregate_with_summary(records: &[QuestionRecord]) -> (PercentageTable, DatasetSummary) {
    let (counts, dropped) = count_by_year_and_tag(records);
    let table = normalize(&counts);

    let summary = DatasetSummary {
        rows_read: records.len(),
        rows_kept: records.len() - dropped,
        rows_dropped: dropped,
        years: table.len(),
        tags: table.distinct_tags(),
    };

    (table, summary)
}
