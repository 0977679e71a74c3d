//! Month arithmetic over extracted ranges

use crate::experience::ranges::DateRange;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const PRESENT_LABEL: &str = "Present";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub start_label: String,
    pub end_label: String,
    pub months: u32,
}

/// Calendar months from `start` to `end`, counting both ends when `inclusive`; never below 1
pub fn months_between(start: NaiveDate, end: NaiveDate, inclusive: bool) -> u32 {
    let span = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    let span = if inclusive { span + 1 } else { span };
    span.max(1) as u32
}

/// Per-range records and the summed month total
pub fn aggregate(ranges: &[DateRange], today: NaiveDate, inclusive: bool) -> (Vec<ExperienceRecord>, u32) {
    let records: Vec<ExperienceRecord> = ranges
        .iter()
        .map(|range| ExperienceRecord {
            start_label: month_label(range.start),
            end_label: end_label(range.end, today),
            months: months_between(range.start, range.end, inclusive),
        })
        .collect();

    let total = records.iter().map(|r| r.months).sum();
    (records, total)
}

/// (years, months) of a month total
pub fn split_months(total: u32) -> (u32, u32) {
    (total / 12, total % 12)
}

fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

fn end_label(end: NaiveDate, today: NaiveDate) -> String {
    if (end - today).num_days().abs() <= 1 {
        PRESENT_LABEL.to_string()
    } else {
        month_label(end)
    }
}
