//! Date-range extraction from experience text

use crate::error::Result;
use crate::experience::date_parser::DateParser;
use chrono::{Datelike, NaiveDate};
use log::debug;
use regex::Regex;
use std::collections::HashSet;

/// Month-name tokens with 2-4 digit years, numeric month/year, or a bare year.
/// Digit positions also accept the OCR confusables o, i and l.
const DATE: &str = r"[a-z]{3,9}\.?\s*['\x{2019}]?\s*[0-9oil]{2,4}\b|\d{1,2}[/\-.][0-9oil]{4}\b|[0-9oil]{4}[/\-.]\d{1,2}\b|[0-9oil]{4}\b";

const SEPARATOR: &str =
    r"\s*(?:-|\x{2010}|\x{2011}|\x{2012}|\x{2013}|\x{2014}|\x{2015}|\x{2212}|to|till|until|up\s+to|\x{2192}|->|~)\s*";

const PRESENT: &str = r"(?:present|current|now|till\s+date|to\s+date|ongoing|continuing)\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    fn key(&self) -> (i32, u32, i32, u32) {
        (self.start.year(), self.start.month(), self.end.year(), self.end.month())
    }
}

pub struct RangeExtractor {
    parser: DateParser,
    range: Regex,
    whitespace: Regex,
}

impl RangeExtractor {
    pub fn new() -> Result<Self> {
        let pattern = format!(r"(?i)\b({DATE}){SEPARATOR}({PRESENT}|{DATE})");
        Ok(Self {
            parser: DateParser::new()?,
            range: Regex::new(&pattern)?,
            whitespace: Regex::new(r"\s+")?,
        })
    }

    /// Ranges in first-seen order; unparseable or reversed ranges are dropped, duplicates collapse
    pub fn extract(&self, text: &str, today: NaiveDate) -> Vec<DateRange> {
        let text = self.whitespace.replace_all(text, " ");
        let mut seen = HashSet::new();
        let mut ranges = Vec::new();

        for caps in self.range.captures_iter(&text) {
            let start_raw = caps[1].trim();
            let end_raw = caps[2].trim();

            let (Some(start), Some(end)) = (
                self.parser.parse(start_raw, today),
                self.parser.parse(end_raw, today),
            ) else {
                debug!("Skipping range '{}' - '{}': unparseable", start_raw, end_raw);
                continue;
            };
            if end < start {
                debug!("Skipping reversed range '{}' - '{}'", start_raw, end_raw);
                continue;
            }

            let range = DateRange { start, end };
            if seen.insert(range.key()) {
                debug!("Range {} .. {} from '{}'", start, end, &caps[0]);
                ranges.push(range);
            }
        }

        ranges
    }
}
