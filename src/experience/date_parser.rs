//! Layered date parsing for resume date tokens

use crate::error::Result;
use crate::experience::date_token::{repair_year_chars, DateToken, DateTokenNormalizer};
use chrono::{Month, NaiveDate};
use log::trace;
use regex::Regex;
use strsim::jaro_winkler;

const MIN_YEAR: i32 = 1950;
const MAX_YEAR: i32 = 2100;
/// Floor for dates written with an explicit month
const MIN_CALENDAR_YEAR: i32 = 1900;

/// Minimum Jaro-Winkler similarity for repairing a misspelled month name
const MONTH_SIMILARITY: f64 = 0.9;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

type Strategy = fn(&DateParser, &str) -> Option<NaiveDate>;

/// Tried in order on a normalized token; the first success wins
const STRATEGIES: [(&str, Strategy); 5] = [
    ("bare year", DateParser::bare_year),
    ("calendar", DateParser::calendar),
    ("month and two-digit year", DateParser::month_two_digit_year),
    ("embedded year", DateParser::embedded_year),
    ("two-digit year", DateParser::two_digit_year),
];

/// Turns raw date substrings into the first day of their month.
///
/// "Now" sentinels resolve to the `today` passed in by the caller.
pub struct DateParser {
    normalizer: DateTokenNormalizer,
    month_year: Regex,
    month_first: Regex,
    year_first: Regex,
    month_two_digit: Regex,
    four_digit_year: Regex,
    two_digit: Regex,
}

impl DateParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            normalizer: DateTokenNormalizer::new()?,
            month_year: Regex::new(r"^([a-z]{3,9})\.?\s+(\d{4})$")?,
            month_first: Regex::new(r"^(\d{1,2})\s*[/\-.]\s*(\d{4})$")?,
            year_first: Regex::new(r"^(\d{4})\s*[/\-.]\s*(\d{1,2})$")?,
            month_two_digit: Regex::new(r"\b([a-z]{3,9})\s+(\d{2})\b")?,
            four_digit_year: Regex::new(r"\b(?:19|20)\d{2}\b")?,
            two_digit: Regex::new(r"\b(\d{2})\b")?,
        })
    }

    pub fn parse(&self, raw: &str, today: NaiveDate) -> Option<NaiveDate> {
        let token = match self.normalizer.normalize(raw) {
            DateToken::Now => return Some(today),
            DateToken::Text(token) => token,
        };

        let parsed = STRATEGIES.iter().find_map(|(name, strategy)| {
            let date = strategy(self, &token)?;
            trace!("Parsed '{}' as {} via {}", raw, date, name);
            Some(date)
        });
        if parsed.is_none() {
            trace!("Dropping unparseable date token '{}'", raw);
        }
        parsed
    }

    fn bare_year(&self, token: &str) -> Option<NaiveDate> {
        let year: i32 = repair_year_chars(token)?.parse().ok()?;
        january_of(year)
    }

    /// Month name with a four-digit year, or numeric month/year in either order
    fn calendar(&self, token: &str) -> Option<NaiveDate> {
        if let Some(caps) = self.month_year.captures(token) {
            return calendar_month(caps[2].parse().ok()?, month_from_name(&caps[1])?);
        }
        if let Some(caps) = self.month_first.captures(token) {
            return calendar_month(caps[2].parse().ok()?, caps[1].parse().ok()?);
        }
        if let Some(caps) = self.year_first.captures(token) {
            return calendar_month(caps[1].parse().ok()?, caps[2].parse().ok()?);
        }
        None
    }

    fn month_two_digit_year(&self, token: &str) -> Option<NaiveDate> {
        let caps = self.month_two_digit.captures(token)?;
        let month = month_from_name(&caps[1])?;
        let year = 2000 + caps[2].parse::<i32>().ok()?;
        first_of_month(year, month)
    }

    fn embedded_year(&self, token: &str) -> Option<NaiveDate> {
        let year = self.four_digit_year.find(token)?.as_str().parse().ok()?;
        january_of(year)
    }

    fn two_digit_year(&self, token: &str) -> Option<NaiveDate> {
        let caps = self.two_digit.captures(token)?;
        january_of(2000 + caps[1].parse::<i32>().ok()?)
    }
}

/// Month number for a full, abbreviated or slightly misspelled month name
fn month_from_name(word: &str) -> Option<u32> {
    let word = word.trim_end_matches('.').to_lowercase();
    if word == "sept" {
        return Some(9);
    }
    if let Ok(month) = word.parse::<Month>() {
        return Some(month.number_from_month());
    }
    if word.len() < 4 {
        return None;
    }

    MONTH_NAMES
        .iter()
        .enumerate()
        .map(|(idx, name)| (idx, jaro_winkler(&word, name)))
        .filter(|(_, score)| *score >= MONTH_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(idx, _)| idx as u32 + 1)
}

fn january_of(year: i32) -> Option<NaiveDate> {
    first_of_month(year, 1)
}

/// Year-guessing strategies only accept years inside the plausible window
fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// An explicit month and four-digit year is taken as written
fn calendar_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(MIN_CALENDAR_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn ymd(y: i32, m: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, 1)
    }

    fn parse(raw: &str) -> Option<NaiveDate> {
        DateParser::new().unwrap().parse(raw, today())
    }

    #[test]
    fn test_month_and_year() {
        assert_eq!(parse("Jan 2019"), ymd(2019, 1));
        assert_eq!(parse("December 2021"), ymd(2021, 12));
        assert_eq!(parse("Sept 2018"), ymd(2018, 9));
        assert_eq!(parse("Aug. 2020"), ymd(2020, 8));
    }

    #[test]
    fn test_ocr_tolerant_bare_years() {
        assert_eq!(parse("2O21"), ymd(2021, 1));
        assert_eq!(parse("202l"), ymd(2021, 1));
        assert_eq!(parse("2021"), ymd(2021, 1));
        assert_eq!(parse("l999"), ymd(1999, 1));
    }

    #[test]
    fn test_present_resolves_to_clock() {
        assert_eq!(parse("Present"), Some(today()));
        assert_eq!(parse("till date"), Some(today()));
    }

    #[test]
    fn test_numeric_forms() {
        assert_eq!(parse("03/2020"), ymd(2020, 3));
        assert_eq!(parse("3-2020"), ymd(2020, 3));
        assert_eq!(parse("2020-03"), ymd(2020, 3));
        assert_eq!(parse("2020.11"), ymd(2020, 11));
    }

    #[test]
    fn test_two_digit_years() {
        assert_eq!(parse("mar 19"), ymd(2019, 3));
        assert_eq!(parse("Jan'21"), ymd(2021, 1));
        assert_eq!(parse("Jun22"), ymd(2022, 6));
    }

    #[test]
    fn test_misspelled_month() {
        assert_eq!(parse("Janaury 2020"), ymd(2020, 1));
        assert_eq!(parse("Septmber 2017"), ymd(2017, 9));
    }

    #[test]
    fn test_year_fallbacks() {
        assert_eq!(parse("summer 2017"), ymd(2017, 1));
        assert_eq!(parse("13/2020"), ymd(2020, 1));
    }

    #[test]
    fn test_explicit_month_before_1950() {
        assert_eq!(parse("Jan 1949"), ymd(1949, 1));
        assert_eq!(parse("06/1948"), ymd(1948, 6));
        assert_eq!(parse("1949"), None);
        assert_eq!(parse("Jan 2150"), None);
        assert_eq!(parse("Jan 0012"), None);
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse("1899"), None);
        assert_eq!(parse("hello"), None);
        assert_eq!(parse(""), None);
    }
}
