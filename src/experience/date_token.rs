//! Canonicalization of raw date substrings

use crate::error::Result;
use regex::Regex;

/// Words meaning "up to today", compared with all whitespace removed
const PRESENT_WORDS: &[&str] = &[
    "present",
    "current",
    "now",
    "ongoing",
    "tilldate",
    "tillnow",
    "todate",
    "currentlyworking",
    "currentrole",
    "currentposition",
    "continuing",
    "uptodate",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateToken {
    /// Resolves to the clock date at parse time
    Now,
    Text(String),
}

/// Repairs OCR damage and unifies the many ways resumes write a month and year.
///
/// "2O21" -> "2021", "jan'21" -> "jan 2021", "Jan21" -> "jan 2021", "jan. 2021" -> "jan 2021".
pub struct DateTokenNormalizer {
    whitespace: Regex,
    ocr_fixes: Vec<(Regex, &'static str)>,
    apostrophe_year: Regex,
    compact_two_digit: Regex,
    compact_four_digit: Regex,
    dotted_month: Regex,
}

impl DateTokenNormalizer {
    pub fn new() -> Result<Self> {
        let ocr_fixes = [
            (r"\b2o2o\b", "2020"),
            (r"\b2o(\d{2})\b", "20${1}"),
            (r"\b2o2(\d)\b", "202${1}"),
            (r"\b([12]\d)o(\d)\b", "${1}0${2}"),
            (r"\b([12]\d{2})[il]\b", "${1}1"),
            (r"\b([12]\d)[il](\d)\b", "${1}1${2}"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| Ok((Regex::new(pattern)?, replacement)))
        .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            whitespace: Regex::new(r"\s+")?,
            ocr_fixes,
            apostrophe_year: Regex::new(r"\b([a-z]{3,9})\.?'\s*(\d{2}|\d{4})\b")?,
            compact_two_digit: Regex::new(r"\b([a-z]{3,9})(\d{2})\b")?,
            compact_four_digit: Regex::new(r"\b([a-z]{3,9})(\d{4})\b")?,
            dotted_month: Regex::new(r"\b([a-z]{3,9})\.\s*(\d)")?,
        })
    }

    pub fn normalize(&self, raw: &str) -> DateToken {
        let lower = raw.trim().to_lowercase();
        let squeezed: String = lower.chars().filter(|c| !c.is_whitespace()).collect();
        if PRESENT_WORDS.contains(&squeezed.as_str()) {
            return DateToken::Now;
        }

        let straightened = lower.replace(&['\u{2019}', '\u{2018}', '`'][..], "'");
        let mut token = self.whitespace.replace_all(&straightened, " ").into_owned();

        for (pattern, replacement) in &self.ocr_fixes {
            token = pattern.replace_all(&token, *replacement).into_owned();
        }

        token = self
            .apostrophe_year
            .replace_all(&token, |caps: &regex::Captures| expand_year(&caps[1], &caps[2]))
            .into_owned();
        token = self.compact_two_digit.replace_all(&token, "${1} 20${2}").into_owned();
        token = self.compact_four_digit.replace_all(&token, "${1} ${2}").into_owned();
        token = self.dotted_month.replace_all(&token, "${1} ${2}").into_owned();

        DateToken::Text(self.whitespace.replace_all(token.trim(), " ").into_owned())
    }
}

fn expand_year(month: &str, year: &str) -> String {
    if year.len() == 2 {
        format!("{} 20{}", month, year)
    } else {
        format!("{} {}", month, year)
    }
}

/// Map OCR letters in a bare four-character year to digits: o -> 0, i/l -> 1.
///
/// Returns `None` unless the token is four characters of `[0-9oil]` with at least two digits.
pub fn repair_year_chars(token: &str) -> Option<String> {
    let lower = token.to_lowercase();
    if lower.chars().count() != 4 {
        return None;
    }
    let digits = lower.chars().filter(|c| c.is_ascii_digit()).count();
    if digits < 2 {
        return None;
    }

    lower
        .chars()
        .map(|c| match c {
            '0'..='9' => Some(c),
            'o' => Some('0'),
            'i' | 'l' => Some('1'),
            _ => None,
        })
        .collect()
}
