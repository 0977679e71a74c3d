//! Minimum required experience stated in a job description

use crate::error::Result;
use aho_corasick::AhoCorasick;
use log::debug;
use regex::Regex;

/// Phrases that pin the requirement to zero before any number is considered
const ZERO_EXPERIENCE_PHRASES: &[&str] = &[
    "0 years",
    "0 year",
    "no experience required",
    "fresh graduate",
    "freshers welcome",
    "fresher welcome",
    "entry level",
    "entry-level",
    "junior role",
    "beginner role",
    "some exposure",
    "basic familiarity",
    "no prior experience needed",
    "no industry experience required",
    "fresher",
    "no experience",
];

/// Larger stated counts are not read as a requirement
pub const MAX_REQUIRED_YEARS: u32 = 50;

const RANGE_PATTERN: &str = r"(\d+)\s*(?:-|\x{2013}|\x{2014}|to|upto|up\s+to)\s*(\d+)\s*(?:yrs?|years?)?";

/// Single-value phrasings, most specific first
const SINGLE_VALUE_PATTERNS: &[&str] = &[
    r"candidate\s+(?:should|must)\s+have\s+(\d+)\s+(?:yrs?|years?)",
    r"must\s+have\s+(\d+)\s+(?:yrs?|years?)",
    r"should\s+have\s+(\d+)\s+(?:yrs?|years?)",
    r"looking\s+for\s+(?:someone\s+with\s+)?(\d+)\s+(?:yrs?|years?)",
    r"minimum\s+of\s+(\d+)\s+years?",
    r"at\s+least\s+(\d+)\s+years?",
    r"minimum\s+(\d+)\s+years?",
    r"min\s+(\d+)\s+years?",
    r"more\s+than\s+(\d+)\s+years?",
    r"over\s+(\d+)\s+years?",
    r"(\d+)\s*\+\s*years?",
    r"(\d+)\s*\+\s*yrs?",
    r"(\d+)\s+years?\s+of\s+experience",
    r"experience\s+of\s+(\d+)\s+years?",
    r"(\d+)\s+years?\s+(?:\w+\s+){0,3}?experience",
    r"experience\s*:\s*(\d+)\s+years?",
    r"required\s*:\s*(\d+)\s+years?",
    r"(\d+)\s+yrs?\b",
];

const NUMBER_WORDS: [&str; 10] = ["one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten"];

/// Worded phrasings; `{words}` is replaced with the number-word alternation
const WORD_PATTERNS: &[&str] = &[
    r"at\s+least\s+({words})\s+years?",
    r"minimum\s+({words})\s+years?",
    r"({words})\s+years?\s+of\s+experience",
    r"({words})\s+years?\s+experience",
];

type Rule = fn(&RequirementYearsExtractor, &str) -> Option<u32>;

/// Priority order; the first rule that yields a value decides
const RULES: [(&str, Rule); 4] = [
    ("zero-experience phrase", RequirementYearsExtractor::zero_phrase),
    ("numeric range", RequirementYearsExtractor::numeric_range),
    ("single value", RequirementYearsExtractor::single_value),
    ("worded number", RequirementYearsExtractor::worded_number),
];

pub struct RequirementYearsExtractor {
    zero_phrases: AhoCorasick,
    range: Regex,
    single_values: Vec<Regex>,
    worded: Vec<Regex>,
}

impl RequirementYearsExtractor {
    pub fn new() -> Result<Self> {
        let zero_phrases = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(ZERO_EXPERIENCE_PHRASES)?;

        let single_values = SINGLE_VALUE_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let words = NUMBER_WORDS.join("|");
        let worded = WORD_PATTERNS
            .iter()
            .map(|p| Regex::new(&p.replace("{words}", &words)))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            zero_phrases,
            range: Regex::new(RANGE_PATTERN)?,
            single_values,
            worded,
        })
    }

    /// Required (years, months); (0, 0) when the text states no requirement
    pub fn extract(&self, jd_text: &str) -> (u32, u32) {
        let jd = jd_text.to_lowercase();
        for (name, rule) in RULES.iter() {
            if let Some(years) = rule(self, &jd) {
                debug!("Required experience {} year(s) via {}", years, name);
                return (years, 0);
            }
        }
        (0, 0)
    }

    fn zero_phrase(&self, jd: &str) -> Option<u32> {
        let bytes = jd.as_bytes();
        let is_word = |idx: usize| bytes.get(idx).map_or(false, |b| b.is_ascii_alphanumeric());

        self.zero_phrases
            .find_overlapping_iter(jd)
            .any(|m| !(m.start() > 0 && is_word(m.start() - 1)) && !is_word(m.end()))
            .then_some(0)
    }

    /// Lower bound of the first range: "2-5 years" requires 2
    fn numeric_range(&self, jd: &str) -> Option<u32> {
        let caps = self.range.captures(jd)?;
        let low: u32 = caps[1].parse().ok()?;
        let high: u32 = caps[2].parse().ok()?;
        Some(low.min(high)).filter(|years| *years <= MAX_REQUIRED_YEARS)
    }

    /// Largest value across every single-value phrasing
    fn single_value(&self, jd: &str) -> Option<u32> {
        self.single_values
            .iter()
            .flat_map(|re| re.captures_iter(jd))
            .filter_map(|caps| caps[1].parse::<u32>().ok())
            .filter(|years| (1..=MAX_REQUIRED_YEARS).contains(years))
            .max()
    }

    fn worded_number(&self, jd: &str) -> Option<u32> {
        self.worded.iter().find_map(|re| {
            let caps = re.captures(jd)?;
            NUMBER_WORDS
                .iter()
                .position(|w| *w == &caps[1])
                .map(|idx| idx as u32 + 1)
        })
    }
}
