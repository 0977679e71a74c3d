//! Section isolation over resume text

use crate::error::Result;
use crate::reference::SectionTable;
use log::debug;
use regex::Regex;
use std::sync::Arc;

/// Minimum length of an isolated education section before falling back to the whole text
const MIN_EDUCATION_SECTION_LEN: usize = 10;

struct HeadingPattern {
    keyword: String,
    regex: Regex,
}

/// Locates named sections using the heading keyword table.
///
/// Keywords are tried longest first so that "work experience" wins over "experience".
pub struct SectionLocator {
    sections: Arc<SectionTable>,
    patterns: Vec<(String, Vec<HeadingPattern>)>,
}

impl SectionLocator {
    pub fn new(sections: Arc<SectionTable>) -> Result<Self> {
        let mut patterns = Vec::new();
        for name in sections.names() {
            let mut keywords: Vec<&String> = sections.keywords_for(name).unwrap_or_default().iter().collect();
            keywords.sort_by(|a, b| b.len().cmp(&a.len()));

            let compiled = keywords
                .into_iter()
                .map(|keyword| {
                    Ok(HeadingPattern {
                        keyword: keyword.clone(),
                        regex: heading_regex(keyword)?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            patterns.push((name.to_string(), compiled));
        }

        Ok(Self { sections, patterns })
    }

    /// Text between the first `name` heading and the next heading of any other section.
    ///
    /// A heading is a whole line holding only the keyword, or the keyword followed by a
    /// separator (`:`, `-`, `|`, dashes) with content after it on the same line; that
    /// trailing content belongs to the section. Returns an empty string when absent.
    pub fn section(&self, text: &str, name: &str) -> String {
        let Some(own) = self.patterns_for(name) else {
            return String::new();
        };

        let Some((keyword, heading)) = own
            .iter()
            .find_map(|p| p.regex.find(text).map(|m| (&p.keyword, m)))
        else {
            debug!("No '{}' heading found", name);
            return String::new();
        };

        let content_start = heading.end();
        let search_start = text[content_start..]
            .find('\n')
            .map(|offset| content_start + offset + 1)
            .unwrap_or(text.len());

        let mut others: Vec<&HeadingPattern> = self
            .patterns
            .iter()
            .filter(|(section, _)| section != name)
            .flat_map(|(_, patterns)| patterns.iter())
            .collect();
        others.sort_by(|a, b| b.keyword.len().cmp(&a.keyword.len()));

        let remaining = &text[search_start..];
        let next_start = others
            .iter()
            .filter_map(|p| p.regex.find(remaining).map(|m| m.start()))
            .min();

        let end = next_start.map(|pos| search_start + pos).unwrap_or(text.len());
        debug!(
            "Section '{}' (heading '{}') spans bytes {}..{}",
            name, keyword, content_start, end
        );
        text[content_start..end].to_string()
    }

    /// Line-oriented lookup used for the education section.
    ///
    /// Heading lines may also be short free-form lines containing the keyword
    /// ("Education & Training"). Falls back to the full text when no heading is
    /// found or the isolated section is too short to hold a degree.
    pub fn section_or_full_text(&self, text: &str, name: &str) -> String {
        let Some(own_keywords) = self.sections.keywords_for(name) else {
            return text.to_string();
        };
        let lines: Vec<&str> = text.lines().collect();

        let start = lines.iter().enumerate().find_map(|(idx, line)| {
            let lower = line.trim().to_lowercase();
            own_keywords
                .iter()
                .find(|k| is_heading_line(&lower, k))
                .map(|k| (idx, k.as_str()))
        });

        let Some((start_idx, found_keyword)) = start else {
            return text.to_string();
        };

        let other_keywords: Vec<&str> = self
            .sections
            .keywords_except(name)
            .into_iter()
            .filter(|k| *k != found_keyword)
            .collect();

        let end_idx = lines
            .iter()
            .enumerate()
            .skip(start_idx + 1)
            .find(|(_, line)| {
                let lower = line.trim().to_lowercase();
                !lower.is_empty() && other_keywords.iter().any(|k| is_heading_line(&lower, k))
            })
            .map(|(idx, _)| idx)
            .unwrap_or(lines.len());

        let section = lines[start_idx + 1..end_idx].join("\n").trim().to_string();
        if section.len() < MIN_EDUCATION_SECTION_LEN {
            return text.to_string();
        }
        section
    }

    fn patterns_for(&self, name: &str) -> Option<&[HeadingPattern]> {
        self.patterns
            .iter()
            .find(|(section, _)| section == name)
            .map(|(_, patterns)| patterns.as_slice())
    }
}

fn is_heading_line(line: &str, keyword: &str) -> bool {
    line == keyword
        || line.starts_with(&format!("{}:", keyword))
        || line.starts_with(&format!("{} ", keyword))
        || (line.len() < 30 && line.contains(keyword) && line.split_whitespace().count() <= 3)
}

/// Whole-line heading pattern; inner spaces of the keyword also match `-`, `|`, `/`, `:`
fn heading_regex(keyword: &str) -> Result<Regex> {
    let escaped = regex::escape(keyword).replace(' ', r"[\s\-|/:]+");
    let pattern = format!(
        r"(?im)^[^\S\n]*{}[^\S\n]*(?:[:\-–—|&]|$)",
        escaped
    );
    Ok(Regex::new(&pattern)?)
}
