//! Branch and domain resolution near degree mentions

use crate::error::Result;
use crate::reference::{DegreeTaxonomy, GENERIC_DOMAIN};
use regex::Regex;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;

const CONTEXT_BEFORE: usize = 20;
const CONTEXT_AFTER: usize = 100;
const MAX_BRANCH_LEN: usize = 60;

/// Where a branch phrase stops: line end, list punctuation, a year, or an institution/date word
const BRANCH_END: &str =
    r"(?:\n|[,;|(]|\d|\b(?:from|at|college|university|institute|school|during|since|with)\b|$)";

pub struct BranchResolver {
    taxonomy: Arc<DegreeTaxonomy>,
    context_patterns: Vec<Regex>,
}

impl BranchResolver {
    pub fn new(taxonomy: Arc<DegreeTaxonomy>) -> Result<Self> {
        let context_patterns = [
            format!(r"\bin\s+([a-z\s&/\-]+?){}", BRANCH_END),
            format!(r":\s*([a-z\s&/\-]+?){}", BRANCH_END),
            r"\(([a-z\s&/\-]+?)\)".to_string(),
            format!(r"-\s*([a-z\s&/\-]+?){}", BRANCH_END),
        ]
        .iter()
        .map(|p| Regex::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            taxonomy,
            context_patterns,
        })
    }

    /// Map branch text to a domain tag; `generic` when nothing is recognized.
    ///
    /// Single-word overrides first, then exact branch names, then containment.
    pub fn resolve_domain(&self, branch: &str) -> String {
        let branch = branch.trim().to_lowercase();
        if branch.is_empty() {
            return GENERIC_DOMAIN.to_string();
        }

        if let Some(domain) = self.taxonomy.override_domain(&branch) {
            return domain.to_string();
        }

        let domains = self.taxonomy.domains();
        if let Some(entry) = domains.iter().find(|d| d.branches.iter().any(|b| *b == branch)) {
            return entry.domain.clone();
        }
        if let Some(entry) = domains
            .iter()
            .find(|d| d.branches.iter().any(|b| branch.contains(b.as_str())))
        {
            return entry.domain.clone();
        }

        GENERIC_DOMAIN.to_string()
    }

    /// Canonical branch title found in the window around `position` of lowercased `text`.
    ///
    /// Returns an empty string when no known branch appears in any context phrase.
    pub fn branch_from_context(&self, text: &str, position: usize) -> String {
        let start = floor_char_boundary(text, position.saturating_sub(CONTEXT_BEFORE));
        let end = ceil_char_boundary(text, position.saturating_add(CONTEXT_AFTER).min(text.len()));
        let context = text[start..end].to_lowercase();

        let mut best: Option<(usize, String)> = None;
        for pattern in &self.context_patterns {
            for caps in pattern.captures_iter(&context) {
                let Some(candidate) = caps.get(1).map(|m| m.as_str().trim()) else {
                    continue;
                };
                if candidate.is_empty() || candidate.len() > MAX_BRANCH_LEN {
                    continue;
                }
                if let Some((len, domain)) = self.known_branch(candidate) {
                    if best.as_ref().map_or(true, |(best_len, _)| len > *best_len) {
                        best = Some((len, self.canonical_title(&domain, candidate)));
                    }
                }
            }
        }

        best.map(|(_, title)| title).unwrap_or_default()
    }

    /// Canonical title for a branch phrase already known to belong to `domain`
    pub fn canonical_title(&self, domain: &str, candidate: &str) -> String {
        let Some(titles) = self.taxonomy.titles_for(domain) else {
            return title_case(candidate);
        };

        titles
            .rules
            .iter()
            .find(|rule| {
                rule.requires
                    .iter()
                    .all(|alternatives| alternatives.iter().any(|key| mentions(candidate, key)))
            })
            .map(|rule| rule.title.clone())
            .or_else(|| titles.default.clone())
            .unwrap_or_else(|| title_case(candidate))
    }

    /// Longest known branch name inside `candidate`, with its domain
    fn known_branch(&self, candidate: &str) -> Option<(usize, String)> {
        if let Some(domain) = self.taxonomy.override_domain(candidate) {
            return Some((candidate.len(), domain.to_string()));
        }

        let mut best: Option<(usize, &str)> = None;
        for entry in self.taxonomy.domains() {
            for branch in &entry.branches {
                if candidate.contains(branch.as_str()) && best.map_or(true, |(len, _)| branch.len() > len) {
                    best = Some((branch.len(), entry.domain.as_str()));
                }
            }
        }
        best.map(|(len, domain)| (len, domain.to_string()))
    }
}

/// Short keys ("ai", "it", "cs") must be whole words; longer ones may be substrings
fn mentions(text: &str, key: &str) -> bool {
    if key.len() <= 3 && !key.contains(' ') {
        text.unicode_words().any(|word| word == key)
    } else {
        text.contains(key)
    }
}

fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.trim().chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

pub(crate) fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

pub(crate) fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    fn resolver() -> BranchResolver {
        BranchResolver::new(ReferenceData::embedded().unwrap().taxonomy).unwrap()
    }

    #[test]
    fn test_single_word_overrides() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_domain("Computer"), "computer");
        assert_eq!(resolver.resolve_domain("mech"), "mechanical");
        assert_eq!(resolver.resolve_domain("CSE"), "computer");
    }

    #[test]
    fn test_exact_and_substring_resolution() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_domain("Mechanical Engineering"), "mechanical");
        assert_eq!(resolver.resolve_domain("Artificial Intelligence & Machine Learning"), "computer");
        assert_eq!(resolver.resolve_domain("electrical and electronics engineering"), "electrical");
        assert_eq!(resolver.resolve_domain("accounting & finance"), "finance");
    }

    #[test]
    fn test_unknown_branch_is_generic() {
        let resolver = resolver();
        assert_eq!(resolver.resolve_domain(""), "generic");
        assert_eq!(resolver.resolve_domain("underwater basket weaving"), "generic");
    }

    #[test]
    fn test_context_canonicalizes_computer_specializations() {
        let resolver = resolver();
        let text = "be in artificial intelligence & machine learning";
        assert_eq!(resolver.branch_from_context(text, 0), "Artificial Intelligence & Machine Learning");

        let text = "btech in ai & data science from abc college";
        assert_eq!(resolver.branch_from_context(text, 0), "Artificial Intelligence & Data Science");

        let text = "b.tech (cse)";
        assert_eq!(resolver.branch_from_context(text, 0), "Computer Science");

        let text = "btech - information technology, 2020";
        assert_eq!(resolver.branch_from_context(text, 0), "Information Technology");
    }

    #[test]
    fn test_context_stops_at_institution_word() {
        let resolver = resolver();
        let text = "btech in mechanical engineering from national institute of technology";
        assert_eq!(resolver.branch_from_context(text, 0), "Mechanical Engineering");
    }

    #[test]
    fn test_context_without_branch() {
        let resolver = resolver();
        assert_eq!(resolver.branch_from_context("mbbs, 2019", 0), "");
    }

    #[test]
    fn test_science_branches_keep_their_name() {
        let resolver = resolver();
        assert_eq!(resolver.branch_from_context("bsc in physics", 0), "Physics");
        assert_eq!(resolver.branch_from_context("bsc in statistics", 0), "Statistics");
    }

    #[test]
    fn test_window_respects_char_boundaries() {
        let resolver = resolver();
        let text = "éééééééééééééééééééééé btech in civil engineering";
        let pos = text.find("btech").unwrap();
        assert_eq!(resolver.branch_from_context(text, pos), "Civil Engineering");
    }
}
