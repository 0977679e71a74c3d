//! Credential extraction from resume text

use crate::education::credential::NormalizedCredential;
use crate::education::normalizer::DegreeNormalizer;
use crate::error::Result;
use log::debug;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

/// Finds degree mentions in resume text and normalizes them.
///
/// Only specific degrees count: the generic bachelor/master groups are skipped.
pub struct CredentialExtractor {
    normalizer: Arc<DegreeNormalizer>,
    /// (index into taxonomy groups, union pattern of the group's keywords)
    group_patterns: Vec<(usize, Regex)>,
}

impl CredentialExtractor {
    pub fn new(normalizer: Arc<DegreeNormalizer>) -> Result<Self> {
        let mut group_patterns = Vec::new();
        for (idx, group) in normalizer.taxonomy().groups().iter().enumerate() {
            if !group.extract {
                continue;
            }
            let pattern = format!(r"\b(?:{})\b", keyword_alternation(&group.keywords));
            group_patterns.push((idx, Regex::new(&pattern)?));
        }

        Ok(Self {
            normalizer,
            group_patterns,
        })
    }

    /// Credentials in taxonomy-group order, then text order, deduplicated by display
    pub fn extract(&self, text: &str) -> Vec<NormalizedCredential> {
        let text = text.to_lowercase();
        let groups = self.normalizer.taxonomy().groups();
        let resolver = self.normalizer.resolver();

        let mut seen = HashSet::new();
        let mut credentials = Vec::new();

        for (idx, pattern) in &self.group_patterns {
            let group = &groups[*idx];
            for m in pattern.find_iter(&text) {
                let branch = resolver.branch_from_context(&text, m.start());
                let credential = self.normalizer.normalize_group(group, &branch);
                if seen.insert(credential.display.clone()) {
                    debug!("Resume credential '{}' from '{}'", credential.display, m.as_str());
                    credentials.push(credential);
                }
            }
        }

        credentials
    }
}

/// Keyword pattern tolerant of optional dots and flexible separators, longest first
pub(crate) fn keyword_alternation(keywords: &[String]) -> String {
    let mut sorted: Vec<String> = keywords.iter().map(|k| k.trim().to_lowercase()).collect();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted.dedup();

    sorted
        .iter()
        .map(|keyword| {
            regex::escape(keyword)
                .replace(r"\.", r"\.?")
                .replace(' ', r"[\s.\-]*")
        })
        .collect::<Vec<_>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    fn extractor() -> CredentialExtractor {
        let reference = ReferenceData::embedded().unwrap();
        let normalizer = Arc::new(DegreeNormalizer::new(reference.taxonomy).unwrap());
        CredentialExtractor::new(normalizer).unwrap()
    }

    fn displays(creds: &[NormalizedCredential]) -> Vec<&str> {
        creds.iter().map(|c| c.display.as_str()).collect()
    }

    #[test]
    fn test_keyword_alternation_is_flexible() {
        let pattern = keyword_alternation(&["b.tech".to_string(), "bachelor of technology".to_string()]);
        let re = Regex::new(&format!(r"\b(?:{})\b", pattern)).unwrap();
        assert!(re.is_match("btech"));
        assert!(re.is_match("b.tech"));
        assert!(re.is_match("bachelor-of-technology"));
        assert!(!re.is_match("biotech"));
    }

    #[test]
    fn test_extracts_branch_specific_degree() {
        let creds = extractor().extract("BTech in Mechanical Engineering");
        assert_eq!(displays(&creds), vec!["BTech (Mechanical Engineering)"]);
        assert_eq!(creds[0].domain, "mechanical");
    }

    #[test]
    fn test_spelling_variants_collapse() {
        let creds = extractor().extract("B.E. in Artificial Intelligence & Machine Learning");
        assert_eq!(displays(&creds), vec!["BE (Computer)"]);
    }

    #[test]
    fn test_multiple_degrees_deduplicated() {
        let text = "bsc in computer science, 2015\nmba in finance, 2018\nMBA (finance)";
        let creds = extractor().extract(text);
        assert_eq!(displays(&creds), vec!["BSc (Computer Science)", "MBA"]);
    }

    #[test]
    fn test_generic_words_are_not_credentials() {
        let creds = extractor().extract("graduate with a bachelor degree and a master plan");
        assert!(creds.is_empty());
    }
}
