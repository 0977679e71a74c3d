//! Education requirements parsed from job descriptions

use crate::education::credential::RequirementEntry;
use crate::education::extractor::keyword_alternation;
use crate::education::normalizer::DegreeNormalizer;
use crate::error::Result;
use crate::reference::{DegreeLevel, COMPUTER_DOMAIN, GENERIC_DOMAIN};
use log::debug;
use regex::Regex;
use std::sync::Arc;

/// Named degrees that count as a requirement wherever they appear
const STANDALONE_DEGREES: &[&str] = &["mba", "mbbs", "llb"];

pub struct RequirementParser {
    normalizer: Arc<DegreeNormalizer>,
    degree_with_branch: Regex,
    bachelor_words: Regex,
    technical_cue: Regex,
    master_words: Regex,
    doctorate_words: Regex,
    standalone: Vec<(String, Regex)>,
}

impl RequirementParser {
    pub fn new(normalizer: Arc<DegreeNormalizer>) -> Result<Self> {
        let keywords: Vec<String> = normalizer
            .taxonomy()
            .groups()
            .iter()
            .filter(|g| g.extract)
            .flat_map(|g| g.keywords.iter().cloned())
            .collect();

        let degree_with_branch = Regex::new(&format!(
            r"\b({})\b[\s/.,:]*(?:\bin\b|-)\s*([a-z&/\- ]+)",
            keyword_alternation(&keywords)
        ))?;

        let standalone = STANDALONE_DEGREES
            .iter()
            .map(|kw| Ok((kw.to_string(), Regex::new(&format!(r"\b{}\b", kw))?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            normalizer,
            degree_with_branch,
            bachelor_words: Regex::new(r"\b(?:bachelor|bachelor's|bachelors|graduate|ug|undergraduate)\b")?,
            technical_cue: Regex::new(r"\b(?:cs|it|computer|computing|software|technical)\b")?,
            master_words: Regex::new(r"\b(?:master|master's|masters|postgraduate|pg)\b")?,
            doctorate_words: Regex::new(r"\b(?:phd|ph\.d|doctorate|doctoral)\b")?,
            standalone,
        })
    }

    /// Requirements in detector order; results of the three detectors are unioned
    pub fn parse(&self, jd_text: &str) -> Vec<RequirementEntry> {
        let jd = jd_text.to_lowercase();
        let mut requirements = self.specific_degrees(&jd);
        requirements.extend(self.generic_levels(&jd));

        for (keyword, pattern) in &self.standalone {
            if !pattern.is_match(&jd) {
                continue;
            }
            let entry = self.normalizer.normalize(keyword, "");
            if requirements.iter().any(|r| r.short == entry.short) {
                continue;
            }
            requirements.push(entry);
        }

        debug!(
            "Job requirements: {:?}",
            requirements.iter().map(|r| r.display.as_str()).collect::<Vec<_>>()
        );
        requirements
    }

    /// "BTech in Computer Science", "MSc - Physics".
    ///
    /// The text after the joiner must name a known branch; "be in charge of" is not a degree.
    fn specific_degrees(&self, jd: &str) -> Vec<RequirementEntry> {
        let resolver = self.normalizer.resolver();
        self.degree_with_branch
            .captures_iter(jd)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let degree = caps.get(1)?.as_str();
                let literal_branch = caps.get(2).map(|m| m.as_str().trim()).unwrap_or_default();
                if resolver.resolve_domain(literal_branch) == GENERIC_DOMAIN {
                    debug!("Ignoring '{}': no known branch follows", whole.as_str().trim());
                    return None;
                }

                let branch = resolver.branch_from_context(jd, whole.start());
                let branch = if branch.is_empty() { literal_branch.to_string() } else { branch };
                Some(self.normalizer.normalize(degree, &branch))
            })
            .collect()
    }

    /// "bachelor's degree", "graduate", "postgraduate", "PhD"
    fn generic_levels(&self, jd: &str) -> Vec<RequirementEntry> {
        let mut requirements = Vec::new();

        if self.bachelor_words.is_match(jd) {
            if self.technical_cue.is_match(jd) {
                requirements.push(RequirementEntry::new(
                    "Bachelor (Computer)",
                    DegreeLevel::Bachelor,
                    GENERIC_DOMAIN,
                    COMPUTER_DOMAIN,
                    "Bachelor",
                ));
            } else {
                requirements.push(RequirementEntry::new(
                    "Bachelor's Degree",
                    DegreeLevel::Bachelor,
                    GENERIC_DOMAIN,
                    GENERIC_DOMAIN,
                    "Bachelor",
                ));
            }
        }

        if self.master_words.is_match(jd) {
            requirements.push(RequirementEntry::new(
                "Master's Degree",
                DegreeLevel::Master,
                GENERIC_DOMAIN,
                GENERIC_DOMAIN,
                "Master",
            ));
        }

        if self.doctorate_words.is_match(jd) {
            requirements.push(RequirementEntry::new(
                "PhD",
                DegreeLevel::Doctorate,
                "research",
                GENERIC_DOMAIN,
                "PhD",
            ));
        }

        requirements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    fn parser() -> RequirementParser {
        let reference = ReferenceData::embedded().unwrap();
        let normalizer = Arc::new(DegreeNormalizer::new(reference.taxonomy).unwrap());
        RequirementParser::new(normalizer).unwrap()
    }

    fn displays(reqs: &[RequirementEntry]) -> Vec<&str> {
        reqs.iter().map(|r| r.display.as_str()).collect()
    }

    #[test]
    fn test_generic_bachelor_with_technical_cue() {
        let reqs = parser().parse("Bachelor's degree in Computer Science required");
        assert_eq!(displays(&reqs), vec!["Bachelor (Computer)"]);
        assert_eq!(reqs[0].domain, "computer");
        assert_eq!(reqs[0].level, DegreeLevel::Bachelor);
    }

    #[test]
    fn test_generic_bachelor_without_cue() {
        let reqs = parser().parse("Any bachelor's degree required");
        assert_eq!(displays(&reqs), vec!["Bachelor's Degree"]);
        assert_eq!(reqs[0].domain, "generic");
    }

    #[test]
    fn test_specific_degree_with_branch() {
        let reqs = parser().parse("B.Tech in Computer Science or equivalent");
        assert_eq!(reqs[0].display, "BTech (Computer)");
        assert_eq!(reqs[0].domain, "computer");
    }

    #[test]
    fn test_master_and_doctorate_levels() {
        let reqs = parser().parse("Master's or PhD preferred");
        assert_eq!(displays(&reqs), vec!["Master's Degree", "PhD"]);
        assert_eq!(reqs[1].level, DegreeLevel::Doctorate);
    }

    #[test]
    fn test_standalone_degrees() {
        let reqs = parser().parse("MBBS required; LLB a plus");
        assert_eq!(displays(&reqs), vec!["MBBS", "LLB"]);
    }

    #[test]
    fn test_standalone_not_duplicated_after_specific_match() {
        let reqs = parser().parse("mba in marketing");
        let mba_count = reqs.iter().filter(|r| r.short == "MBA").count();
        assert_eq!(mba_count, 1);
    }

    #[test]
    fn test_common_words_before_in_are_not_degrees() {
        let reqs = parser().parse("You will be in charge of deployments and me in meetings");
        assert!(reqs.is_empty());
    }

    #[test]
    fn test_no_education_language() {
        assert!(parser().parse("5 years of rust experience").is_empty());
    }

    #[test]
    fn test_common_words_are_not_degrees() {
        let reqs = parser().parse("you will be responsible for data pipelines");
        assert!(reqs.is_empty());
    }
}
