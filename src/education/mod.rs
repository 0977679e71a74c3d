//! Credential normalization and matching

pub mod branch;
pub mod credential;
pub mod extractor;
pub mod matcher;
pub mod normalizer;
pub mod requirements;

pub use branch::BranchResolver;
pub use credential::{EducationVerdict, NormalizedCredential, RequirementEntry};
pub use extractor::CredentialExtractor;
pub use matcher::match_requirements;
pub use normalizer::DegreeNormalizer;
pub use requirements::RequirementParser;

use crate::document::SectionLocator;
use crate::error::Result;
use crate::reference::{ReferenceData, EDUCATION_SECTION};
use log::info;
use std::sync::Arc;

/// Resume credentials against job-description requirements
pub struct EducationAnalyzer {
    locator: Arc<SectionLocator>,
    extractor: CredentialExtractor,
    parser: RequirementParser,
}

impl EducationAnalyzer {
    pub fn new(reference: &ReferenceData, locator: Arc<SectionLocator>) -> Result<Self> {
        let normalizer = Arc::new(DegreeNormalizer::new(Arc::clone(&reference.taxonomy))?);
        Ok(Self {
            locator,
            extractor: CredentialExtractor::new(Arc::clone(&normalizer))?,
            parser: RequirementParser::new(normalizer)?,
        })
    }

    pub fn analyze(&self, resume_text: &str, jd_text: &str) -> EducationVerdict {
        let resume_text = resume_text.to_lowercase();
        let education = self.locator.section_or_full_text(&resume_text, EDUCATION_SECTION);

        let credentials = self.extractor.extract(&education);
        let requirements = self.parser.parse(jd_text);
        let verdict = match_requirements(&requirements, &credentials);

        info!(
            "Education: {} requirement(s), {} credential(s), matched={}",
            verdict.jd_detected.len(),
            verdict.resume_detected.len(),
            verdict.matched
        );
        verdict
    }
}
