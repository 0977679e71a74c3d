//! Requirement matching between job and resume credentials

use crate::education::credential::{EducationVerdict, NormalizedCredential, RequirementEntry};
use crate::reference::GENERIC_DOMAIN;

/// A resume credential satisfies a generic-domain requirement at the same level,
/// and any other requirement when both level and domain agree.
pub fn satisfies(credential: &NormalizedCredential, requirement: &RequirementEntry) -> bool {
    if credential.level != requirement.level {
        return false;
    }
    requirement.domain == GENERIC_DOMAIN || credential.domain == requirement.domain
}

/// The resume matches when at least one requirement is satisfied.
/// No requirements at all means a match.
pub fn match_requirements(
    requirements: &[RequirementEntry],
    credentials: &[NormalizedCredential],
) -> EducationVerdict {
    let mut verdict = EducationVerdict {
        jd_detected: requirements.iter().map(|r| r.display.clone()).collect(),
        resume_detected: credentials.iter().map(|c| c.display.clone()).collect(),
        matched: requirements.is_empty(),
        missing_groups: Vec::new(),
    };

    for requirement in requirements {
        if credentials.iter().any(|c| satisfies(c, requirement)) {
            verdict.matched = true;
        } else {
            verdict.missing_groups.push(requirement.display.clone());
        }
    }

    verdict
}
