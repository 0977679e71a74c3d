//! Credential value types

use crate::reference::DegreeLevel;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A degree normalized into the taxonomy: level x family x domain.
///
/// Two credentials are equal when their display strings are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedCredential {
    pub display: String,
    pub level: DegreeLevel,
    pub family: String,
    pub domain: String,
    pub short: String,
}

/// One obligation parsed from a job description
pub type RequirementEntry = NormalizedCredential;

impl NormalizedCredential {
    pub fn new(
        display: impl Into<String>,
        level: DegreeLevel,
        family: impl Into<String>,
        domain: impl Into<String>,
        short: impl Into<String>,
    ) -> Self {
        Self {
            display: display.into(),
            level,
            family: family.into(),
            domain: domain.into(),
            short: short.into(),
        }
    }
}

impl PartialEq for NormalizedCredential {
    fn eq(&self, other: &Self) -> bool {
        self.display == other.display
    }
}

impl Eq for NormalizedCredential {}

impl Hash for NormalizedCredential {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.display.hash(state);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationVerdict {
    pub jd_detected: Vec<String>,
    pub resume_detected: Vec<String>,
    pub matched: bool,
    pub missing_groups: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_display_only() {
        let a = NormalizedCredential::new("BE (Computer)", DegreeLevel::Bachelor, "engineering", "computer", "BE");
        let b = NormalizedCredential::new("BE (Computer)", DegreeLevel::Master, "generic", "generic", "X");
        let c = NormalizedCredential::new("BE", DegreeLevel::Bachelor, "engineering", "engineering", "BE");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
