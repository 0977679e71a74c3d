//! Screening engine combining the experience and education analyses

use crate::config::ExperienceConfig;
use crate::document::SectionLocator;
use crate::education::{EducationAnalyzer, EducationVerdict};
use crate::error::Result;
use crate::experience::{ExperienceAnalyzer, ExperienceVerdict};
use crate::reference::ReferenceData;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Coarse seniority derived from total experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceBand {
    Fresher,
    Intermediate,
    Experienced,
}

impl ExperienceBand {
    pub fn from_months(total_months: u32) -> Self {
        match total_months {
            0..=11 => ExperienceBand::Fresher,
            12..=35 => ExperienceBand::Intermediate,
            _ => ExperienceBand::Experienced,
        }
    }
}

impl fmt::Display for ExperienceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExperienceBand::Fresher => "Fresher",
            ExperienceBand::Intermediate => "Intermediate",
            ExperienceBand::Experienced => "Experienced",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub resume_path: Option<String>,
    pub job_path: Option<String>,
    pub experience: ExperienceVerdict,
    pub education: EducationVerdict,
    pub experience_band: ExperienceBand,
    /// Wall-clock time of the analysis
    #[serde(default)]
    pub processing_time_ms: u64,
}

impl ScreeningReport {
    pub fn with_paths(mut self, resume_path: impl Into<String>, job_path: impl Into<String>) -> Self {
        self.resume_path = Some(resume_path.into());
        self.job_path = Some(job_path.into());
        self
    }
}

/// Entry point for screening one resume against one job description.
///
/// Reference tables and compiled patterns are built once in `new`; every
/// analysis call afterwards is a pure function of its two texts, so one
/// `Screener` can be shared across threads.
pub struct Screener {
    experience: ExperienceAnalyzer,
    education: EducationAnalyzer,
}

impl Screener {
    pub fn new(reference: ReferenceData, config: &ExperienceConfig) -> Result<Self> {
        let locator = Arc::new(SectionLocator::new(Arc::clone(&reference.sections))?);
        Ok(Self {
            experience: ExperienceAnalyzer::new(Arc::clone(&locator), config)?,
            education: EducationAnalyzer::new(&reference, locator)?,
        })
    }

    /// Experience verdict; any internal failure yields the all-zero default
    pub fn extract_experience(&self, resume_text: &str, jd_text: &str) -> ExperienceVerdict {
        guarded("experience", || self.experience.analyze(resume_text, jd_text))
    }

    /// Education verdict; any internal failure yields the empty default
    pub fn extract_education(&self, resume_text: &str, jd_text: &str) -> EducationVerdict {
        guarded("education", || self.education.analyze(resume_text, jd_text))
    }

    pub fn screen(&self, resume_text: &str, jd_text: &str) -> ScreeningReport {
        let start = Instant::now();
        let experience = self.extract_experience(resume_text, jd_text);
        let education = self.extract_education(resume_text, jd_text);
        let experience_band = ExperienceBand::from_months(experience.total_in_months());

        ScreeningReport {
            resume_path: None,
            job_path: None,
            experience,
            education,
            experience_band,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Run one analysis, substituting the default verdict if it panics
fn guarded<T: Default>(what: &str, analysis: impl FnOnce() -> T) -> T {
    catch_unwind(AssertUnwindSafe(analysis)).unwrap_or_else(|_| {
        warn!("{} analysis failed, using the default verdict", what);
        T::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn screener() -> Screener {
        let config = ExperienceConfig {
            inclusive_months: true,
            as_of: NaiveDate::from_ymd_opt(2024, 6, 15),
        };
        Screener::new(ReferenceData::embedded().unwrap(), &config).unwrap()
    }

    #[test]
    fn test_experience_bands() {
        assert_eq!(ExperienceBand::from_months(0), ExperienceBand::Fresher);
        assert_eq!(ExperienceBand::from_months(11), ExperienceBand::Fresher);
        assert_eq!(ExperienceBand::from_months(12), ExperienceBand::Intermediate);
        assert_eq!(ExperienceBand::from_months(35), ExperienceBand::Intermediate);
        assert_eq!(ExperienceBand::from_months(36), ExperienceBand::Experienced);
        assert_eq!(ExperienceBand::from_months(120), ExperienceBand::Experienced);
        assert_eq!(ExperienceBand::Intermediate.to_string(), "Intermediate");
    }

    #[test]
    fn test_screen_combines_verdicts() {
        let resume = "Experience\nJan 2019 - Dec 2021\n\nEducation\nBE in Computer Engineering, 2018";
        let report = screener().screen(resume, "Bachelor's in CS with 2+ years");
        assert_eq!(report.experience.total_years, 3);
        assert!(report.experience.meets_requirement);
        assert!(report.education.matched);
        assert_eq!(report.experience_band, ExperienceBand::Experienced);
        assert!(report.resume_path.is_none());
    }

    #[test]
    fn test_guarded_falls_back_to_default() {
        let verdict: ExperienceVerdict = guarded("experience", || panic!("boom"));
        assert_eq!(verdict, ExperienceVerdict::default());
        assert!(!verdict.meets_requirement);
    }

    #[test]
    fn test_empty_inputs() {
        let screener = screener();
        let experience = screener.extract_experience("", "");
        assert_eq!(experience.total_in_months(), 0);
        assert!(experience.meets_requirement);

        let education = screener.extract_education("", "");
        assert!(education.matched);
        assert!(education.jd_detected.is_empty());
    }
}
