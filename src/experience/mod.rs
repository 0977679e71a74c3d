//! Work-experience duration from resume dates

pub mod date_parser;
pub mod date_token;
pub mod duration;
pub mod ranges;
pub mod requirement;

pub use date_parser::DateParser;
pub use date_token::{DateToken, DateTokenNormalizer};
pub use duration::ExperienceRecord;
pub use ranges::{DateRange, RangeExtractor};
pub use requirement::RequirementYearsExtractor;

use crate::config::ExperienceConfig;
use crate::document::SectionLocator;
use crate::error::Result;
use crate::reference::EXPERIENCE_SECTION;
use chrono::{Local, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceVerdict {
    pub total_years: u32,
    pub total_months: u32,
    pub jd_required_years: u32,
    pub jd_required_months: u32,
    pub meets_requirement: bool,
    pub experience_ranges: Vec<ExperienceRecord>,
}

impl ExperienceVerdict {
    pub fn total_in_months(&self) -> u32 {
        self.total_years.saturating_mul(12).saturating_add(self.total_months)
    }

    pub fn required_in_months(&self) -> u32 {
        self.jd_required_years.saturating_mul(12).saturating_add(self.jd_required_months)
    }
}

/// Resume experience totals against the job's stated minimum
pub struct ExperienceAnalyzer {
    locator: Arc<SectionLocator>,
    ranges: RangeExtractor,
    requirement: RequirementYearsExtractor,
    inclusive_months: bool,
    as_of: Option<NaiveDate>,
}

impl ExperienceAnalyzer {
    pub fn new(locator: Arc<SectionLocator>, config: &ExperienceConfig) -> Result<Self> {
        Ok(Self {
            locator,
            ranges: RangeExtractor::new()?,
            requirement: RequirementYearsExtractor::new()?,
            inclusive_months: config.inclusive_months,
            as_of: config.as_of,
        })
    }

    /// The date "present" resolves to: pinned by configuration, else the local clock
    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn analyze(&self, resume_text: &str, jd_text: &str) -> ExperienceVerdict {
        let today = self.today();
        let (jd_required_years, jd_required_months) = self.requirement.extract(jd_text);

        let section = self.locator.section(&resume_text.to_lowercase(), EXPERIENCE_SECTION);
        let ranges = self.ranges.extract(&section, today);
        let (experience_ranges, total) = duration::aggregate(&ranges, today, self.inclusive_months);
        let (total_years, total_months) = duration::split_months(total);

        let mut verdict = ExperienceVerdict {
            total_years,
            total_months,
            jd_required_years,
            jd_required_months,
            meets_requirement: false,
            experience_ranges,
        };
        verdict.meets_requirement = total >= verdict.required_in_months();

        info!(
            "Experience: {}y {}m across {} range(s), required {}y {}m, meets={}",
            verdict.total_years,
            verdict.total_months,
            verdict.experience_ranges.len(),
            verdict.jd_required_years,
            verdict.jd_required_months,
            verdict.meets_requirement
        );
        verdict
    }
}
