//! Section-heading keyword table

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};

pub const EXPERIENCE_SECTION: &str = "Experience";
pub const EDUCATION_SECTION: &str = "Education";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSections {
    sections: Vec<SectionEntry>,
}

#[derive(Debug, Clone)]
pub struct SectionTable {
    sections: Vec<SectionEntry>,
}

impl SectionTable {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSections = serde_json::from_str(json)
            .map_err(|e| ScreenerError::ReferenceData(format!("Failed to parse section table: {}", e)))?;
        Self::new(raw.sections)
    }

    pub fn new(sections: Vec<SectionEntry>) -> Result<Self> {
        let sections: Vec<SectionEntry> = sections
            .into_iter()
            .map(|s| SectionEntry {
                name: s.name,
                keywords: s
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
            })
            .collect();

        let has_experience = sections
            .iter()
            .any(|s| s.name == EXPERIENCE_SECTION && !s.keywords.is_empty());
        if !has_experience {
            return Err(ScreenerError::ReferenceData(
                "Section table needs an 'Experience' entry with keywords".to_string(),
            ));
        }
        if !sections.iter().any(|s| s.name != EXPERIENCE_SECTION && !s.keywords.is_empty()) {
            return Err(ScreenerError::ReferenceData(
                "Section table needs at least one section besides 'Experience'".to_string(),
            ));
        }

        Ok(Self { sections })
    }

    pub fn keywords_for(&self, name: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.keywords.as_slice())
    }

    /// Keywords of every section except `name`
    pub fn keywords_except(&self, name: &str) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.name != name)
            .flat_map(|s| s.keywords.iter().map(String::as_str))
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }
}
