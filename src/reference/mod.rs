//! Read-only reference data shared by the extractors
//!
//! Tables are loaded once, validated, and handed to each component explicitly.
//! A load failure is fatal: empty tables would only produce confidently wrong verdicts.

pub mod sections;
pub mod taxonomy;

pub use sections::{SectionEntry, SectionTable, EDUCATION_SECTION, EXPERIENCE_SECTION};
pub use taxonomy::{DegreeGroup, DegreeLevel, DegreeTaxonomy, COMPUTER_DOMAIN, GENERIC_DOMAIN};

use crate::config::ReferenceConfig;
use crate::error::{Result, ScreenerError};
use log::{debug, info};
use std::path::Path;
use std::sync::Arc;

const EMBEDDED_TAXONOMY: &str = include_str!("../../data/education_data.json");
const EMBEDDED_SECTIONS: &str = include_str!("../../data/sections.json");

#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub taxonomy: Arc<DegreeTaxonomy>,
    pub sections: Arc<SectionTable>,
}

impl ReferenceData {
    /// Tables compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_TAXONOMY, EMBEDDED_SECTIONS)
    }

    pub fn from_json(taxonomy_json: &str, sections_json: &str) -> Result<Self> {
        Ok(Self {
            taxonomy: Arc::new(DegreeTaxonomy::from_json(taxonomy_json)?),
            sections: Arc::new(SectionTable::from_json(sections_json)?),
        })
    }

    /// Load tables named in the configuration, falling back to the embedded copies
    pub fn load(config: &ReferenceConfig) -> Result<Self> {
        let taxonomy_json = match &config.taxonomy_path {
            Some(path) => read_table(path)?,
            None => EMBEDDED_TAXONOMY.to_string(),
        };
        let sections_json = match &config.sections_path {
            Some(path) => read_table(path)?,
            None => EMBEDDED_SECTIONS.to_string(),
        };

        let data = Self::from_json(&taxonomy_json, &sections_json)?;
        info!(
            "Loaded reference data: {} degree groups, {} sections",
            data.taxonomy.groups().len(),
            data.sections.names().count()
        );
        Ok(data)
    }
}

fn read_table(path: &Path) -> Result<String> {
    debug!("Reading reference table: {}", path.display());
    std::fs::read_to_string(path).map_err(|e| {
        ScreenerError::ReferenceData(format!("Failed to read '{}': {}", path.display(), e))
    })
}
