//! Degree taxonomy: degree groups, branch-to-domain tables and canonical branch titles

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Domain tag used when nothing more specific is known
pub const GENERIC_DOMAIN: &str = "generic";

/// Domain tag of computing-related branches
pub const COMPUTER_DOMAIN: &str = "computer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeLevel {
    Bachelor,
    Master,
    Doctorate,
    #[serde(alias = "generic")]
    Unknown,
}

impl fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegreeLevel::Bachelor => write!(f, "bachelor"),
            DegreeLevel::Master => write!(f, "master"),
            DegreeLevel::Doctorate => write!(f, "doctorate"),
            DegreeLevel::Unknown => write!(f, "unknown"),
        }
    }
}

/// One degree group of the catalog, e.g. `BTech` with all of its spellings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegreeGroup {
    pub group: String,
    /// Display prefix, e.g. "BSc Engineering"
    pub label: String,
    pub short: String,
    pub level: DegreeLevel,
    pub family: String,
    /// Domain used when the branch is absent or resolves to `generic`
    pub default_domain: String,
    /// Whether the branch text decides the domain
    #[serde(default)]
    pub resolve_domain: bool,
    /// Whether the branch is echoed in the display string
    #[serde(default)]
    pub branch_in_display: bool,
    /// Collapse every computing branch into "<label> (Computer)"
    #[serde(default)]
    pub computer_label: bool,
    /// Generic level groups are only used for job requirements
    #[serde(default = "default_true")]
    pub extract: bool,
    /// Lookup fallback: keys containing one of these fragments map to this group
    #[serde(default)]
    pub match_contains: Vec<String>,
    pub keywords: Vec<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainBranches {
    pub domain: String,
    pub branches: Vec<String>,
}

/// Ordered keyword check yielding a canonical branch title.
///
/// Every inner list of `requires` must be satisfied by at least one of its alternatives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchTitleRule {
    pub requires: Vec<Vec<String>>,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchTitles {
    pub domain: String,
    #[serde(default)]
    pub rules: Vec<BranchTitleRule>,
    /// Title when no rule fires; `None` title-cases the raw branch text
    #[serde(default)]
    pub default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTaxonomy {
    degrees: Vec<DegreeGroup>,
    domain_mappings: Vec<DomainBranches>,
    #[serde(default)]
    branch_overrides: HashMap<String, String>,
    #[serde(default)]
    branch_titles: Vec<BranchTitles>,
}

/// Immutable, validated degree catalog
#[derive(Debug, Clone)]
pub struct DegreeTaxonomy {
    groups: Vec<DegreeGroup>,
    key_index: HashMap<String, usize>,
    domains: Vec<DomainBranches>,
    overrides: HashMap<String, String>,
    titles: Vec<BranchTitles>,
}

/// Strip punctuation and whitespace and lowercase, e.g. "B. Tech" -> "btech"
pub fn lookup_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl DegreeTaxonomy {
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawTaxonomy = serde_json::from_str(json)
            .map_err(|e| ScreenerError::ReferenceData(format!("Failed to parse degree taxonomy: {}", e)))?;
        Self::from_parts(raw.degrees, raw.domain_mappings, raw.branch_overrides, raw.branch_titles)
    }

    pub fn from_parts(
        groups: Vec<DegreeGroup>,
        domains: Vec<DomainBranches>,
        overrides: HashMap<String, String>,
        titles: Vec<BranchTitles>,
    ) -> Result<Self> {
        if groups.is_empty() {
            return Err(ScreenerError::ReferenceData("Degree taxonomy has no degree groups".to_string()));
        }
        if domains.is_empty() {
            return Err(ScreenerError::ReferenceData("Degree taxonomy has no domain mappings".to_string()));
        }

        let mut key_index = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            if group.short.trim().is_empty() || group.label.trim().is_empty() {
                return Err(ScreenerError::ReferenceData(format!(
                    "Degree group '{}' is missing its label or short name",
                    group.group
                )));
            }
            if group.keywords.is_empty() {
                return Err(ScreenerError::ReferenceData(format!(
                    "Degree group '{}' has no keywords",
                    group.group
                )));
            }
            for keyword in &group.keywords {
                let key = lookup_key(keyword);
                if key.is_empty() {
                    return Err(ScreenerError::ReferenceData(format!(
                        "Degree group '{}' has an empty keyword",
                        group.group
                    )));
                }
                // first group to claim a spelling keeps it
                key_index.entry(key).or_insert(idx);
            }
        }

        let domains = domains
            .into_iter()
            .map(|d| DomainBranches {
                domain: d.domain.to_lowercase(),
                branches: d.branches.iter().map(|b| b.trim().to_lowercase()).collect(),
            })
            .collect();

        let overrides = overrides
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v.to_lowercase()))
            .collect();

        Ok(Self {
            groups,
            key_index,
            domains,
            overrides,
            titles,
        })
    }

    pub fn groups(&self) -> &[DegreeGroup] {
        &self.groups
    }

    /// Find the degree group for a raw keyword such as "B.Tech" or "bachelor of laws"
    pub fn group_for_keyword(&self, raw: &str) -> Option<&DegreeGroup> {
        let key = lookup_key(raw);
        if key.is_empty() {
            return None;
        }
        if let Some(&idx) = self.key_index.get(&key) {
            return Some(&self.groups[idx]);
        }
        self.groups.iter().find(|group| {
            group
                .match_contains
                .iter()
                .any(|fragment| key.contains(fragment.as_str()))
        })
    }

    /// Domain tables in priority order
    pub fn domains(&self) -> &[DomainBranches] {
        &self.domains
    }

    /// High-frequency single-word branch overrides, matched exactly
    pub fn override_domain(&self, branch: &str) -> Option<&str> {
        self.overrides.get(branch).map(String::as_str)
    }

    pub fn titles_for(&self, domain: &str) -> Option<&BranchTitles> {
        self.titles.iter().find(|t| t.domain == domain)
    }
}
