//! Degree normalization into the taxonomy

use crate::education::branch::BranchResolver;
use crate::education::credential::NormalizedCredential;
use crate::error::Result;
use crate::reference::{DegreeGroup, DegreeLevel, DegreeTaxonomy, COMPUTER_DOMAIN, GENERIC_DOMAIN};
use std::sync::Arc;

pub struct DegreeNormalizer {
    taxonomy: Arc<DegreeTaxonomy>,
    resolver: BranchResolver,
}

impl DegreeNormalizer {
    pub fn new(taxonomy: Arc<DegreeTaxonomy>) -> Result<Self> {
        let resolver = BranchResolver::new(Arc::clone(&taxonomy))?;
        Ok(Self { taxonomy, resolver })
    }

    pub fn resolver(&self) -> &BranchResolver {
        &self.resolver
    }

    pub fn taxonomy(&self) -> &DegreeTaxonomy {
        &self.taxonomy
    }

    /// Normalize a raw degree keyword ("B.Tech", "llb") with an optional branch.
    ///
    /// Unrecognized keywords come back as an `unknown`-level credential, never an error.
    pub fn normalize(&self, keyword: &str, branch: &str) -> NormalizedCredential {
        match self.taxonomy.group_for_keyword(keyword) {
            Some(group) => self.normalize_group(group, branch),
            None => {
                let upper = keyword.trim().to_uppercase();
                NormalizedCredential::new(
                    upper.clone(),
                    DegreeLevel::Unknown,
                    GENERIC_DOMAIN,
                    GENERIC_DOMAIN,
                    upper,
                )
            }
        }
    }

    pub fn normalize_group(&self, group: &DegreeGroup, branch: &str) -> NormalizedCredential {
        let branch = branch.trim();

        let domain = if group.resolve_domain {
            let resolved = self.resolver.resolve_domain(branch);
            if resolved == GENERIC_DOMAIN {
                group.default_domain.clone()
            } else {
                resolved
            }
        } else {
            group.default_domain.clone()
        };

        let display = if !group.branch_in_display || branch.is_empty() {
            group.label.clone()
        } else if group.computer_label && domain == COMPUTER_DOMAIN {
            format!("{} (Computer)", group.label)
        } else {
            format!("{} ({})", group.label, branch)
        };

        NormalizedCredential::new(display, group.level, group.family.clone(), domain, group.short.clone())
    }
}
