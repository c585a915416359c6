//! Category resolution and record assembly.
//!
//! Each [`CategoryExtractor`] owns a disjoint set of categories. It walks
//! the full match list in matcher order and fills its own categories,
//! ignoring the rest. [`build_record`] nests the three resulting maps.

mod spec;

pub use spec::ExtractorSpec;

use callsift_types::{CategoryMap, Match, Record, Section};
use serde::{Deserialize, Serialize};

/// Which match wins when an owned category matches more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Every match overwrites the previous one; the last in document order
    /// is kept.
    #[default]
    LastMatchWins,
    /// The first match in document order is kept.
    FirstMatchWins,
}

/// Resolves matches for one section.
#[derive(Debug, Clone)]
pub struct CategoryExtractor {
    spec: ExtractorSpec,
    policy: ResolutionPolicy,
}

impl CategoryExtractor {
    /// Creates an extractor for a spec.
    pub fn new(spec: ExtractorSpec, policy: ResolutionPolicy) -> Self {
        Self { spec, policy }
    }

    /// The spec this extractor resolves.
    pub fn spec(&self) -> &ExtractorSpec {
        &self.spec
    }

    /// Section this extractor fills.
    pub fn section(&self) -> Section {
        self.spec.section()
    }

    /// Active resolution policy.
    pub fn policy(&self) -> ResolutionPolicy {
        self.policy
    }

    /// Maps every owned category to its resolved text, absent when no
    /// match qualifies. Never fails.
    pub fn resolve(&self, matches: &[Match<'_>]) -> CategoryMap {
        let mut resolved = CategoryMap::with_categories(self.spec.categories().iter().cloned());

        for m in matches {
            if !self.spec.owns(m.category) {
                continue;
            }
            if self.policy == ResolutionPolicy::FirstMatchWins && resolved.is_set(m.category) {
                continue;
            }
            resolved.set(m.category, m.text.as_str());
        }

        resolved
    }
}

/// Nests the three section maps into a record.
pub fn build_record(
    requirements: CategoryMap,
    policies: CategoryMap,
    objections: CategoryMap,
) -> Record {
    Record::new(requirements, policies, objections)
}
