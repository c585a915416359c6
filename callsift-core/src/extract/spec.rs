//! Category ownership for the three extractors.

use callsift_types::Section;

use crate::pattern::category::*;

/// The section an extractor fills and the categories it owns, in output
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorSpec {
    section: Section,
    categories: Vec<String>,
}

impl ExtractorSpec {
    /// Creates a spec. Duplicate category names are dropped, first one wins.
    pub fn new<I, S>(section: Section, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut owned: Vec<String> = Vec::new();
        for c in categories {
            let c = c.into();
            if !owned.contains(&c) {
                owned.push(c);
            }
        }
        Self {
            section,
            categories: owned,
        }
    }

    /// Vehicle attributes. "Distance Travelled" and "Make Year" have no
    /// built-in patterns and stay absent unless patterns are added.
    pub fn customer_requirements() -> Self {
        Self::new(
            Section::CustomerRequirements,
            [
                CAR_TYPE,
                FUEL_TYPE,
                COLOR,
                DISTANCE_TRAVELLED,
                MAKE_YEAR,
                TRANSMISSION_TYPE,
            ],
        )
    }

    /// Company policies.
    pub fn company_policies() -> Self {
        Self::new(
            Section::CompanyPolicies,
            [RETURN_POLICY, MONEY_BACK_GUARANTEE, FREE_RC_TRANSFER, FREE_RSA],
        )
    }

    /// Customer objections.
    pub fn customer_objections() -> Self {
        Self::new(
            Section::CustomerObjections,
            [
                REFURBISHMENT_QUALITY,
                CAR_ISSUES,
                PRICE_ISSUES,
                CUSTOMER_EXPERIENCE_ISSUES,
            ],
        )
    }

    /// The three built-in specs, in section order.
    pub fn sales_call() -> [Self; 3] {
        [
            Self::customer_requirements(),
            Self::company_policies(),
            Self::customer_objections(),
        ]
    }

    /// Section this spec fills.
    pub fn section(&self) -> Section {
        self.section
    }

    /// Owned categories, in output order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Returns `true` if this spec owns `category`.
    pub fn owns(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_specs_are_disjoint() {
        let specs = ExtractorSpec::sales_call();
        for (i, a) in specs.iter().enumerate() {
            for b in specs.iter().skip(i + 1) {
                for c in a.categories() {
                    assert!(!b.owns(c), "{c} owned by {} and {}", a.section(), b.section());
                }
            }
        }
    }

    #[test]
    fn builtin_specs_follow_section_order() {
        let sections: Vec<_> = ExtractorSpec::sales_call()
            .iter()
            .map(ExtractorSpec::section)
            .collect();
        assert_eq!(sections, Section::ALL);
    }

    #[test]
    fn requirements_keep_declared_order() {
        let spec = ExtractorSpec::customer_requirements();
        assert_eq!(
            spec.categories(),
            [
                "Car Type",
                "Fuel Type",
                "Color",
                "Distance Travelled",
                "Make Year",
                "Transmission Type"
            ]
        );
    }

    #[test]
    fn duplicates_collapse() {
        let spec = ExtractorSpec::new(Section::CompanyPolicies, ["A", "B", "A"]);
        assert_eq!(spec.categories(), ["A", "B"]);
        assert!(spec.owns("B"));
        assert!(!spec.owns("C"));
    }

    #[test]
    fn price_is_unowned() {
        assert!(ExtractorSpec::sales_call().iter().all(|s| !s.owns(PRICE)));
    }
}
