//! Built-in patterns for used-car sales-call transcripts.

use super::predicate::{Predicate, Step};
use super::registry::{PatternRegistry, PatternRegistryBuilder};

/// Category names known to the built-in patterns and extractor specs.
pub mod category {
    pub const CAR_TYPE: &str = "Car Type";
    pub const FUEL_TYPE: &str = "Fuel Type";
    pub const COLOR: &str = "Color";
    pub const DISTANCE_TRAVELLED: &str = "Distance Travelled";
    pub const MAKE_YEAR: &str = "Make Year";
    pub const TRANSMISSION_TYPE: &str = "Transmission Type";

    pub const RETURN_POLICY: &str = "Return Policy";
    pub const MONEY_BACK_GUARANTEE: &str = "Money Back Guarantee";
    pub const FREE_RC_TRANSFER: &str = "Free RC Transfer";
    pub const FREE_RSA: &str = "Free RSA";

    pub const REFURBISHMENT_QUALITY: &str = "Refurbishment Quality";
    pub const CAR_ISSUES: &str = "Car Issues";
    pub const PRICE_ISSUES: &str = "Price Issues";
    pub const CUSTOMER_EXPERIENCE_ISSUES: &str = "Customer Experience Issues";

    /// Quoted rupee amounts. No extractor owns it.
    pub const PRICE: &str = "Price";
}

fn any_of(words: &[&str]) -> [Step; 1] {
    [Step::one(Predicate::any_of(words))]
}

fn literal(word: &str) -> [Step; 1] {
    [Step::one(Predicate::literal(word))]
}

/// Appends the sales-call patterns to a builder.
pub fn register_sales_call(b: &mut PatternRegistryBuilder) -> &mut PatternRegistryBuilder {
    use category::*;

    b.register(CAR_TYPE, any_of(&["hatchback", "suv", "sedan"]))
        .register(CAR_TYPE, any_of(&["hatch", "suv", "sed"]))
        .register(FUEL_TYPE, any_of(&["diesel", "petrol", "gasoline"]))
        .register(
            COLOR,
            any_of(&[
                "white", "black", "red", "blue", "green", "yellow", "grey", "silver", "brown",
                "orange", "purple",
            ]),
        )
        .register(COLOR, any_of(&["color", "colour"]))
        .register(TRANSMISSION_TYPE, any_of(&["manual", "automatic", "auto"]))
        .register(RETURN_POLICY, any_of(&["return", "refund", "policy"]))
        .register(MONEY_BACK_GUARANTEE, literal("money-back"))
        .register(MONEY_BACK_GUARANTEE, literal("guarantee"))
        .register(
            FREE_RC_TRANSFER,
            any_of(&["rc", "transfer", "registration", "certificate"]),
        )
        .register(FREE_RSA, literal("rsa"))
        .register(FREE_RSA, any_of(&["roadside", "assistance"]))
        .register(REFURBISHMENT_QUALITY, any_of(&["refurbishment", "quality"]))
        .register(REFURBISHMENT_QUALITY, any_of(&["refurb", "condition"]))
        .register(CAR_ISSUES, any_of(&["car", "issues", "problems", "faults"]))
        .register(PRICE_ISSUES, any_of(&["price", "issues", "cost"]))
        .register(PRICE_ISSUES, any_of(&["price", "concern"]))
        .register(
            CUSTOMER_EXPERIENCE_ISSUES,
            any_of(&["customer", "experience", "wait", "salesperson"]),
        )
        .register(
            CUSTOMER_EXPERIENCE_ISSUES,
            any_of(&["service", "behavior", "experience"]),
        )
        .register(
            PRICE,
            [
                Step::one(Predicate::literal("rs")),
                Step::one(Predicate::Digit),
                Step::optional(Predicate::Punct),
            ],
        )
}

impl PatternRegistry {
    /// Builder pre-loaded with the built-in patterns, for appending more.
    pub fn sales_call_builder() -> PatternRegistryBuilder {
        let mut b = PatternRegistryBuilder::new();
        register_sales_call(&mut b);
        b
    }

    /// Registry holding only the built-in sales-call patterns.
    pub fn sales_call() -> Self {
        Self::sales_call_builder()
            .build()
            .unwrap_or_else(|e| panic!("built-in sales-call pattern is malformed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::category::*;
    use super::*;

    #[test]
    fn builtins_build() {
        let registry = PatternRegistry::sales_call();
        assert_eq!(registry.len(), 20);
        assert_eq!(registry.categories().count(), 13);
    }

    #[test]
    fn alternatives_keep_registration_order() {
        let registry = PatternRegistry::sales_call();
        let ids: Vec<_> = registry.patterns_for(CAR_TYPE).map(|p| p.id()).collect();
        assert_eq!(ids, [0, 1]);
        let ids: Vec<_> = registry
            .patterns_for(MONEY_BACK_GUARANTEE)
            .map(|p| p.id())
            .collect();
        assert_eq!(ids, [7, 8]);
    }

    #[test]
    fn placeholder_categories_have_no_patterns() {
        let registry = PatternRegistry::sales_call();
        assert!(!registry.has_category(DISTANCE_TRAVELLED));
        assert!(!registry.has_category(MAKE_YEAR));
    }

    #[test]
    fn price_pattern_shape() {
        let registry = PatternRegistry::sales_call();
        let price = registry.patterns_for(PRICE).next().unwrap();
        assert_eq!(price.min_len(), 2);
        assert_eq!(price.max_len(), 3);
    }
}
