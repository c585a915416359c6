//! End-to-end extraction through the public API.

use std::sync::Arc;

use callsift_core::analyzer::Tokenizer;
use callsift_core::pattern::category::*;
use callsift_core::{
    Engine, EngineConfig, ExtractorSpec, PatternRegistry, Predicate, Record, ResolutionPolicy,
    Section, Step,
};

const CALL: &str = "The customer wants a white sedan with manual transmission and diesel fuel. \
    They mentioned a money-back guarantee and asked about rc transfer. \
    However there were price issues.";

fn req(record: &Record, category: &str) -> Option<String> {
    record
        .get(Section::CustomerRequirements, category)
        .map(str::to_owned)
}

fn pol(record: &Record, category: &str) -> Option<String> {
    record
        .get(Section::CompanyPolicies, category)
        .map(str::to_owned)
}

fn obj(record: &Record, category: &str) -> Option<String> {
    record
        .get(Section::CustomerObjections, category)
        .map(str::to_owned)
}

#[test]
fn sales_call_last_match() {
    let record = Engine::new().extract_information(CALL).unwrap();

    assert_eq!(req(&record, CAR_TYPE).as_deref(), Some("sedan"));
    assert_eq!(req(&record, FUEL_TYPE).as_deref(), Some("diesel"));
    assert_eq!(req(&record, COLOR).as_deref(), Some("white"));
    assert_eq!(req(&record, TRANSMISSION_TYPE).as_deref(), Some("manual"));
    assert_eq!(req(&record, DISTANCE_TRAVELLED), None);
    assert_eq!(req(&record, MAKE_YEAR), None);

    assert_eq!(pol(&record, RETURN_POLICY), None);
    assert_eq!(pol(&record, MONEY_BACK_GUARANTEE).as_deref(), Some("guarantee"));
    assert_eq!(pol(&record, FREE_RC_TRANSFER).as_deref(), Some("transfer"));
    assert_eq!(pol(&record, FREE_RSA), None);

    assert_eq!(obj(&record, REFURBISHMENT_QUALITY), None);
    assert_eq!(obj(&record, CAR_ISSUES).as_deref(), Some("issues"));
    assert_eq!(obj(&record, PRICE_ISSUES).as_deref(), Some("issues"));
    assert_eq!(
        obj(&record, CUSTOMER_EXPERIENCE_ISSUES).as_deref(),
        Some("customer")
    );
}

#[test]
fn sales_call_first_match() {
    let engine = Engine::from_config(&EngineConfig::strict()).unwrap();
    let record = engine.extract_information(CALL).unwrap();

    assert_eq!(req(&record, CAR_TYPE).as_deref(), Some("sedan"));
    assert_eq!(pol(&record, MONEY_BACK_GUARANTEE).as_deref(), Some("money-back"));
    assert_eq!(pol(&record, FREE_RC_TRANSFER).as_deref(), Some("rc"));
    assert_eq!(obj(&record, PRICE_ISSUES).as_deref(), Some("price"));
    assert_eq!(obj(&record, CAR_ISSUES).as_deref(), Some("issues"));
}

#[test]
fn repeated_runs_are_identical() {
    let engine = Engine::new();
    let a = engine.extract_information(CALL).unwrap();
    let b = engine.extract_information(CALL).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, Engine::new().extract_information(CALL).unwrap());
}

#[test]
fn record_shape_is_fixed() {
    for text in ["", "   ", "nothing relevant here", CALL] {
        let record = Engine::new().extract_information(text).unwrap();
        let keys: Vec<_> = record.customer_requirements.keys().collect();
        assert_eq!(
            keys,
            [CAR_TYPE, FUEL_TYPE, COLOR, DISTANCE_TRAVELLED, MAKE_YEAR, TRANSMISSION_TYPE]
        );
        let keys: Vec<_> = record.company_policies.keys().collect();
        assert_eq!(
            keys,
            [RETURN_POLICY, MONEY_BACK_GUARANTEE, FREE_RC_TRANSFER, FREE_RSA]
        );
        let keys: Vec<_> = record.customer_objections.keys().collect();
        assert_eq!(
            keys,
            [REFURBISHMENT_QUALITY, CAR_ISSUES, PRICE_ISSUES, CUSTOMER_EXPERIENCE_ISSUES]
        );
    }
}

#[test]
fn unmatched_text_is_blank() {
    let record = Engine::new()
        .extract_information("Hello, thanks for calling. Goodbye!")
        .unwrap();
    assert!(record.is_blank());
}

#[test]
fn later_mention_overrides() {
    let record = Engine::new()
        .extract_information("I thought about a sedan but now I want a hatchback.")
        .unwrap();
    assert_eq!(req(&record, CAR_TYPE).as_deref(), Some("hatchback"));
}

#[test]
fn value_keeps_source_case() {
    let record = Engine::new()
        .extract_information("Is RSA included? And the RC?")
        .unwrap();
    assert_eq!(pol(&record, FREE_RSA).as_deref(), Some("RSA"));
    assert_eq!(pol(&record, FREE_RC_TRANSFER).as_deref(), Some("RC"));
}

#[test]
fn possessives_still_match() {
    let record = Engine::new()
        .extract_information("The car's condition worried the customer's wife")
        .unwrap();
    assert_eq!(obj(&record, CAR_ISSUES).as_deref(), Some("car"));
    assert_eq!(
        obj(&record, CUSTOMER_EXPERIENCE_ISSUES).as_deref(),
        Some("customer")
    );
    assert_eq!(obj(&record, REFURBISHMENT_QUALITY).as_deref(), Some("condition"));
}

#[test]
fn control_characters_do_not_fail_extraction() {
    let raw = Engine::new().with_normalizer(None);
    let record = raw
        .extract_information("white\u{0C}sedan\u{1b} diesel\0manual\u{7f}")
        .unwrap();
    assert_eq!(req(&record, COLOR).as_deref(), Some("white"));
    assert_eq!(req(&record, CAR_TYPE).as_deref(), Some("sedan"));
    assert_eq!(req(&record, FUEL_TYPE).as_deref(), Some("diesel"));
    assert_eq!(req(&record, TRANSMISSION_TYPE).as_deref(), Some("manual"));

    let record = Engine::new()
        .extract_information("white sedan\u{1b} diesel")
        .unwrap();
    assert_eq!(req(&record, FUEL_TYPE).as_deref(), Some("diesel"));
    assert!(Engine::new().extract_information("white sedan\0").is_ok());
}

#[test]
fn match_text_is_source_slice() {
    let engine = Engine::new();
    let text = "quoted Rs 4500 . final";
    let matches = engine.find_matches(text).unwrap();
    let price: Vec<_> = matches.iter().filter(|m| m.category == PRICE).collect();
    assert_eq!(price.len(), 1);
    assert_eq!(price[0].text, "Rs 4500 .");
    assert_eq!(price[0].len(), 3);
    assert!(text.contains(&price[0].text));
}

#[test]
fn unowned_category_never_surfaces() {
    let record = Engine::new().extract_information("Rs 500 only").unwrap();
    assert!(record.is_blank());
    for (_, category, _) in record.rows() {
        assert_ne!(category, PRICE);
    }
}

#[test]
fn sections_are_disjoint() {
    let record = Engine::new().extract_information(CALL).unwrap();
    for (section, category, _) in record.rows() {
        let owners = Section::ALL
            .iter()
            .filter(|s| record.section(**s).contains(category))
            .count();
        assert_eq!(owners, 1, "{category} appears outside {section}");
    }
}

fn color_fuel_engine(color_first: bool) -> Engine {
    let color = [Step::one(Predicate::any_of(&["red", "blue"]))];
    let fuel = [Step::one(Predicate::any_of(&["petrol", "diesel"]))];
    let mut b = PatternRegistry::builder();
    if color_first {
        b.register(COLOR, color).register(FUEL_TYPE, fuel);
    } else {
        b.register(FUEL_TYPE, fuel).register(COLOR, color);
    }
    Engine::with_parts(
        Arc::new(b.build().unwrap()),
        Tokenizer::default(),
        ExtractorSpec::sales_call(),
        ResolutionPolicy::default(),
    )
    .unwrap()
}

#[test]
fn category_registration_order_is_irrelevant() {
    let text = "a red car on diesel, or maybe blue on petrol";
    let a = color_fuel_engine(true).extract_information(text).unwrap();
    let b = color_fuel_engine(false).extract_information(text).unwrap();
    assert_eq!(a, b);
    assert_eq!(req(&a, COLOR).as_deref(), Some("blue"));
    assert_eq!(req(&a, FUEL_TYPE).as_deref(), Some("petrol"));
}

#[test]
fn configured_pattern_fills_make_year() {
    let config = EngineConfig::from_toml(
        r#"
[[patterns]]
category = "Make Year"
steps = [{ kind = "literal", value = "model" }, { kind = "digit" }]
"#,
    )
    .unwrap();
    let engine = Engine::from_config(&config).unwrap();
    let record = engine
        .extract_information("it's a Model 2018 hatch in grey")
        .unwrap();
    assert_eq!(req(&record, MAKE_YEAR).as_deref(), Some("Model 2018"));
    assert_eq!(req(&record, CAR_TYPE).as_deref(), Some("hatch"));
    assert_eq!(req(&record, COLOR).as_deref(), Some("grey"));
}

#[test]
fn batch_matches_single_extraction() {
    let engine = Engine::new();
    let texts = [CALL, "", "a grey suv", "refund please", "car has faults"];
    let batch = engine.extract_batch(&texts);
    for (text, result) in texts.iter().zip(batch) {
        assert_eq!(result.unwrap(), engine.extract_information(text).unwrap());
    }
}
