//! Core types shared by the callsift extraction engine.
//!
//! This crate holds the values that cross the boundaries between the
//! tokenizer, the matcher, the category extractors and whoever consumes the
//! final record. Keeping them separate means:
//!
//! - **Stable contracts**: a third-party tokenizer only needs [`Token`]
//! - **Serializable output**: [`Record`] maps directly onto the JSON export
//! - **Clean boundaries**: no dependency on the engine internals

#![warn(missing_docs)]

use core::fmt;
use std::borrow::Cow;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Index of a pattern inside its registry, in registration order.
pub type PatternId = u32;

/// A single lexical unit of a document.
///
/// Tokens borrow their surface text from the source string, so a token
/// sequence is only valid while the document it was cut from is alive.
/// The lowercased form is borrowed as well whenever the surface text is
/// already lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Original surface form, exactly as it appears in the source.
    pub text: &'a str,
    /// Lowercased surface form used by predicates.
    pub lower: Cow<'a, str>,
    /// Byte offset of `text` in the source string.
    pub offset: usize,
    /// Zero-based token index in the document.
    pub position: u32,
    /// Every character is an ASCII digit.
    pub is_digit: bool,
    /// Every character is punctuation or a symbol.
    pub is_punct: bool,
}

impl<'a> Token<'a> {
    /// Builds a token and derives its attributes from the surface text.
    pub fn new(text: &'a str, offset: usize, position: u32) -> Self {
        let lower = if text.chars().any(char::is_uppercase) {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let is_digit = !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit());
        let is_punct = !text.is_empty()
            && text
                .chars()
                .all(|c| !c.is_alphanumeric() && !c.is_whitespace());

        Self {
            text,
            lower,
            offset,
            position,
            is_digit,
            is_punct,
        }
    }

    /// Byte offset one past the end of the token in the source string.
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }
}

/// One occurrence of a pattern in a document.
///
/// `start..end` is a half-open token range. `text` is the source substring
/// covered by that range, original case and inner spacing preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match<'r> {
    /// Category of the pattern that produced this match.
    pub category: &'r str,
    /// Registration index of the pattern that produced this match.
    pub pattern: PatternId,
    /// First token index covered by the match.
    pub start: usize,
    /// One past the last token index covered by the match.
    pub end: usize,
    /// Matched source text.
    pub text: String,
}

impl Match<'_> {
    /// Number of tokens covered by the match.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the match covers no tokens.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Errors a tokenizer can report for a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentError {
    /// Document exceeds the configured maximum size.
    TooLarge {
        /// The actual size of the document in bytes.
        size: usize,
        /// The maximum allowed size in bytes.
        max_size: usize,
    },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::TooLarge { size, max_size } => {
                write!(
                    f,
                    "document too large: {} bytes (max: {} bytes)",
                    size, max_size
                )
            }
        }
    }
}

impl core::error::Error for DocumentError {}

/// Top-level section of a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// Vehicle attributes the customer asked for.
    #[serde(rename = "Customer Requirements")]
    CustomerRequirements,
    /// Company policies brought up in the conversation.
    #[serde(rename = "Company Policies")]
    CompanyPolicies,
    /// Objections raised by the customer.
    #[serde(rename = "Customer Objections")]
    CustomerObjections,
}

impl Section {
    /// All sections, in record order.
    pub const ALL: [Section; 3] = [
        Section::CustomerRequirements,
        Section::CompanyPolicies,
        Section::CustomerObjections,
    ];

    /// Human-readable section name, also used as the serialized key.
    pub const fn title(self) -> &'static str {
        match self {
            Section::CustomerRequirements => "Customer Requirements",
            Section::CompanyPolicies => "Company Policies",
            Section::CustomerObjections => "Customer Objections",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Ordered mapping from category name to resolved text.
///
/// Keys keep their insertion order, which is the order the owning extractor
/// declares them in. `None` marks a category with no match and serializes
/// as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMap {
    entries: Vec<(String, Option<String>)>,
}

impl CategoryMap {
    /// Creates a map with every category present and absent.
    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: categories.into_iter().map(|c| (c.into(), None)).collect(),
        }
    }

    /// Returns `true` if the category is one of the keys.
    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == category)
    }

    /// Returns the resolved text for a category, or `None` when the category
    /// is absent or unknown.
    pub fn get(&self, category: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == category)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Returns `true` if the category has a resolved value.
    pub fn is_set(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Overwrites the value of an existing key.
    ///
    /// Returns `false` and leaves the map untouched when the key is unknown;
    /// keys are fixed at construction.
    pub fn set(&mut self, category: &str, text: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k == category) {
            Some((_, slot)) => {
                *slot = Some(text.into());
                true
            }
            None => false,
        }
    }

    /// Iterates over `(category, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Iterates over category names in key order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no categories at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of categories with a resolved value.
    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|(_, v)| v.is_some()).count()
    }
}

impl Serialize for CategoryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoryMapVisitor;

        impl<'de> Visitor<'de> for CategoryMapVisitor {
            type Value = CategoryMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category names to strings or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((k, v)) = access.next_entry::<String, Option<String>>()? {
                    entries.push((k, v));
                }
                Ok(CategoryMap { entries })
            }
        }

        deserializer.deserialize_map(CategoryMapVisitor)
    }
}

/// Structured result of extracting one transcript.
///
/// Always carries every category of every section; categories with no match
/// are present with an absent value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Vehicle attributes.
    #[serde(rename = "Customer Requirements")]
    pub customer_requirements: CategoryMap,
    /// Company policies.
    #[serde(rename = "Company Policies")]
    pub company_policies: CategoryMap,
    /// Customer objections.
    #[serde(rename = "Customer Objections")]
    pub customer_objections: CategoryMap,
}

impl Record {
    /// Composes a record from the three section maps.
    pub fn new(
        customer_requirements: CategoryMap,
        company_policies: CategoryMap,
        customer_objections: CategoryMap,
    ) -> Self {
        Self {
            customer_requirements,
            company_policies,
            customer_objections,
        }
    }

    /// Returns the map for a section.
    pub fn section(&self, section: Section) -> &CategoryMap {
        match section {
            Section::CustomerRequirements => &self.customer_requirements,
            Section::CompanyPolicies => &self.company_policies,
            Section::CustomerObjections => &self.customer_objections,
        }
    }

    /// Resolved text for a category in a section.
    pub fn get(&self, section: Section, category: &str) -> Option<&str> {
        self.section(section).get(category)
    }

    /// Flattens the record into `(section, category, value)` rows, in
    /// section order and then key order.
    pub fn rows(&self) -> impl Iterator<Item = (Section, &str, Option<&str>)> {
        Section::ALL.into_iter().flat_map(move |section| {
            self.section(section)
                .iter()
                .map(move |(category, value)| (section, category, value))
        })
    }

    /// Returns `true` if no category in any section has a value.
    pub fn is_blank(&self) -> bool {
        Section::ALL
            .iter()
            .all(|s| self.section(*s).resolved_count() == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Record {
        let mut requirements = CategoryMap::with_categories(["Car Type", "Fuel Type"]);
        requirements.set("Fuel Type", "diesel");
        Record::new(
            requirements,
            CategoryMap::with_categories(["Free RSA"]),
            CategoryMap::with_categories(["Price Issues"]),
        )
    }

    #[test]
    fn token_attributes() {
        let t = Token::new("Sedan", 4, 1);
        assert_eq!(t.lower, "sedan");
        assert!(matches!(t.lower, Cow::Owned(_)));
        assert!(!t.is_digit);
        assert!(!t.is_punct);
        assert_eq!(t.end(), 9);

        let d = Token::new("2019", 0, 0);
        assert!(d.is_digit);
        assert!(matches!(d.lower, Cow::Borrowed(_)));

        let p = Token::new(",", 0, 0);
        assert!(p.is_punct);
        assert!(!p.is_digit);
    }

    #[test]
    fn hyphenated_word_is_not_punct() {
        let t = Token::new("money-back", 0, 0);
        assert!(!t.is_punct);
        assert!(!t.is_digit);
    }

    #[test]
    fn category_map_keeps_key_order() {
        let map = CategoryMap::with_categories(["b", "a", "c"]);
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, ["b", "a", "c"]);
        assert_eq!(map.resolved_count(), 0);
    }

    #[test]
    fn set_only_updates_known_keys() {
        let mut map = CategoryMap::with_categories(["Color"]);
        assert!(map.set("Color", "red"));
        assert!(map.set("Color", "blue"));
        assert!(!map.set("Fuel Type", "diesel"));
        assert_eq!(map.get("Color"), Some("blue"));
        assert!(!map.contains("Fuel Type"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn record_serializes_absent_as_null() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["Customer Requirements"]["Fuel Type"], "diesel");
        assert!(json["Customer Requirements"]["Car Type"].is_null());
        assert!(json["Company Policies"]["Free RSA"].is_null());
    }

    #[test]
    fn record_json_preserves_key_order() {
        let text = serde_json::to_string(&sample()).unwrap();
        let car = text.find("Car Type").unwrap();
        let fuel = text.find("Fuel Type").unwrap();
        let policies = text.find("Company Policies").unwrap();
        assert!(car < fuel);
        assert!(fuel < policies);
    }

    #[test]
    fn record_deserializes_from_export() {
        let record = sample();
        let text = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn rows_cover_every_category() {
        let table = sample();
        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0], (Section::CustomerRequirements, "Car Type", None));
        assert_eq!(
            rows[1],
            (Section::CustomerRequirements, "Fuel Type", Some("diesel"))
        );
        assert_eq!(rows[3].0, Section::CustomerObjections);
    }

    #[test]
    fn blank_record() {
        assert!(!sample().is_blank());
        assert!(Record::default().is_blank());
    }

    #[test]
    fn document_error_display() {
        let e = DocumentError::TooLarge {
            size: 10,
            max_size: 5,
        };
        assert_eq!(e.to_string(), "document too large: 10 bytes (max: 5 bytes)");
    }

    #[test]
    fn section_titles() {
        assert_eq!(Section::CompanyPolicies.to_string(), "Company Policies");
        assert_eq!(Section::ALL.len(), 3);
    }
}
