//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! configuration. Extra patterns are appended after the built-in ones:
//!
//! ```toml
//! resolution = "first-match-wins"
//!
//! [[patterns]]
//! category = "Make Year"
//! steps = [{ kind = "literal", value = "model" }, { kind = "digit" }]
//!
//! [[patterns]]
//! category = "Distance Travelled"
//! steps = [
//!     { kind = "digit" },
//!     { kind = "in", values = ["km", "kms", "kilometres"] },
//! ]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analyzer::DEFAULT_MAX_DOCUMENT_BYTES;
use crate::error::{ConfigError, PatternError};
use crate::extract::ResolutionPolicy;
use crate::pattern::builtin::register_sales_call;
use crate::pattern::{PatternRegistry, Predicate, Step};

/// One step of a configured pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// What the step tests.
    #[serde(flatten)]
    pub predicate: PredicateSpec,
    /// Whether the step may be skipped.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Serialized form of a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredicateSpec {
    /// Lowercased token is one of `values`.
    In {
        /// Accepted words.
        values: Vec<String>,
    },
    /// Lowercased token equals `value`.
    Literal {
        /// Accepted word.
        value: String,
    },
    /// Token is all digits.
    Digit,
    /// Token is all punctuation.
    Punct,
}

impl StepSpec {
    /// Builds the runtime step.
    pub fn to_step(&self) -> Step {
        let predicate = match &self.predicate {
            PredicateSpec::In { values } => Predicate::any_of(values),
            PredicateSpec::Literal { value } => Predicate::literal(value),
            PredicateSpec::Digit => Predicate::Digit,
            PredicateSpec::Punct => Predicate::Punct,
        };
        if self.optional {
            Step::optional(predicate)
        } else {
            Step::one(predicate)
        }
    }
}

/// A pattern defined in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSpec {
    /// Category matches are reported under.
    pub category: String,
    /// Steps in match order.
    pub steps: Vec<StepSpec>,
}

/// Configuration for the [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// How repeated matches for one category are resolved.
    pub resolution: ResolutionPolicy,

    /// Collapse whitespace before tokenizing.
    pub normalize_input: bool,

    /// Documents above this size are rejected by the tokenizer.
    pub max_document_bytes: usize,

    /// Register the built-in sales-call patterns before `patterns`.
    pub include_builtin_patterns: bool,

    /// Additional patterns, appended in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<PatternSpec>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolution: ResolutionPolicy::LastMatchWins,
            normalize_input: true,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
            include_builtin_patterns: true,
            patterns: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Strict preset: the earliest mention of a category wins.
    pub fn strict() -> Self {
        Self {
            resolution: ResolutionPolicy::FirstMatchWins,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_document_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_document_bytes must be greater than 0".to_string(),
            ));
        }
        if self.max_document_bytes > u32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "max_document_bytes cannot exceed {}",
                u32::MAX
            )));
        }
        if !self.include_builtin_patterns && self.patterns.is_empty() {
            return Err(ConfigError::Invalid(
                "no patterns: enable include_builtin_patterns or add [[patterns]]".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the pattern registry this configuration describes.
    pub fn build_registry(&self) -> Result<PatternRegistry, PatternError> {
        let mut b = PatternRegistry::builder();
        if self.include_builtin_patterns {
            register_sales_call(&mut b);
        }
        for p in &self.patterns {
            b.register(p.category.as_str(), p.steps.iter().map(StepSpec::to_step));
        }
        b.build()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }
}
