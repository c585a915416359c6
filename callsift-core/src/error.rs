//! Error types for the engine

use std::path::PathBuf;

use callsift_types::{DocumentError, Section};
use thiserror::Error;

/// A pattern definition that cannot be registered.
///
/// Raised while the registry is built; a registry with a malformed pattern
/// is never constructed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Category name is empty or blank
    #[error("pattern #{index} has an empty category name")]
    EmptyCategory {
        /// Registration index of the pattern
        index: usize,
    },

    /// Pattern has no steps
    #[error("pattern for '{category}' has no steps")]
    EmptyPattern {
        /// Category of the pattern
        category: String,
    },

    /// Every step is optional, so the pattern could match zero tokens
    #[error("pattern for '{category}' has only optional steps")]
    AllOptional {
        /// Category of the pattern
        category: String,
    },

    /// More patterns than a pattern id can number
    #[error("registry holds more than {max} patterns")]
    TooManyPatterns {
        /// Largest representable pattern id
        max: usize,
    },

    /// Set-membership step with no values
    #[error("step {step} of pattern for '{category}' has an empty value set")]
    EmptySet {
        /// Category of the pattern
        category: String,
        /// Index of the offending step
        step: usize,
    },

    /// Literal step with an empty value
    #[error("step {step} of pattern for '{category}' has an empty literal")]
    EmptyLiteral {
        /// Category of the pattern
        category: String,
        /// Index of the offending step
        step: usize,
    },
}

/// Errors raised while assembling an [`Engine`](crate::Engine).
#[derive(Error, Debug)]
pub enum EngineError {
    /// Pattern registry could not be built
    #[error("invalid pattern: {0}")]
    Pattern(#[from] PatternError),

    /// Two extractors claim the same category
    #[error("category '{category}' is owned by both {first} and {second}")]
    OverlappingCategory {
        /// The contested category
        category: String,
        /// First section claiming it
        first: Section,
        /// Second section claiming it
        second: Section,
    },

    /// Two extractor specs target the same section
    #[error("section {0} has more than one extractor")]
    DuplicateSection(Section),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while extracting a single document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The tokenizer refused the document
    #[error("tokenizer error: {0}")]
    Tokenize(#[from] DocumentError),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the configuration file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML could not be parsed
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML could not be produced
    #[error("failed to serialize to TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Values are out of range or inconsistent
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while exporting records.
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
