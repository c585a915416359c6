//! Rule-based extraction of sales-call transcripts.
//!
//! A transcript is tokenized, scanned for lexical patterns, and the matches
//! are resolved into a [`Record`] with three sections: customer
//! requirements, company policies and customer objections.
//!
//! ```
//! use callsift_core::Engine;
//! use callsift_types::Section;
//!
//! let engine = Engine::new();
//! let record = engine
//!     .extract_information("Looking for a white diesel sedan with manual gears.")
//!     .unwrap();
//!
//! assert_eq!(record.get(Section::CustomerRequirements, "Color"), Some("white"));
//! assert_eq!(record.get(Section::CustomerRequirements, "Make Year"), None);
//! ```
//!
//! Modules, leaf first:
//! - [`analyzer`]: whitespace normalizer and tokenizer
//! - [`pattern`]: predicates, pattern registry, built-in patterns
//! - [`matcher`]: finds every pattern occurrence in a token sequence
//! - [`extract`]: per-section category resolution and record assembly
//! - [`engine`]: the end-to-end entry point

pub mod analyzer;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod extract;
pub mod matcher;
pub mod pattern;

pub use callsift_types::{CategoryMap, DocumentError, Match, Record, Section, Token};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{ConfigError, EngineError, ExportError, ExtractError, PatternError};
pub use extract::{build_record, CategoryExtractor, ExtractorSpec, ResolutionPolicy};
pub use matcher::find_matches;
pub use pattern::{PatternRegistry, PatternRegistryBuilder, Predicate, Step};
