//! Text analysis pipeline.
//!
//! This module provides the stages that run before matching:
//! - **Normalizer**: Collapses whitespace in raw transcripts
//! - **Tokenizer**: Splits text into word and punctuation tokens

pub mod normalizer;
pub mod tokenizer;

pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use tokenizer::{TokenStream, Tokenizer, DEFAULT_MAX_DOCUMENT_BYTES};
