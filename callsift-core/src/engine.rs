//! Extraction entry point.
//!
//! ```text
//! text → normalize → tokenize → find_matches → 3 × resolve → Record
//! ```
//!
//! An [`Engine`] is built once and shared. It holds the pattern registry
//! behind an `Arc` and never mutates it, so `extract_information` takes
//! `&self` and can run from any number of threads at once.

use std::borrow::Cow;
use std::sync::Arc;

use callsift_types::{Match, Record, Section};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::analyzer::{TextNormalizer, TokenStream, Tokenizer};
use crate::config::EngineConfig;
use crate::error::{EngineError, ExtractError};
use crate::extract::{build_record, CategoryExtractor, ExtractorSpec, ResolutionPolicy};
use crate::matcher::find_matches;
use crate::pattern::PatternRegistry;

/// Below this many documents a batch runs on the calling thread.
const PARALLEL_THRESHOLD: usize = 4;

/// Rule-based transcript extractor.
#[derive(Debug)]
pub struct Engine<T: TokenStream = Tokenizer> {
    registry: Arc<PatternRegistry>,
    tokenizer: T,
    normalizer: Option<TextNormalizer>,
    extractors: [CategoryExtractor; 3],
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with the built-in patterns, extractor specs and defaults.
    pub fn new() -> Self {
        let [req, pol, obj] = ExtractorSpec::sales_call();
        let policy = ResolutionPolicy::default();
        let registry = Arc::new(PatternRegistry::sales_call());
        info!(patterns = registry.len(), "sales-call engine ready");
        Self {
            registry,
            tokenizer: Tokenizer::default(),
            normalizer: Some(TextNormalizer::default()),
            extractors: [
                CategoryExtractor::new(req, policy),
                CategoryExtractor::new(pol, policy),
                CategoryExtractor::new(obj, policy),
            ],
        }
    }

    /// Engine described by a configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or one of its patterns is
    /// malformed.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let registry = Arc::new(config.build_registry()?);
        let mut engine = Self::with_parts(
            registry,
            Tokenizer::new(config.max_document_bytes),
            ExtractorSpec::sales_call(),
            config.resolution,
        )?;
        if !config.normalize_input {
            engine.normalizer = None;
        }
        Ok(engine)
    }
}

impl<T: TokenStream> Engine<T> {
    /// Assembles an engine from explicit parts.
    ///
    /// Specs may be given in any order but must cover each section exactly
    /// once and must not share categories. Registered categories that no
    /// spec owns are allowed; their matches are never surfaced.
    ///
    /// # Errors
    ///
    /// [`EngineError::DuplicateSection`] or
    /// [`EngineError::OverlappingCategory`].
    pub fn with_parts(
        registry: Arc<PatternRegistry>,
        tokenizer: T,
        specs: [ExtractorSpec; 3],
        policy: ResolutionPolicy,
    ) -> Result<Self, EngineError> {
        for (i, a) in specs.iter().enumerate() {
            for b in &specs[i + 1..] {
                if a.section() == b.section() {
                    return Err(EngineError::DuplicateSection(a.section()));
                }
                if let Some(c) = a.categories().iter().find(|c| b.owns(c)) {
                    return Err(EngineError::OverlappingCategory {
                        category: c.clone(),
                        first: a.section(),
                        second: b.section(),
                    });
                }
            }
        }

        for category in registry.categories() {
            if !specs.iter().any(|s| s.owns(category)) {
                warn!(category, "registered category is not owned by any extractor");
            }
        }

        let mut specs = specs;
        specs.sort_by_key(|s| Section::ALL.iter().position(|x| *x == s.section()));
        let extractors = specs.map(|s| CategoryExtractor::new(s, policy));

        info!(
            patterns = registry.len(),
            categories = registry.categories().count(),
            ?policy,
            "engine ready"
        );

        Ok(Self {
            registry,
            tokenizer,
            normalizer: Some(TextNormalizer::default()),
            extractors,
        })
    }

    /// Disables or replaces the whitespace normalization step.
    pub fn with_normalizer(mut self, normalizer: Option<TextNormalizer>) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Shared handle to the pattern registry.
    pub fn registry(&self) -> &Arc<PatternRegistry> {
        &self.registry
    }

    /// Extractors in section order.
    pub fn extractors(&self) -> &[CategoryExtractor; 3] {
        &self.extractors
    }

    fn prepare<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match &self.normalizer {
            Some(n) => n.normalize(text),
            None => Cow::Borrowed(text),
        }
    }

    /// Every pattern match in `text`, in matcher order.
    ///
    /// Offsets refer to the normalized text when normalization is enabled.
    pub fn find_matches(&self, text: &str) -> Result<Vec<Match<'_>>, ExtractError> {
        let source = self.prepare(text);
        let tokens = self.tokenizer.tokenize(&source)?;
        Ok(find_matches(&source, &tokens, &self.registry))
    }

    /// Extracts the structured record for one transcript.
    ///
    /// Deterministic and side-effect free. Empty or unmatched input yields
    /// a record with every category absent.
    ///
    /// # Errors
    ///
    /// Only tokenizer failures, passed through unchanged.
    pub fn extract_information(&self, text: &str) -> Result<Record, ExtractError> {
        let source = self.prepare(text);
        let tokens = self.tokenizer.tokenize(&source)?;
        let matches = find_matches(&source, &tokens, &self.registry);

        debug!(
            bytes = source.len(),
            tokens = tokens.len(),
            matches = matches.len(),
            "transcript matched"
        );

        let [req, pol, obj] = &self.extractors;
        Ok(build_record(
            req.resolve(&matches),
            pol.resolve(&matches),
            obj.resolve(&matches),
        ))
    }

    /// Extracts many independent transcripts, returning results in input
    /// order. Large batches are spread over the rayon thread pool.
    pub fn extract_batch<S>(&self, texts: &[S]) -> Vec<Result<Record, ExtractError>>
    where
        S: AsRef<str> + Sync,
    {
        if texts.len() < PARALLEL_THRESHOLD {
            return texts
                .iter()
                .map(|t| self.extract_information(t.as_ref()))
                .collect();
        }

        debug!(documents = texts.len(), "extracting batch in parallel");
        texts
            .par_iter()
            .map(|t| self.extract_information(t.as_ref()))
            .collect()
    }
}
