//! Pattern registry.
//!
//! Patterns are appended to a [`PatternRegistryBuilder`] and frozen into a
//! [`PatternRegistry`]. Nothing can be removed or edited afterwards, so a
//! registry is safe to share between worker threads behind an `Arc`.
//!
//! Several patterns may share a category; they are alternative phrasings
//! of the same concept. Registration order is kept and matters: the
//! matcher uses it to order matches that start on the same token.

use callsift_types::PatternId;
use smallvec::SmallVec;
use tracing::debug;

use super::predicate::{Predicate, Step};
use crate::error::PatternError;

/// A named sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    id: PatternId,
    category: Box<str>,
    steps: SmallVec<[Step; 3]>,
}

impl Pattern {
    /// Registration index.
    #[inline(always)]
    pub fn id(&self) -> PatternId {
        self.id
    }

    /// Category this pattern reports matches under.
    #[inline(always)]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Steps in match order.
    #[inline(always)]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Fewest tokens a match of this pattern can span.
    pub fn min_len(&self) -> usize {
        self.steps.iter().filter(|s| !s.is_optional()).count()
    }

    /// Most tokens a match of this pattern can span.
    pub fn max_len(&self) -> usize {
        self.steps.len()
    }

    fn validate(&self, index: usize) -> Result<(), PatternError> {
        if self.category.trim().is_empty() {
            return Err(PatternError::EmptyCategory { index });
        }
        if self.steps.is_empty() {
            return Err(PatternError::EmptyPattern {
                category: self.category.to_string(),
            });
        }
        if self.steps.iter().all(Step::is_optional) {
            return Err(PatternError::AllOptional {
                category: self.category.to_string(),
            });
        }
        for (step, s) in self.steps.iter().enumerate() {
            match &s.predicate {
                Predicate::In(values) if values.is_empty() => {
                    return Err(PatternError::EmptySet {
                        category: self.category.to_string(),
                        step,
                    });
                }
                Predicate::Literal(value) if value.is_empty() => {
                    return Err(PatternError::EmptyLiteral {
                        category: self.category.to_string(),
                        step,
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn pattern_id(index: usize) -> Result<PatternId, PatternError> {
    PatternId::try_from(index).map_err(|_| PatternError::TooManyPatterns {
        max: PatternId::MAX as usize,
    })
}

/// Collects patterns before they are frozen.
#[derive(Debug, Default)]
pub struct PatternRegistryBuilder {
    patterns: Vec<Pattern>,
}

impl PatternRegistryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one pattern. Validation happens in [`build`](Self::build).
    pub fn register<I>(&mut self, category: impl Into<String>, steps: I) -> &mut Self
    where
        I: IntoIterator<Item = Step>,
    {
        self.patterns.push(Pattern {
            // assigned in `build`
            id: 0,
            category: category.into().into_boxed_str(),
            steps: steps.into_iter().collect(),
        });
        self
    }

    /// Appends every pattern of an existing registry, in its order.
    pub fn extend_from(&mut self, registry: &PatternRegistry) -> &mut Self {
        for pattern in registry.all_patterns() {
            self.register(pattern.category(), pattern.steps().iter().cloned());
        }
        self
    }

    /// Number of patterns registered so far.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Validates every pattern and freezes the registry.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] in registration order.
    pub fn build(mut self) -> Result<PatternRegistry, PatternError> {
        for (index, pattern) in self.patterns.iter_mut().enumerate() {
            pattern.validate(index)?;
            pattern.id = pattern_id(index)?;
        }

        let mut categories: Vec<Box<str>> = Vec::new();
        for pattern in &self.patterns {
            if !categories.iter().any(|c| **c == *pattern.category) {
                categories.push(pattern.category.clone());
            }
        }

        debug!(
            patterns = self.patterns.len(),
            categories = categories.len(),
            "pattern registry built"
        );

        Ok(PatternRegistry {
            patterns: self.patterns,
            categories,
        })
    }
}

/// Immutable, ordered collection of patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRegistry {
    patterns: Vec<Pattern>,
    categories: Vec<Box<str>>,
}

impl PatternRegistry {
    /// Starts a new registry.
    pub fn builder() -> PatternRegistryBuilder {
        PatternRegistryBuilder::new()
    }

    /// All patterns in registration order.
    #[inline(always)]
    pub fn all_patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Looks up a pattern by its registration index.
    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        self.patterns.get(id as usize)
    }

    /// Distinct categories, in order of first registration.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| &**c)
    }

    /// Returns `true` if at least one pattern reports under `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| **c == *category)
    }

    /// Alternatives registered for one category, in registration order.
    pub fn patterns_for<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Pattern> + 'a {
        self.patterns
            .iter()
            .filter(move |p| p.category() == category)
    }

    /// Longest pattern, in steps.
    pub fn max_pattern_len(&self) -> usize {
        self.patterns.iter().map(Pattern::max_len).max().unwrap_or(0)
    }

    /// Number of patterns.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the registry holds no patterns.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
