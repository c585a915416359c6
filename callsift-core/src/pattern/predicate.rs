//! Token predicates and pattern steps.

use callsift_types::Token;
use rustc_hash::FxHashSet;

/// A test on the attributes of a single token.
///
/// Membership and literal predicates compare against the token's lowercased
/// form; their values are lowercased when the predicate is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Lowercased form is one of the values.
    In(FxHashSet<Box<str>>),
    /// Lowercased form equals the value.
    Literal(Box<str>),
    /// Token consists of digits only.
    Digit,
    /// Token consists of punctuation only.
    Punct,
}

impl Predicate {
    /// Membership predicate over a set of words.
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Predicate::In(
            values
                .into_iter()
                .map(|v| v.as_ref().to_lowercase().into_boxed_str())
                .collect(),
        )
    }

    /// Literal predicate on one word.
    pub fn literal(value: impl AsRef<str>) -> Self {
        Predicate::Literal(value.as_ref().to_lowercase().into_boxed_str())
    }

    /// Evaluates the predicate against a token.
    #[inline]
    pub fn matches(&self, token: &Token<'_>) -> bool {
        match self {
            Predicate::In(values) => values.contains(token.lower.as_ref()),
            Predicate::Literal(value) => **value == *token.lower,
            Predicate::Digit => token.is_digit,
            Predicate::Punct => token.is_punct,
        }
    }
}

/// How many tokens a step may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantifier {
    /// Exactly one token.
    #[default]
    One,
    /// Zero or one token.
    Optional,
}

/// One element of a pattern: a predicate plus its quantifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Test applied to the token under the cursor.
    pub predicate: Predicate,
    /// Whether the step may be skipped.
    pub quantifier: Quantifier,
}

impl Step {
    /// A step that must consume exactly one token.
    pub const fn one(predicate: Predicate) -> Self {
        Self {
            predicate,
            quantifier: Quantifier::One,
        }
    }

    /// A step that consumes one token if it matches and is skipped otherwise.
    pub const fn optional(predicate: Predicate) -> Self {
        Self {
            predicate,
            quantifier: Quantifier::Optional,
        }
    }

    /// Returns `true` if the step may be skipped.
    #[inline(always)]
    pub fn is_optional(&self) -> bool {
        self.quantifier == Quantifier::Optional
    }
}

impl From<Predicate> for Step {
    fn from(predicate: Predicate) -> Self {
        Step::one(predicate)
    }
}
