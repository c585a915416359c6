//! Token-sequence matcher.
//!
//! Every pattern is tried at every token position. A required step consumes
//! exactly one token that satisfies its predicate; an optional step consumes
//! the token under the cursor when that still lets the rest of the pattern
//! match, and is skipped otherwise. Each `(pattern, start)` pair yields at
//! most one match, the longest alignment found.
//!
//! Overlaps are not resolved. The same tokens can be covered by several
//! patterns, and all of those matches are reported, ordered by start token
//! and then by pattern registration order.

use callsift_types::{Match, Token};
use tracing::trace;

use crate::pattern::{PatternRegistry, Step};

/// Aligns `steps` against `tokens` from `cursor`; returns the end cursor.
fn align(steps: &[Step], tokens: &[Token<'_>], cursor: usize) -> Option<usize> {
    let Some((step, rest)) = steps.split_first() else {
        return Some(cursor);
    };

    let hit = tokens
        .get(cursor)
        .is_some_and(|t| step.predicate.matches(t));

    if hit {
        if let Some(end) = align(rest, tokens, cursor + 1) {
            return Some(end);
        }
    }

    if step.is_optional() {
        align(rest, tokens, cursor)
    } else {
        None
    }
}

/// Source text covered by a non-empty token range.
///
/// Slices the source so inner spacing and case survive. Falls back to
/// joining the token texts if the offsets do not describe `source`.
fn span_text(source: &str, span: &[Token<'_>]) -> String {
    let (Some(first), Some(last)) = (span.first(), span.last()) else {
        return String::new();
    };

    match source.get(first.offset..last.end()) {
        Some(text) => text.to_owned(),
        None => span
            .iter()
            .map(|t| t.text)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Finds every match of every registered pattern in a token sequence.
///
/// `source` is the string the tokens were cut from; match text is taken
/// from it. Returns matches ordered by start token, ties broken by pattern
/// registration order. An empty token sequence yields no matches.
pub fn find_matches<'r>(
    source: &str,
    tokens: &[Token<'_>],
    registry: &'r PatternRegistry,
) -> Vec<Match<'r>> {
    let mut matches = Vec::new();

    for start in 0..tokens.len() {
        for pattern in registry.all_patterns() {
            let Some(end) = align(pattern.steps(), tokens, start) else {
                continue;
            };
            debug_assert!(end > start, "registry admitted a zero-width pattern");
            if end <= start {
                continue;
            }

            let text = span_text(source, &tokens[start..end]);
            trace!(
                category = pattern.category(),
                start,
                end,
                text = %text,
                "pattern matched"
            );

            matches.push(Match {
                category: pattern.category(),
                pattern: pattern.id(),
                start,
                end,
                text,
            });
        }
    }

    matches
}
