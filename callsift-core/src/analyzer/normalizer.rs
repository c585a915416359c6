//! Whitespace normalization for raw transcripts.
//!
//! Transcripts arrive from file uploads and PDF text dumps with hard line
//! breaks, tabs and runs of spaces. The normalizer collapses every run of
//! whitespace (newlines included) into a single ASCII space and trims both
//! ends. Case and punctuation are left alone: matched spans are reported in
//! their original case.
//!
//! ```
//! use callsift_core::analyzer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::default();
//! assert_eq!(normalizer.normalize("  White\n\n  SEDAN \t"), "White SEDAN");
//! ```

use std::borrow::Cow;

use memchr::{memchr3, memmem};

/// Configuration options for text normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Treat every Unicode whitespace character as a separator, not only
    /// ASCII space, tab, CR and LF.
    pub unicode_whitespace: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            unicode_whitespace: true,
        }
    }
}

/// Collapses whitespace runs and trims the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    #[inline(always)]
    fn is_ws(&self, c: char) -> bool {
        if self.config.unicode_whitespace {
            c.is_whitespace()
        } else {
            matches!(c, ' ' | '\n' | '\t' | '\r')
        }
    }

    /// Returns `true` if `input` would come out of [`normalize`](Self::normalize)
    /// unchanged.
    pub fn is_normalized(&self, input: &str) -> bool {
        let bytes = input.as_bytes();
        if bytes.first() == Some(&b' ') || bytes.last() == Some(&b' ') {
            return false;
        }
        if memchr3(b'\n', b'\t', b'\r', bytes).is_some() {
            return false;
        }
        if memmem::find(bytes, b"  ").is_some() {
            return false;
        }
        // Only non-ASCII whitespace (NBSP, ideographic space, ...) is left to check.
        !(self.config.unicode_whitespace
            && !input.is_ascii()
            && input.chars().any(|c| c != ' ' && c.is_whitespace()))
    }

    /// Normalizes text into an existing buffer, clearing it first.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let mut pending_space = false;
        for c in input.chars() {
            if self.is_ws(c) {
                pending_space = !out.is_empty();
                continue;
            }
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    /// Normalizes text, borrowing the input when it is already normalized.
    pub fn normalize<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if self.is_normalized(input) {
            return Cow::Borrowed(input);
        }
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        Cow::Owned(out)
    }
}
