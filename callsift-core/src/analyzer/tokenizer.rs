//! Word and punctuation tokenizer.
//!
//! The matcher never looks at raw text, only at a sequence of [`Token`]s.
//! Anything implementing [`TokenStream`] can feed it; [`Tokenizer`] is the
//! default implementation.
//!
//! ## Splitting rules
//!
//! Given `"Rs 5,00,000. The car's money-back, don't!"` the tokenizer emits:
//!
//! ```text
//! "Rs" "5,00,000" "." "The" "car" "'s" "money-back" "," "do" "n't" "!"
//! ```
//!
//! - Whitespace and control characters separate tokens and are never part
//!   of one
//! - A run of letters and digits is a word
//! - `-` and `_` between two word characters join the word
//! - An apostrophe between two word characters splits off a clitic:
//!   `car's` is `car` `'s`, and `don't` is `do` `n't`
//! - `.` and `,` between two digits join the number
//! - Every other character becomes a single-character punctuation token
//!
//! Tokens are slices of the input, so tokenizing does not copy the text
//! apart from lowercasing words that contain uppercase characters.

use callsift_types::{DocumentError, Token};

/// Default upper bound on document size (1 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: usize = 1024 * 1024;

/// Produces the token sequence the matcher runs over.
///
/// Implementations must lowercase and classify tokens the same way on
/// every call, and every token's `offset` must point at its `text` inside
/// the input string.
pub trait TokenStream: Send + Sync {
    /// Splits `text` into tokens ordered by position.
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Token<'a>>, DocumentError>;
}

#[inline(always)]
fn joins_word(c: char) -> bool {
    matches!(c, '-' | '_')
}

#[inline(always)]
fn is_apostrophe(c: char) -> bool {
    matches!(c, '\'' | '\u{2019}')
}

#[inline(always)]
fn is_separator(c: char) -> bool {
    c.is_whitespace() || c.is_control()
}

#[inline(always)]
fn joins_number(c: char) -> bool {
    matches!(c, '.' | ',')
}

/// Streaming word/punctuation tokenizer.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    max_document_bytes: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DOCUMENT_BYTES)
    }
}

impl Tokenizer {
    /// Creates a tokenizer that rejects documents above `max_document_bytes`.
    #[inline]
    pub const fn new(max_document_bytes: usize) -> Self {
        Self { max_document_bytes }
    }

    /// Maximum accepted document size in bytes.
    #[inline]
    pub const fn max_document_bytes(&self) -> usize {
        self.max_document_bytes
    }

    /// Scans `text` and emits `(slice, byte_offset)` for every token, left
    /// to right. Performs no validation.
    pub fn for_each_token<'a, F>(&self, text: &'a str, mut emit: F)
    where
        F: FnMut(&'a str, usize),
    {
        let mut chars = text.char_indices().peekable();
        let mut word_start: Option<usize> = None;
        let mut last: Option<(usize, char)> = None;

        while let Some((i, c)) = chars.next() {
            let next = chars.peek().map(|&(_, n)| n);
            let prev_index = last.map(|(p, _)| p);
            let prev = last.map(|(_, p)| p);

            if c.is_alphanumeric() {
                word_start.get_or_insert(i);
            } else if let (Some(start), Some(p), true) = (
                word_start,
                prev.filter(|p| p.is_alphanumeric()),
                is_apostrophe(c) && next.is_some_and(char::is_alphanumeric),
            ) {
                // clitic: "car's" -> "car" "'s", "don't" -> "do" "n't"
                let split = match prev_index {
                    Some(n)
                        if matches!(p, 'n' | 'N')
                            && next.is_some_and(|t| matches!(t, 't' | 'T'))
                            && n > start =>
                    {
                        n
                    }
                    _ => i,
                };
                emit(&text[start..split], start);
                word_start = Some(split);
            } else if word_start.is_some()
                && prev.is_some_and(char::is_alphanumeric)
                && next.is_some_and(char::is_alphanumeric)
                && (joins_word(c)
                    || (joins_number(c)
                        && prev.is_some_and(|p| p.is_ascii_digit())
                        && next.is_some_and(|n| n.is_ascii_digit())))
            {
                // infix joiner, the word continues
            } else {
                if let Some(start) = word_start.take() {
                    emit(&text[start..i], start);
                }
                if !is_separator(c) {
                    emit(&text[i..i + c.len_utf8()], i);
                }
            }

            last = Some((i, c));
        }

        if let Some(start) = word_start {
            emit(&text[start..], start);
        }
    }
}

impl TokenStream for Tokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<Token<'a>>, DocumentError> {
        if text.len() > self.max_document_bytes {
            return Err(DocumentError::TooLarge {
                size: text.len(),
                max_size: self.max_document_bytes,
            });
        }

        let mut tokens = Vec::with_capacity(text.len() / 5 + 1);
        let mut position = 0u32;
        self.for_each_token(text, |slice, offset| {
            tokens.push(Token::new(slice, offset, position));
            position = position.saturating_add(1);
        });

        Ok(tokens)
    }
}
