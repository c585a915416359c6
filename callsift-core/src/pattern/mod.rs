//! Lexical patterns.
//!
//! A pattern is a category name plus an ordered list of [`Step`]s, each
//! testing one token. The registry keeps patterns in registration order and
//! is frozen once built.

pub mod builtin;
mod predicate;
mod registry;

pub use builtin::category;
pub use predicate::{Predicate, Quantifier, Step};
pub use registry::{Pattern, PatternRegistry, PatternRegistryBuilder};
