//! Approximate-string spelling correction over a frequency-weighted
//! vocabulary.
//!
//! Dictionary terms are indexed by their deletion variants (a symmetric-delete
//! index): at build time every string reachable by deleting up to a fixed
//! number of characters from a term's prefix points back at the term, and at
//! query time the same variants of the input select a small candidate set
//! that a bounded Damerau-Levenshtein verifier confirms.
//!
//! ```
//! use spellmend::{SpellCorrector, Verbosity};
//!
//! let mut corrector = SpellCorrector::new();
//! corrector.create_dictionary_entry("hello", 100);
//! corrector.create_dictionary_entry("world", 80);
//!
//! let found = corrector.lookup("helo", Verbosity::Top, 2).unwrap();
//! assert_eq!(found[0].term, "hello");
//! assert_eq!(found[0].distance, 1);
//! ```

mod compound;
mod corrector;
mod deletes;
mod distance;
mod error;
mod index;

pub use compound::CompoundSuggestion;
pub use corrector::{CorrectorOptions, SpellCorrector, Suggestion, Verbosity};
pub use error::{CorrectorError, Result};
