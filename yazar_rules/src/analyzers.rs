//! Implementations of [`yazar::Analyzer`].

mod lexicon;
mod suffix_chain;

pub use lexicon::{LexiconAnalyzer, LexiconEntry};
pub use suffix_chain::{Suffix, SuffixChain, TURKISH_SUFFIXES};
