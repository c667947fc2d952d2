//! Collaborators of [`yazar`]: a tokenizer, a morphological analyzer, and stopword lists.
//!
//! ## Examples
//!
//! ```
//! use yazar::Normalizer;
//! use yazar::StopwordProvider;
//! use yazar_rules::analyzers::{LexiconAnalyzer, LexiconEntry};
//! use yazar_rules::stopwords::BuiltinStopwords;
//! use yazar_rules::tokenizers::UnicodeWordTokenizer;
//!
//! let analyzer = LexiconAnalyzer::new(vec![
//!     LexiconEntry::new("seçim", "Noun"),
//!     LexiconEntry::new("kurul", "Noun"),
//! ])
//! .unwrap();
//! let stopwords = BuiltinStopwords.stopwords("tr").unwrap();
//! let normalizer = Normalizer::new(&UnicodeWordTokenizer, &analyzer, stopwords);
//! assert_eq!("seçim kurul", normalizer.normalize(Some("Seçimler ve kurulda")));
//! ```

pub mod analyzers;
pub mod stopwords;
pub mod tokenizers;
