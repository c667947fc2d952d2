//! # Yazar
//!
//! Yazar attributes short Turkish opinion texts to their authors. Texts are reduced to lemma
//! streams by a morphological analysis service, weighted with TF-IDF, and classified by a
//! linear model trained with LIBLINEAR.
//!
//! ## Examples
//!
//! ```no_run
//! use hashbrown::HashSet;
//! use yazar::{attribute, Analysis, Analyzer, Document, Normalizer, PipelineConfig, Tokenizer};
//!
//! struct Whitespace;
//!
//! impl Tokenizer for Whitespace {
//!     fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
//!         text.split_whitespace().collect()
//!     }
//! }
//!
//! struct Identity;
//!
//! impl Analyzer for Identity {
//!     fn analyze(&self, token: &str) -> Vec<Analysis> {
//!         vec![Analysis::new(token, "Unk")]
//!     }
//! }
//!
//! let normalizer = Normalizer::new(&Whitespace, &Identity, HashSet::new());
//! let documents = vec![
//!     Document::new(Some("seçim kurulu toplandı"), "X"),
//!     Document::new(Some("yeni film vizyona girdi"), "Y"),
//! ];
//! let pipeline = attribute(&normalizer, &documents, &PipelineConfig::default()).unwrap();
//! println!("accuracy: {:.2}%", pipeline.accuracy() * 100.0);
//! println!("{}", pipeline.predict(&normalizer, Some("seçim sonuçları")).unwrap());
//! ```

mod utils;

pub mod analysis;
pub mod classifier;
pub mod corpus;
pub mod errors;
pub mod frequency;
pub mod label;
pub mod normalizer;
pub mod pipeline;
pub mod split;
pub mod vectorizer;

pub use analysis::{Analysis, Analyzer, StopwordProvider, Tokenizer};
pub use classifier::{Classifier, Model, SolverType};
pub use corpus::{read_documents, Corpus, Document};
pub use frequency::FrequencyTable;
pub use label::LabelIndex;
pub use normalizer::{AmbiguityPolicy, Normalizer, StopwordStage};
pub use pipeline::{attribute, FittedPipeline, PipelineConfig};
pub use split::{SplitConfig, SplitStrategy};
pub use vectorizer::{FeatureSpace, FeatureSpaceBuilder, SparseVector};
