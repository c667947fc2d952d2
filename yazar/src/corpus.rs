use std::io::Read;

use log::debug;
use serde::Deserialize;

use crate::errors::Result;
use crate::normalizer::Normalizer;

/// A raw text with its author.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Document {
    text: Option<String>,
    author: String,
}

impl Document {
    /// Creates a new document.
    ///
    /// # Arguments
    ///
    /// * `text` - Raw text. `None` marks an absent text.
    /// * `author` - Author label.
    pub fn new<T, A>(text: Option<T>, author: A) -> Self
    where
        T: Into<String>,
        A: Into<String>,
    {
        Self {
            text: text.map(Into::into),
            author: author.into(),
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn author(&self) -> &str {
        &self.author
    }
}

/// Reads documents from CSV data with a `text,author` header.
///
/// Quoted fields may span several lines. An empty `text` field is read as an absent text.
///
/// # Errors
///
/// [`YazarError::CsvError`](crate::errors::YazarError::CsvError) will be returned if a record is
/// malformed.
pub fn read_documents<R>(rdr: R) -> Result<Vec<Document>>
where
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new().flexible(false).from_reader(rdr);
    let mut documents = vec![];
    for record in rdr.deserialize() {
        documents.push(record?);
    }
    Ok(documents)
}

/// Normalized documents with their author labels, in input order.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    texts: Vec<String>,
    authors: Vec<String>,
}

impl Corpus {
    /// Normalizes every document.
    ///
    /// The output has exactly one normalized string per input document, even if it is empty.
    pub fn build(normalizer: &Normalizer, documents: &[Document]) -> Self {
        let mut texts = Vec::with_capacity(documents.len());
        let mut authors = Vec::with_capacity(documents.len());
        for (i, document) in documents.iter().enumerate() {
            let text = normalizer.normalize(document.text());
            debug!("document {i}: {} lemmas", text.split_whitespace().count());
            texts.push(text);
            authors.push(document.author.clone());
        }
        Self { texts, authors }
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hashbrown::HashSet;

    use crate::analysis::{Analysis, Analyzer, Tokenizer};

    struct WhitespaceTokenizer;

    impl Tokenizer for WhitespaceTokenizer {
        fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
            text.split_whitespace().collect()
        }
    }

    struct EchoAnalyzer;

    impl Analyzer for EchoAnalyzer {
        fn analyze(&self, token: &str) -> Vec<Analysis> {
            vec![Analysis::new(token, "[Noun]")]
        }
    }

    #[test]
    fn test_build_preserves_order_and_cardinality() {
        let stopwords: HashSet<String> = ["ve".to_string()].into_iter().collect();
        let normalizer = Normalizer::new(&WhitespaceTokenizer, &EchoAnalyzer, stopwords);
        let documents = vec![
            Document::new(Some("Seçim ve kurul"), "X"),
            Document::new(None::<String>, "Y"),
            Document::new(Some("ve"), "X"),
            Document::new(Some("Film"), "Y"),
        ];
        let corpus = Corpus::build(&normalizer, &documents);
        assert_eq!(4, corpus.len());
        assert_eq!(&["seçim kurul", "", "", "film"], corpus.texts());
        assert_eq!(&["X", "Y", "X", "Y"], corpus.authors());
    }

    #[test]
    fn test_read_documents() {
        let data = "text,author\n\"Birinci satır\nikinci satır\",Uğur Dündar\n,Özdemir İnce\n";
        let documents = read_documents(data.as_bytes()).unwrap();
        assert_eq!(
            vec![
                Document::new(Some("Birinci satır\nikinci satır"), "Uğur Dündar"),
                Document::new(None::<String>, "Özdemir İnce"),
            ],
            documents
        );
    }

    #[test]
    fn test_read_documents_missing_author() {
        let data = "text,author\nsadece metin\n";
        assert!(read_documents(data.as_bytes()).is_err());
    }
}
