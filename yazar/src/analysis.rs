//! Interfaces to the morphological analysis service.

use hashbrown::HashSet;

use crate::errors::Result;

/// A single morphological reading of a token.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Analysis {
    lemma: String,
    tag: String,
}

impl Analysis {
    /// Creates a new analysis.
    ///
    /// # Arguments
    ///
    /// * `lemma` - The canonical stem.
    /// * `tag` - A formatted description of the part of speech and inflections.
    pub fn new<L, T>(lemma: L, tag: T) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn into_parts(self) -> (String, String) {
        (self.lemma, self.tag)
    }
}

/// Splits text into tokens.
pub trait Tokenizer {
    /// Tokenizes the text.
    ///
    /// # Arguments
    ///
    /// * `text` - Input text.
    ///
    /// # Returns
    ///
    /// Tokens in reading order.
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Produces candidate analyses of a single token.
pub trait Analyzer {
    /// Analyzes a token.
    ///
    /// # Arguments
    ///
    /// * `token` - A token produced by a [`Tokenizer`].
    ///
    /// # Returns
    ///
    /// Zero or more analyses. An empty vector means the token is unanalyzable.
    fn analyze(&self, token: &str) -> Vec<Analysis>;
}

/// Serves stopword lists by language.
pub trait StopwordProvider {
    /// Gets the stopword set of a language.
    ///
    /// # Errors
    ///
    /// [`YazarError::InvalidArgument`](crate::errors::YazarError::InvalidArgument) will be
    /// returned if the language is not supported.
    fn stopwords(&self, language: &str) -> Result<HashSet<String>>;
}
