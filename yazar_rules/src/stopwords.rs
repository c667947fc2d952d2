//! Stopword lists.

use std::io::{BufRead, BufReader, Read};

use hashbrown::HashSet;
use yazar::errors::{Result, YazarError};
use yazar::normalizer::to_turkish_lowercase;
use yazar::StopwordProvider;

/// The common Turkish stopword list.
pub const TURKISH: &[&str] = &[
    "acaba", "ama", "aslında", "az", "bazı", "belki", "biri", "birkaç", "birşey", "biz", "bu",
    "çok", "çünkü", "da", "daha", "de", "defa", "diye", "eğer", "en", "gibi", "hem", "hep",
    "hepsi", "her", "hiç", "için", "ile", "ise", "kez", "ki", "kim", "mı", "mu", "mü", "nasıl",
    "ne", "neden", "nerde", "nerede", "nereye", "niçin", "niye", "o", "sanki", "şey", "siz", "şu",
    "tüm", "ve", "veya", "ya", "yani",
];

/// Serves the built-in lists. Turkish is available as `tr` or `turkish`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinStopwords;

impl StopwordProvider for BuiltinStopwords {
    fn stopwords(&self, language: &str) -> Result<HashSet<String>> {
        match language {
            "tr" | "turkish" => Ok(TURKISH.iter().map(|w| w.to_string()).collect()),
            _ => Err(YazarError::invalid_argument(
                "language",
                format!("no stopword list for {language:?}"),
            )),
        }
    }
}

/// A user-supplied stopword list for a single language.
#[derive(Clone, Debug, Default)]
pub struct StopwordList {
    words: HashSet<String>,
}

impl StopwordList {
    /// Reads one word per line. Blank lines and lines starting with `#` are skipped, and words
    /// are lowercased with the Turkish casing rules.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut words = HashSet::new();
        for line in BufReader::new(rdr).lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.insert(to_turkish_lowercase(word));
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl StopwordProvider for StopwordList {
    /// Returns the list regardless of `language`.
    fn stopwords(&self, _language: &str) -> Result<HashSet<String>> {
        Ok(self.words.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_turkish() {
        let stopwords = BuiltinStopwords.stopwords("turkish").unwrap();
        assert_eq!(TURKISH.len(), stopwords.len());
        assert!(stopwords.contains("ve"));
        assert!(stopwords.contains("çünkü"));
        assert_eq!(stopwords, BuiltinStopwords.stopwords("tr").unwrap());
    }

    #[test]
    fn test_builtin_unknown_language() {
        assert!(matches!(
            BuiltinStopwords.stopwords("klingon"),
            Err(YazarError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_reader() {
        let data = "# köşe yazısı\nVe\n\n  İLE \nhatta\n";
        let list = StopwordList::from_reader(data.as_bytes()).unwrap();
        assert_eq!(3, list.len());
        let stopwords = list.stopwords("tr").unwrap();
        assert!(stopwords.contains("ve"));
        assert!(stopwords.contains("ile"));
        assert!(stopwords.contains("hatta"));
    }
}
