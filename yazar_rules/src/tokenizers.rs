//! Implementations of [`yazar::Tokenizer`].

use unicode_segmentation::UnicodeSegmentation;
use yazar::Tokenizer;

/// Splits text on Unicode word boundaries and drops everything that is not a word.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_words().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_turkish() {
        let tokens = UnicodeWordTokenizer.tokenize("Türkiye’nin  ilk\nseçimi, çoktan yapıldı.");
        assert_eq!(vec!["Türkiye’nin", "ilk", "seçimi", "çoktan", "yapıldı"], tokens);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(UnicodeWordTokenizer.tokenize("").is_empty());
        assert!(UnicodeWordTokenizer.tokenize(" \n\t").is_empty());
    }
}
