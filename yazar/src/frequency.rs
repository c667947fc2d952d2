use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::Result;
use crate::normalizer::Normalizer;
use crate::utils::Indexer;

/// Occurrence counts of `(lemma, tag)` pairs in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    keys: Indexer<(String, String)>,
    counts: Vec<u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the analyses of every text.
    ///
    /// Each text goes through [`Normalizer::analyze()`], so surface stopwords and the ambiguity
    /// policy apply but lemmas that are stopwords are still counted. The total count equals the
    /// number of analyses produced for all texts.
    pub fn aggregate<'t, I>(normalizer: &Normalizer, texts: I) -> Self
    where
        I: IntoIterator<Item = Option<&'t str>>,
    {
        let mut table = Self::new();
        for text in texts {
            for analysis in normalizer.analyze(text) {
                let (lemma, tag) = analysis.into_parts();
                table.add(lemma, tag);
            }
        }
        table
    }

    /// Adds one occurrence.
    pub fn add(&mut self, lemma: String, tag: String) {
        let id = self.keys.get_id(&(lemma, tag));
        if id == self.counts.len() {
            self.counts.push(0);
        }
        self.counts[id] += 1;
    }

    /// Gets the count of a pair.
    pub fn get(&self, lemma: &str, tag: &str) -> u64 {
        self.keys
            .find(&(lemma.to_string(), tag.to_string()))
            .map_or(0, |id| self.counts[id])
    }

    /// Number of distinct pairs.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterates over `(lemma, tag, count)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, u64)> {
        self.keys
            .keys()
            .iter()
            .zip(&self.counts)
            .map(|((lemma, tag), &count)| (lemma.as_str(), tag.as_str(), count))
    }

    /// Writes one `lemma<TAB>tag<TAB>count` line per pair, without a header.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(wtr);
        for (lemma, tag, count) in self.iter() {
            let count = count.to_string();
            wtr.write_record([lemma, tag, count.as_str()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Writes the table to a file, replacing its contents.
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let f = BufWriter::new(File::create(path)?);
        self.write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hashbrown::{HashMap, HashSet};

    use crate::analysis::{Analysis, Analyzer, Tokenizer};

    struct WhitespaceTokenizer;

    impl Tokenizer for WhitespaceTokenizer {
        fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
            text.split_whitespace().collect()
        }
    }

    struct TableAnalyzer(HashMap<&'static str, Vec<Analysis>>);

    impl Analyzer for TableAnalyzer {
        fn analyze(&self, token: &str) -> Vec<Analysis> {
            self.0.get(token).cloned().unwrap_or_default()
        }
    }

    fn analyzer() -> TableAnalyzer {
        let mut table = HashMap::new();
        table.insert("seçimi", vec![Analysis::new("seçim", "T1")]);
        table.insert("seçimde", vec![Analysis::new("seçim", "T1")]);
        table.insert("kurula", vec![Analysis::new("kurul", "T2")]);
        table.insert("bunu", vec![Analysis::new("bu", "[bu:Pron] +Acc")]);
        table.insert(
            "yüz",
            vec![Analysis::new("yüz", "Noun"), Analysis::new("yüz", "Num")],
        );
        TableAnalyzer(table)
    }

    #[test]
    fn test_counts_in_first_seen_order() {
        let analyzer = analyzer();
        let normalizer = Normalizer::new(&WhitespaceTokenizer, &analyzer, HashSet::new());
        let table = FrequencyTable::aggregate(&normalizer, [Some("kurula seçimi seçimde")]);
        assert_eq!(2, table.len());
        assert_eq!(
            vec![("kurul", "T2", 1), ("seçim", "T1", 2)],
            table.iter().collect::<Vec<_>>()
        );
        assert_eq!(2, table.get("seçim", "T1"));
        assert_eq!(0, table.get("seçim", "T2"));
    }

    #[test]
    fn test_total_matches_analyses() {
        let analyzer = analyzer();
        let stopwords: HashSet<String> = ["ve".to_string()].into_iter().collect();
        let normalizer = Normalizer::new(&WhitespaceTokenizer, &analyzer, stopwords);
        let texts = [Some("seçimi ve yüz"), None, Some("Kurula yüz bilinmeyen")];
        let table = FrequencyTable::aggregate(&normalizer, texts);
        let n_analyses: usize = texts.iter().map(|t| normalizer.analyze(*t).len()).sum();
        assert_eq!(n_analyses as u64, table.total());
        assert_eq!(2, table.get("yüz", "Noun"));
        assert_eq!(2, table.get("yüz", "Num"));
    }

    #[test]
    fn test_counts_stopword_lemmas() {
        let analyzer = analyzer();
        let stopwords: HashSet<String> = ["bu", "ve"].iter().map(|s| s.to_string()).collect();
        let normalizer = Normalizer::new(&WhitespaceTokenizer, &analyzer, stopwords);
        let text = Some("bunu ve seçimi");
        assert_eq!("seçim", normalizer.normalize(text));
        let table = FrequencyTable::aggregate(&normalizer, [text]);
        assert_eq!(
            vec![("bu", "[bu:Pron] +Acc", 1), ("seçim", "T1", 1)],
            table.iter().collect::<Vec<_>>()
        );
        assert_eq!(1, table.get("bu", "[bu:Pron] +Acc"));
        assert_eq!(0, table.get("ve", "[ve:Conj]"));
    }

    #[test]
    fn test_write_tsv() {
        let mut table = FrequencyTable::new();
        table.add("seçim".into(), "[seçim:Noun] seçim:Noun+A3sg".into());
        table.add("kurul".into(), "T2".into());
        table.add("seçim".into(), "[seçim:Noun] seçim:Noun+A3sg".into());
        let mut buf = vec![];
        table.write(&mut buf).unwrap();
        assert_eq!(
            "seçim\t[seçim:Noun] seçim:Noun+A3sg\t2\nkurul\tT2\t1\n",
            String::from_utf8(buf).unwrap()
        );
    }
}
