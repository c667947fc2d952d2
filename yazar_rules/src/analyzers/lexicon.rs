use std::collections::BTreeMap;
use std::io::Read;

use daachorse::DoubleArrayAhoCorasick;
use log::debug;
use serde::Deserialize;
use yazar::errors::{Result, YazarError};
use yazar::normalizer::to_turkish_lowercase;
use yazar::{Analysis, Analyzer};

use crate::analyzers::suffix_chain::SuffixChain;

/// A stem and its part of speech.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct LexiconEntry {
    stem: String,
    pos: String,
}

impl LexiconEntry {
    pub fn new<S, P>(stem: S, pos: P) -> Self
    where
        S: Into<String>,
        P: Into<String>,
    {
        Self {
            stem: stem.into(),
            pos: pos.into(),
        }
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn pos(&self) -> &str {
        &self.pos
    }
}

struct Stem {
    stem: String,
    pos: Vec<String>,
}

/// Dictionary-driven morphological analyzer.
///
/// A token is analyzed as a known stem followed by a chain of known suffixes. Every stem that
/// prefixes the token and leaves a parsable remainder yields one analysis per part of speech,
/// longest stem first. Tags are formatted as `[stem:Pos] stem:Pos+form:Label+...`.
pub struct LexiconAnalyzer {
    pma: DoubleArrayAhoCorasick,
    stems: Vec<Stem>,
    suffixes: SuffixChain,
}

impl LexiconAnalyzer {
    /// Creates a new analyzer with [`TURKISH_SUFFIXES`](super::TURKISH_SUFFIXES).
    ///
    /// Stems are lowercased with the Turkish casing rules.
    ///
    /// # Errors
    ///
    /// [`YazarError::InvalidArgument`] will be returned if no entry has a non-empty stem.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        Self::with_suffixes(entries, SuffixChain::turkish()?)
    }

    /// Creates a new analyzer with a custom suffix chain.
    pub fn with_suffixes<I>(entries: I, suffixes: SuffixChain) -> Result<Self>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in entries {
            let stem = to_turkish_lowercase(entry.stem.trim());
            if stem.is_empty() {
                continue;
            }
            let pos = merged.entry(stem).or_default();
            if !pos.contains(&entry.pos) {
                pos.push(entry.pos);
            }
        }
        if merged.is_empty() {
            return Err(YazarError::invalid_argument("entries", "empty lexicon"));
        }
        let stems: Vec<Stem> = merged
            .into_iter()
            .map(|(stem, pos)| Stem { stem, pos })
            .collect();
        let pma = DoubleArrayAhoCorasick::new(stems.iter().map(|s| &s.stem)).map_err(|_| {
            YazarError::invalid_argument("entries", "failed to build the automaton")
        })?;
        debug!("# of stems: {}", stems.len());
        Ok(Self {
            pma,
            stems,
            suffixes,
        })
    }

    /// Reads `stem<TAB>pos` lines without a header. Lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// [`YazarError::CsvError`] will be returned if a line does not have exactly two fields.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .comment(Some(b'#'))
            .quoting(false)
            .from_reader(rdr);
        let mut entries = vec![];
        for record in rdr.deserialize() {
            let entry: LexiconEntry = record?;
            entries.push(entry);
        }
        Self::new(entries)
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }
}

impl Analyzer for LexiconAnalyzer {
    fn analyze(&self, token: &str) -> Vec<Analysis> {
        let mut candidates: Vec<(usize, usize)> = self
            .pma
            .find_overlapping_iter(token)
            .filter(|m| m.start() == 0)
            .map(|m| (m.end(), m.value()))
            .collect();
        candidates.sort_unstable_by(|a, b| b.0.cmp(&a.0));

        let mut result = vec![];
        for (end, id) in candidates {
            let chain = match self.suffixes.parse(&token[end..]) {
                Some(chain) => chain,
                None => continue,
            };
            let stem = &self.stems[id];
            for pos in &stem.pos {
                let mut tag = format!("[{}:{}] {}:{}", stem.stem, pos, stem.stem, pos);
                for suffix in &chain {
                    tag.push('+');
                    tag.push_str(suffix.form());
                    tag.push(':');
                    tag.push_str(suffix.label());
                }
                result.push(Analysis::new(stem.stem.as_str(), tag));
            }
        }
        result
    }
}
