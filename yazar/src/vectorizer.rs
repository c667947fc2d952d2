use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use hashbrown::{HashMap, HashSet};

use crate::errors::Result;
use crate::normalizer::to_turkish_lowercase;
use crate::utils::SplitMix64;

/// A sparse row of the feature matrix.
///
/// Entries are sorted by column. The vector remembers which feature space produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct SparseVector {
    pub(crate) entries: Vec<(u32, f64)>,
    pub(crate) dim: usize,
    pub(crate) space_id: u64,
}

impl SparseVector {
    /// Non-zero `(column, weight)` pairs in ascending column order.
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    /// Width of the feature space.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Fingerprint of the feature space that produced this vector.
    pub fn space_id(&self) -> u64 {
        self.space_id
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Weight of a column, zero if absent.
    pub fn get(&self, column: u32) -> f64 {
        self.entries
            .binary_search_by_key(&column, |&(c, _)| c)
            .map_or(0.0, |i| self.entries[i].1)
    }
}

/// Settings of the TF-IDF weighting.
#[derive(Clone, Debug)]
pub struct FeatureSpaceBuilder {
    smooth_idf: bool,
    sublinear_tf: bool,
    min_df: usize,
}

impl FeatureSpaceBuilder {
    pub const fn new() -> Self {
        Self {
            smooth_idf: true,
            sublinear_tf: false,
            min_df: 1,
        }
    }

    /// Adds one to document frequencies, as if an extra document contained every term once.
    pub const fn smooth_idf(mut self, smooth_idf: bool) -> Self {
        self.smooth_idf = smooth_idf;
        self
    }

    /// Replaces term counts `tf` with `1 + ln(tf)`.
    pub const fn sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Ignores terms that occur in fewer than `min_df` documents.
    pub const fn min_df(mut self, min_df: usize) -> Self {
        self.min_df = min_df;
        self
    }

    /// Fits a feature space over normalized documents.
    ///
    /// # Arguments
    ///
    /// * `texts` - Normalized documents, one string per document.
    ///
    /// # Returns
    ///
    /// A fitted feature space.
    ///
    /// # Errors
    ///
    /// [`YazarError::CastError`](crate::errors::YazarError::CastError) will be returned if the
    /// vocabulary exceeds the `u32` column range.
    pub fn fit<S>(&self, texts: &[S]) -> Result<FeatureSpace>
    where
        S: AsRef<str>,
    {
        // Uses BTreeMap to keep the vocabulary in lexicographic order.
        let mut doc_freq: BTreeMap<String, usize> = BTreeMap::new();
        for text in texts {
            let lowered = to_turkish_lowercase(text.as_ref());
            let unique: HashSet<&str> = lowered.split_whitespace().collect();
            for term in unique {
                *doc_freq.entry(term.to_string()).or_insert(0) += 1;
            }
        }

        let n_docs = texts.len() as f64;
        let smoothing = if self.smooth_idf { 1.0 } else { 0.0 };
        let mut terms = vec![];
        let mut idf = vec![];
        for (term, df) in doc_freq {
            if df < self.min_df {
                continue;
            }
            idf.push(((n_docs + smoothing) / (df as f64 + smoothing)).ln() + 1.0);
            terms.push(term);
        }

        let mut vocabulary = HashMap::with_capacity(terms.len());
        let mut hasher = SplitMix64::new();
        for (i, term) in terms.iter().enumerate() {
            vocabulary.insert(term.clone(), u32::try_from(i)?);
            term.hash(&mut hasher);
        }
        self.sublinear_tf.hash(&mut hasher);
        for w in &idf {
            hasher.write_u64(w.to_bits());
        }

        Ok(FeatureSpace {
            vocabulary,
            terms,
            idf,
            sublinear_tf: self.sublinear_tf,
            id: hasher.finish(),
        })
    }
}

impl Default for FeatureSpaceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A fitted vocabulary with inverse document frequency weights.
#[derive(Clone, Debug)]
pub struct FeatureSpace {
    vocabulary: HashMap<String, u32>,
    terms: Vec<String>,
    idf: Vec<f64>,
    sublinear_tf: bool,
    id: u64,
}

impl FeatureSpace {
    /// Number of columns.
    pub fn dim(&self) -> usize {
        self.terms.len()
    }

    /// Terms ordered by column.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Gets the column of a term.
    pub fn column(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Gets the inverse document frequency of a column.
    pub fn idf(&self, column: u32) -> Option<f64> {
        usize::try_from(column)
            .ok()
            .and_then(|i| self.idf.get(i))
            .copied()
    }

    /// Fingerprint of this feature space.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Maps a normalized document into the feature space.
    ///
    /// Terms outside of the vocabulary are ignored. An empty document yields a zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let lowered = to_turkish_lowercase(text);
        let mut counts: BTreeMap<u32, f64> = BTreeMap::new();
        for term in lowered.split_whitespace() {
            if let Some(&column) = self.vocabulary.get(term) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }
        let mut entries: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(column, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (column, tf * self.idf[column as usize])
            })
            .collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }
        SparseVector {
            entries,
            dim: self.dim(),
            space_id: self.id,
        }
    }

    /// Maps every document into the feature space.
    pub fn transform_all<S>(&self, texts: &[S]) -> Vec<SparseVector>
    where
        S: AsRef<str>,
    {
        texts.iter().map(|text| self.transform(text.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec!["seçim kurul seçim", "kurul karar", "sinema film"]
    }

    #[test]
    fn test_vocabulary_sorted() {
        let space = FeatureSpaceBuilder::new().fit(&corpus()).unwrap();
        assert_eq!(
            &["film", "karar", "kurul", "seçim", "sinema"],
            space.terms()
        );
        assert_eq!(Some(3), space.column("seçim"));
        assert_eq!(None, space.column("oy"));
    }

    #[test]
    fn test_smoothed_idf() {
        let space = FeatureSpaceBuilder::new().fit(&corpus()).unwrap();
        let kurul = space.idf(space.column("kurul").unwrap()).unwrap();
        let film = space.idf(space.column("film").unwrap()).unwrap();
        assert!((kurul - ((4.0f64 / 3.0).ln() + 1.0)).abs() < 1e-12);
        assert!((film - (2.0f64.ln() + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_transform_normalized() {
        let space = FeatureSpaceBuilder::new().fit(&corpus()).unwrap();
        let v = space.transform("seçim kurul seçim");
        let norm: f64 = v.entries().iter().map(|(_, w)| w * w).sum();
        assert!((norm - 1.0).abs() < 1e-12);
        assert!(v.get(3) > v.get(2));
        assert_eq!(0.0, v.get(0));
        assert_eq!(5, v.dim());
    }

    #[test]
    fn test_transform_unknown_and_empty() {
        let space = FeatureSpaceBuilder::new().fit(&corpus()).unwrap();
        assert!(space.transform("").is_zero());
        assert!(space.transform("bilinmeyen kelime").is_zero());
        assert_eq!(space.id(), space.transform("").space_id());
    }

    #[test]
    fn test_transform_is_pure() {
        let space = FeatureSpaceBuilder::new().fit(&corpus()).unwrap();
        assert_eq!(space.transform("kurul seçim"), space.transform("kurul seçim"));
    }

    #[test]
    fn test_min_df() {
        let space = FeatureSpaceBuilder::new().min_df(2).fit(&corpus()).unwrap();
        assert_eq!(&["kurul"], space.terms());
    }

    #[test]
    fn test_refit_changes_fingerprint() {
        let a = FeatureSpaceBuilder::new().fit(&corpus()).unwrap();
        let b = FeatureSpaceBuilder::new().fit(&["başka bir metin"]).unwrap();
        assert_ne!(a.id(), b.id());
        let c = FeatureSpaceBuilder::new().fit(&corpus()).unwrap();
        assert_eq!(a.id(), c.id());
    }
}
