use std::collections::BTreeSet;

use hashbrown::HashMap;

use crate::errors::{Result, YazarError};

/// Bijection between author names and dense class ids.
///
/// Ids are assigned in lexicographic order of the distinct labels, so fitting the same multiset
/// of labels always yields the same index.
#[derive(Clone, Debug)]
pub struct LabelIndex {
    labels: Vec<String>,
    ids: HashMap<String, u32>,
}

impl LabelIndex {
    /// Fits an index over the given labels.
    ///
    /// # Errors
    ///
    /// [`YazarError::CastError`] will be returned if there are more than `u32::MAX` labels.
    pub fn fit<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();
        let mut ids = HashMap::with_capacity(sorted.len());
        for (i, label) in sorted.iter().enumerate() {
            ids.insert(label.clone(), u32::try_from(i)?);
        }
        Ok(Self {
            labels: sorted.into_iter().collect(),
            ids,
        })
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels ordered by id.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Gets the id of a label.
    ///
    /// # Errors
    ///
    /// [`YazarError::UnknownLabel`] will be returned if the label was not seen at fit time.
    pub fn encode(&self, label: &str) -> Result<u32> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| YazarError::unknown_label(label))
    }

    /// Encodes every label in order.
    pub fn encode_all<I, S>(&self, labels: I) -> Result<Vec<u32>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| self.encode(label.as_ref()))
            .collect()
    }

    /// Gets the label of an id.
    ///
    /// # Errors
    ///
    /// [`YazarError::InvalidId`] will be returned if `id` is not below [`Self::len()`].
    pub fn decode(&self, id: u32) -> Result<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.labels.get(i))
            .map(String::as_str)
            .ok_or_else(|| YazarError::invalid_id(id, self.labels.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_sorted_ids() {
        let index = LabelIndex::fit(["Uğur Dündar", "Doğan Hızlan", "Uğur Dündar", "Ali Karahasanoğlu"])
            .unwrap();
        assert_eq!(3, index.len());
        assert_eq!(
            &["Ali Karahasanoğlu", "Doğan Hızlan", "Uğur Dündar"],
            index.labels()
        );
        assert_eq!(0, index.encode("Ali Karahasanoğlu").unwrap());
        assert_eq!(2, index.encode("Uğur Dündar").unwrap());
    }

    #[test]
    fn test_roundtrip_training_labels() {
        let labels = ["b", "a", "c", "a"];
        let index = LabelIndex::fit(labels).unwrap();
        for label in labels {
            assert_eq!(label, index.decode(index.encode(label).unwrap()).unwrap());
        }
    }

    #[test]
    fn test_fit_is_order_independent() {
        let a = LabelIndex::fit(["x", "y", "z", "x"]).unwrap();
        let b = LabelIndex::fit(["z", "x", "x", "y"]).unwrap();
        assert_eq!(a.labels(), b.labels());
    }

    #[test]
    fn test_unknown_label() {
        let index = LabelIndex::fit(["a", "b"]).unwrap();
        assert!(matches!(
            index.encode("c"),
            Err(YazarError::UnknownLabel(_))
        ));
        assert!(matches!(
            index.encode_all(["a", "c"]),
            Err(YazarError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_invalid_id() {
        let index = LabelIndex::fit(["a", "b"]).unwrap();
        assert!(matches!(index.decode(2), Err(YazarError::InvalidId(_))));
        assert!(matches!(
            LabelIndex::fit(Vec::<String>::new()).unwrap().decode(0),
            Err(YazarError::InvalidId(_))
        ));
    }
}
