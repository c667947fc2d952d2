use std::collections::BTreeMap;

use daachorse::DoubleArrayAhoCorasick;
use yazar::errors::{Result, YazarError};

/// Longest morpheme chain accepted after a stem.
const MAX_CHAIN_LENGTH: usize = 6;

/// Common Turkish inflectional and derivational morphemes with their labels.
pub const TURKISH_SUFFIXES: &[(&str, &str)] = &[
    ("ler", "A3pl"),
    ("lar", "A3pl"),
    ("leri", "A3pl+P3pl"),
    ("ları", "A3pl+P3pl"),
    ("m", "P1sg"),
    ("ım", "P1sg"),
    ("im", "P1sg"),
    ("um", "P1sg"),
    ("üm", "P1sg"),
    ("n", "P2sg"),
    ("ın", "Gen"),
    ("in", "Gen"),
    ("un", "Gen"),
    ("ün", "Gen"),
    ("nın", "Gen"),
    ("nin", "Gen"),
    ("nun", "Gen"),
    ("nün", "Gen"),
    ("ı", "Acc"),
    ("i", "Acc"),
    ("u", "Acc"),
    ("ü", "Acc"),
    ("yı", "Acc"),
    ("yi", "Acc"),
    ("yu", "Acc"),
    ("yü", "Acc"),
    ("nı", "Acc"),
    ("ni", "Acc"),
    ("nu", "Acc"),
    ("nü", "Acc"),
    ("sı", "P3sg"),
    ("si", "P3sg"),
    ("su", "P3sg"),
    ("sü", "P3sg"),
    ("mız", "P1pl"),
    ("miz", "P1pl"),
    ("muz", "P1pl"),
    ("müz", "P1pl"),
    ("ımız", "P1pl"),
    ("imiz", "P1pl"),
    ("umuz", "P1pl"),
    ("ümüz", "P1pl"),
    ("a", "Dat"),
    ("e", "Dat"),
    ("ya", "Dat"),
    ("ye", "Dat"),
    ("na", "Dat"),
    ("ne", "Dat"),
    ("da", "Loc"),
    ("de", "Loc"),
    ("ta", "Loc"),
    ("te", "Loc"),
    ("nda", "Loc"),
    ("nde", "Loc"),
    ("dan", "Abl"),
    ("den", "Abl"),
    ("tan", "Abl"),
    ("ten", "Abl"),
    ("ndan", "Abl"),
    ("nden", "Abl"),
    ("la", "Ins"),
    ("le", "Ins"),
    ("yla", "Ins"),
    ("yle", "Ins"),
    ("ki", "Rel"),
    ("dır", "Cop"),
    ("dir", "Cop"),
    ("dur", "Cop"),
    ("dür", "Cop"),
    ("tır", "Cop"),
    ("tir", "Cop"),
    ("tur", "Cop"),
    ("tür", "Cop"),
    ("mak", "Inf"),
    ("mek", "Inf"),
    ("ma", "Neg"),
    ("me", "Neg"),
    ("dı", "Past"),
    ("di", "Past"),
    ("du", "Past"),
    ("dü", "Past"),
    ("tı", "Past"),
    ("ti", "Past"),
    ("tu", "Past"),
    ("tü", "Past"),
    ("mış", "Narr"),
    ("miş", "Narr"),
    ("muş", "Narr"),
    ("müş", "Narr"),
    ("yor", "Prog"),
    ("ıyor", "Prog"),
    ("iyor", "Prog"),
    ("uyor", "Prog"),
    ("üyor", "Prog"),
    ("acak", "Fut"),
    ("ecek", "Fut"),
    ("yacak", "Fut"),
    ("yecek", "Fut"),
    ("lık", "Ness"),
    ("lik", "Ness"),
    ("luk", "Ness"),
    ("lük", "Ness"),
    ("sız", "Without"),
    ("siz", "Without"),
    ("suz", "Without"),
    ("süz", "Without"),
    ("lı", "With"),
    ("li", "With"),
    ("lu", "With"),
    ("lü", "With"),
];

/// A morpheme and its label.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Suffix {
    form: String,
    label: String,
}

impl Suffix {
    pub fn form(&self) -> &str {
        &self.form
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Decomposes the remainder of a token into a chain of known morphemes.
pub struct SuffixChain {
    pma: DoubleArrayAhoCorasick,
    suffixes: Vec<Suffix>,
}

impl SuffixChain {
    /// Creates a new suffix chain parser.
    ///
    /// When a form is listed more than once, the first label wins.
    ///
    /// # Errors
    ///
    /// [`YazarError::InvalidArgument`] will be returned if `suffixes` is empty or contains an
    /// empty form.
    pub fn new<I, F, L>(suffixes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (F, L)>,
        F: Into<String>,
        L: Into<String>,
    {
        // Uses BTreeMap to drop duplicated forms, which the automaton rejects.
        let mut forms: BTreeMap<String, String> = BTreeMap::new();
        for (form, label) in suffixes {
            let form = form.into();
            if form.is_empty() {
                return Err(YazarError::invalid_argument(
                    "suffixes",
                    "empty suffix form",
                ));
            }
            forms.entry(form).or_insert_with(|| label.into());
        }
        if forms.is_empty() {
            return Err(YazarError::invalid_argument("suffixes", "no suffixes"));
        }
        let suffixes: Vec<Suffix> = forms
            .into_iter()
            .map(|(form, label)| Suffix { form, label })
            .collect();
        let pma = DoubleArrayAhoCorasick::new(suffixes.iter().map(|s| &s.form)).map_err(|_| {
            YazarError::invalid_argument("suffixes", "failed to build the automaton")
        })?;
        Ok(Self { pma, suffixes })
    }

    /// Creates a parser over [`TURKISH_SUFFIXES`].
    pub fn turkish() -> Result<Self> {
        Self::new(TURKISH_SUFFIXES.iter().copied())
    }

    /// Splits `rest` into morphemes, preferring longer morphemes first.
    ///
    /// # Returns
    ///
    /// The morphemes in order, an empty chain for an empty `rest`, or `None` when `rest` cannot
    /// be decomposed.
    pub fn parse(&self, rest: &str) -> Option<Vec<&Suffix>> {
        let mut chain = vec![];
        if self.parse_inner(rest, &mut chain) {
            Some(chain)
        } else {
            None
        }
    }

    fn parse_inner<'a>(&'a self, rest: &str, chain: &mut Vec<&'a Suffix>) -> bool {
        if rest.is_empty() {
            return true;
        }
        if chain.len() >= MAX_CHAIN_LENGTH {
            return false;
        }
        let mut candidates: Vec<(usize, usize)> = self
            .pma
            .find_overlapping_iter(rest)
            .filter(|m| m.start() == 0)
            .map(|m| (m.end(), m.value()))
            .collect();
        candidates.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        for (end, id) in candidates {
            chain.push(&self.suffixes[id]);
            if self.parse_inner(&rest[end..], chain) {
                return true;
            }
            chain.pop();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(chain: Option<Vec<&Suffix>>) -> Option<Vec<&str>> {
        chain.map(|c| c.into_iter().map(Suffix::label).collect())
    }

    #[test]
    fn test_empty_rest() {
        let chain = SuffixChain::turkish().unwrap();
        assert_eq!(Some(vec![]), labels(chain.parse("")));
    }

    #[test]
    fn test_plural_locative() {
        let chain = SuffixChain::turkish().unwrap();
        assert_eq!(Some(vec!["A3pl", "Loc"]), labels(chain.parse("lerde")));
    }

    #[test]
    fn test_prefers_longer_morpheme() {
        let chain = SuffixChain::turkish().unwrap();
        assert_eq!(Some(vec!["A3pl+P3pl", "Abl"]), labels(chain.parse("larından")));
    }

    #[test]
    fn test_backtracks() {
        let chain = SuffixChain::new([("ab", "X"), ("a", "Y"), ("bc", "Z")]).unwrap();
        assert_eq!(Some(vec!["Y", "Z"]), labels(chain.parse("abc")));
    }

    #[test]
    fn test_unparsable() {
        let chain = SuffixChain::turkish().unwrap();
        assert_eq!(None, labels(chain.parse("xyz")));
    }

    #[test]
    fn test_duplicate_forms_keep_first_label() {
        let chain = SuffixChain::new([("de", "Loc"), ("de", "Conj")]).unwrap();
        assert_eq!(Some(vec!["Loc"]), labels(chain.parse("de")));
    }

    #[test]
    fn test_invalid_suffixes() {
        assert!(SuffixChain::new(Vec::<(String, String)>::new()).is_err());
        assert!(SuffixChain::new([("", "X")]).is_err());
    }
}
