use std::hash::{Hash, Hasher};
use std::str::FromStr;

use hashbrown::HashSet;

use crate::analysis::{Analysis, Analyzer, Tokenizer};
use crate::utils::SplitMix64;

/// How many analyses of an ambiguous token contribute lemmas.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AmbiguityPolicy {
    /// Every analysis contributes its lemma.
    AllAnalyses,

    /// Only the first analysis returned by the analyzer contributes.
    FirstAnalysis,
}

impl Default for AmbiguityPolicy {
    fn default() -> Self {
        Self::AllAnalyses
    }
}

impl FromStr for AmbiguityPolicy {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::AllAnalyses),
            "first" => Ok(Self::FirstAnalysis),
            _ => Err("Could not parse an ambiguity policy: {all, first}"),
        }
    }
}

/// Where stopwords are removed. This is the only stopword filter in the pipeline.
///
/// The lemma stage applies to the lemma stream of [`Normalizer::normalize()`] only.
/// [`Normalizer::analyze()`] keeps stopword lemmas so that frequency reports count them.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum StopwordStage {
    /// Raw words are filtered before analysis.
    Surface,

    /// Lemmas are filtered after analysis.
    Lemma,

    /// Both of the above.
    SurfaceAndLemma,
}

impl StopwordStage {
    const fn filters_surface(self) -> bool {
        matches!(self, Self::Surface | Self::SurfaceAndLemma)
    }

    const fn filters_lemma(self) -> bool {
        matches!(self, Self::Lemma | Self::SurfaceAndLemma)
    }
}

impl Default for StopwordStage {
    fn default() -> Self {
        Self::SurfaceAndLemma
    }
}

impl FromStr for StopwordStage {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surface" => Ok(Self::Surface),
            "lemma" => Ok(Self::Lemma),
            "both" => Ok(Self::SurfaceAndLemma),
            _ => Err("Could not parse a stopword stage: {surface, lemma, both}"),
        }
    }
}

/// Lowercases with the Turkish dotted/dotless I mapping.
pub fn to_turkish_lowercase(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'I' => result.push('ı'),
            'İ' => result.push('i'),
            c => result.extend(c.to_lowercase()),
        }
    }
    result
}

/// Removes every character that is neither alphabetic nor whitespace.
pub fn retain_alphabetic(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect()
}

/// Converts raw text into a lemma stream.
///
/// The tokenizer and analyzer are borrowed so that a single, expensive analysis service can be
/// shared by every component that normalizes text.
///
/// # Examples
///
/// ```
/// use hashbrown::HashSet;
/// use yazar::{Analysis, Analyzer, Normalizer, Tokenizer};
///
/// struct Whitespace;
///
/// impl Tokenizer for Whitespace {
///     fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
///         text.split_whitespace().collect()
///     }
/// }
///
/// struct Identity;
///
/// impl Analyzer for Identity {
///     fn analyze(&self, token: &str) -> Vec<Analysis> {
///         vec![Analysis::new(token, "Noun")]
///     }
/// }
///
/// let stopwords: HashSet<String> = ["ve".to_string()].into_iter().collect();
/// let normalizer = Normalizer::new(&Whitespace, &Identity, stopwords);
/// assert_eq!("kalem kağıt", normalizer.normalize(Some("Kalem, ve kağıt!")));
/// assert_eq!("", normalizer.normalize(None));
/// ```
pub struct Normalizer<'a> {
    tokenizer: &'a dyn Tokenizer,
    analyzer: &'a dyn Analyzer,
    stopwords: HashSet<String>,
    ambiguity: AmbiguityPolicy,
    stopword_stage: StopwordStage,
}

impl<'a> Normalizer<'a> {
    /// Creates a new normalizer.
    ///
    /// # Arguments
    ///
    /// * `tokenizer` - The tokenizer of the analysis service.
    /// * `analyzer` - The morphological analyzer of the analysis service.
    /// * `stopwords` - Words removed at the configured [`StopwordStage`].
    pub fn new(
        tokenizer: &'a dyn Tokenizer,
        analyzer: &'a dyn Analyzer,
        stopwords: HashSet<String>,
    ) -> Self {
        Self {
            tokenizer,
            analyzer,
            stopwords,
            ambiguity: AmbiguityPolicy::default(),
            stopword_stage: StopwordStage::default(),
        }
    }

    /// Sets the ambiguity policy.
    pub fn ambiguity(mut self, policy: AmbiguityPolicy) -> Self {
        self.ambiguity = policy;
        self
    }

    /// Sets the stopword stage.
    pub fn stopword_stage(mut self, stage: StopwordStage) -> Self {
        self.stopword_stage = stage;
        self
    }

    pub fn ambiguity_policy(&self) -> AmbiguityPolicy {
        self.ambiguity
    }

    pub fn stopword_filter_stage(&self) -> StopwordStage {
        self.stopword_stage
    }

    /// Lowercases, strips non-alphabetic characters, and removes surface stopwords.
    ///
    /// # Returns
    ///
    /// Surviving words joined by single spaces.
    pub fn clean(&self, text: &str) -> String {
        let text = retain_alphabetic(&to_turkish_lowercase(text));
        let filter_surface = self.stopword_stage.filters_surface();
        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|w| !filter_surface || !self.stopwords.contains(*w))
            .collect();
        words.join(" ")
    }

    /// Fingerprint of the settings that shape the lemma stream: the stopword set, the
    /// ambiguity policy, and the stopword stage.
    pub fn id(&self) -> u64 {
        let mut words: Vec<&String> = self.stopwords.iter().collect();
        words.sort_unstable();
        let mut hasher = SplitMix64::new();
        for word in words {
            word.hash(&mut hasher);
        }
        self.ambiguity.hash(&mut hasher);
        self.stopword_stage.hash(&mut hasher);
        hasher.finish()
    }

    /// Runs tokenization and analysis over the cleaned text.
    ///
    /// Surface stopwords and the ambiguity policy are applied. Lemmas that are stopwords are
    /// kept.
    ///
    /// # Arguments
    ///
    /// * `text` - Raw text. `None` is treated as an empty document.
    ///
    /// # Returns
    ///
    /// Analyses in token order.
    pub fn analyze(&self, text: Option<&str>) -> Vec<Analysis> {
        let text = match text {
            Some(text) => text,
            None => return vec![],
        };
        let cleaned = self.clean(text);
        let mut result = vec![];
        for token in self.tokenizer.tokenize(&cleaned) {
            let analyses = self.analyzer.analyze(token);
            let take = match self.ambiguity {
                AmbiguityPolicy::AllAnalyses => analyses.len(),
                AmbiguityPolicy::FirstAnalysis => analyses.len().min(1),
            };
            result.extend(analyses.into_iter().take(take));
        }
        result
    }

    /// Normalizes the text into space-separated lemmas.
    ///
    /// Lemmas that are stopwords are dropped when the stage filters lemmas.
    ///
    /// # Arguments
    ///
    /// * `text` - Raw text. `None` yields an empty string.
    pub fn normalize(&self, text: Option<&str>) -> String {
        let analyses = self.analyze(text);
        let filter_lemma = self.stopword_stage.filters_lemma();
        let lemmas: Vec<&str> = analyses
            .iter()
            .map(|a| a.lemma())
            .filter(|lemma| {
                !filter_lemma || !self.stopwords.contains(&to_turkish_lowercase(lemma))
            })
            .collect();
        lemmas.join(" ")
    }
}
