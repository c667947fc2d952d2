//! Attribution driver.
//!
//! Each stage of a training run is its own type and each transition consumes the previous
//! stage, so stages cannot be skipped or repeated:
//!
//! [`CorpusBuilt`] → [`LabelsEncoded`] → [`FeatureSpaceFitted`] → [`Split`] → [`ModelTrained`]
//! → [`FittedPipeline`]
//!
//! Only a [`FittedPipeline`] can predict, and it always predicts with the exact label index,
//! feature space, and model produced by its own run.

use log::{debug, info, warn};

use crate::classifier::{Classifier, Model};
use crate::corpus::{Corpus, Document};
use crate::errors::{Result, YazarError};
use crate::label::LabelIndex;
use crate::normalizer::Normalizer;
use crate::split::{partition, Partition, SplitConfig};
use crate::vectorizer::{FeatureSpace, FeatureSpaceBuilder, SparseVector};

/// Settings of a full training run.
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    pub features: FeatureSpaceBuilder,
    pub split: SplitConfig,
    pub classifier: Classifier,
}

/// The corpus has been normalized.
pub struct CorpusBuilt {
    corpus: Corpus,
    normalizer_id: u64,
}

impl CorpusBuilt {
    pub fn new(normalizer: &Normalizer, documents: &[Document]) -> Self {
        debug!(
            "ambiguity policy: {:?}, stopword stage: {:?}",
            normalizer.ambiguity_policy(),
            normalizer.stopword_filter_stage()
        );
        let corpus = Corpus::build(normalizer, documents);
        info!("# of documents: {}", corpus.len());
        Self {
            corpus,
            normalizer_id: normalizer.id(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Fits the label index and encodes every author.
    pub fn encode_labels(self) -> Result<LabelsEncoded> {
        let labels = LabelIndex::fit(self.corpus.authors())?;
        let ys = labels.encode_all(self.corpus.authors())?;
        info!("# of authors: {}", labels.len());
        Ok(LabelsEncoded {
            corpus: self.corpus,
            normalizer_id: self.normalizer_id,
            labels,
            ys,
        })
    }
}

/// Authors have been mapped to class ids.
pub struct LabelsEncoded {
    corpus: Corpus,
    normalizer_id: u64,
    labels: LabelIndex,
    ys: Vec<u32>,
}

impl LabelsEncoded {
    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    /// Fits the feature space on the whole corpus and vectorizes every document.
    pub fn fit_features(self, builder: &FeatureSpaceBuilder) -> Result<FeatureSpaceFitted> {
        let space = builder.fit(self.corpus.texts())?;
        let xs = space.transform_all(self.corpus.texts());
        info!("# of features: {}", space.dim());
        Ok(FeatureSpaceFitted {
            normalizer_id: self.normalizer_id,
            labels: self.labels,
            space,
            xs,
            ys: self.ys,
        })
    }
}

/// Every document has a feature vector.
pub struct FeatureSpaceFitted {
    normalizer_id: u64,
    labels: LabelIndex,
    space: FeatureSpace,
    xs: Vec<SparseVector>,
    ys: Vec<u32>,
}

impl FeatureSpaceFitted {
    pub fn space(&self) -> &FeatureSpace {
        &self.space
    }

    /// Partitions the examples into training and evaluation subsets.
    ///
    /// Classes missing from either subset are logged as warnings.
    pub fn split(self, config: &SplitConfig) -> Result<Split> {
        let partition = partition(&self.ys, config)?;
        info!(
            "# of training examples: {}, # of evaluation examples: {}",
            partition.train.len(),
            partition.eval.len()
        );
        for y in partition.starved_classes(&self.ys) {
            warn!(
                "author {:?} is missing from the training or evaluation subset",
                self.labels.decode(y)?
            );
        }
        Ok(Split {
            normalizer_id: self.normalizer_id,
            labels: self.labels,
            space: self.space,
            xs: self.xs,
            ys: self.ys,
            partition,
        })
    }
}

/// Examples have been partitioned.
pub struct Split {
    normalizer_id: u64,
    labels: LabelIndex,
    space: FeatureSpace,
    xs: Vec<SparseVector>,
    ys: Vec<u32>,
    partition: Partition,
}

impl Split {
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    fn subset(&self, indices: &[usize]) -> (Vec<SparseVector>, Vec<u32>) {
        indices
            .iter()
            .map(|&i| (self.xs[i].clone(), self.ys[i]))
            .unzip()
    }

    /// Trains the classifier on the training subset.
    ///
    /// # Errors
    ///
    /// [`YazarError::InsufficientClasses`](crate::errors::YazarError::InsufficientClasses) will
    /// be returned if the training subset has fewer than two authors.
    pub fn train(self, classifier: &Classifier) -> Result<ModelTrained> {
        let (train_xs, train_ys) = self.subset(&self.partition.train);
        let (eval_xs, eval_ys) = self.subset(&self.partition.eval);
        info!("Start training...");
        let model = classifier.fit(&train_xs, &train_ys)?;
        info!("Finish training.");
        Ok(ModelTrained {
            normalizer_id: self.normalizer_id,
            labels: self.labels,
            space: self.space,
            model,
            eval_xs,
            eval_ys,
        })
    }
}

/// The classifier has been trained.
pub struct ModelTrained {
    normalizer_id: u64,
    labels: LabelIndex,
    space: FeatureSpace,
    model: Model,
    eval_xs: Vec<SparseVector>,
    eval_ys: Vec<u32>,
}

impl ModelTrained {
    /// Scores the model on the evaluation subset.
    pub fn evaluate(self) -> Result<FittedPipeline> {
        let accuracy = self.model.score(&self.eval_xs, &self.eval_ys)?;
        info!("accuracy: {:.2}%", accuracy * 100.0);
        Ok(FittedPipeline {
            normalizer_id: self.normalizer_id,
            labels: self.labels,
            space: self.space,
            model: self.model,
            accuracy,
        })
    }
}

/// The label index, feature space, and model of one evaluated run.
pub struct FittedPipeline {
    normalizer_id: u64,
    labels: LabelIndex,
    space: FeatureSpace,
    model: Model,
    accuracy: f64,
}

impl FittedPipeline {
    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    pub fn space(&self) -> &FeatureSpace {
        &self.space
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Accuracy on the evaluation subset, in `[0, 1]`.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Predicts the author of an already normalized text.
    pub fn predict_normalized(&self, normalized: &str) -> Result<&str> {
        let x = self.space.transform(normalized);
        let class = self.model.predict(&x)?;
        self.labels.decode(class)
    }

    /// Predicts the author of a raw text.
    ///
    /// The result is always one of the training authors. An absent or empty text still gets a
    /// prediction.
    ///
    /// # Arguments
    ///
    /// * `normalizer` - The normalizer that built the training corpus.
    /// * `text` - Raw text.
    ///
    /// # Errors
    ///
    /// [`YazarError::InvalidArgument`] will be returned if `normalizer` has a different stopword
    /// set, ambiguity policy, or stopword stage than the one used for training.
    pub fn predict(&self, normalizer: &Normalizer, text: Option<&str>) -> Result<&str> {
        if normalizer.id() != self.normalizer_id {
            return Err(YazarError::invalid_argument(
                "normalizer",
                "settings differ from the normalizer used for training",
            ));
        }
        self.predict_normalized(&normalizer.normalize(text))
    }
}

/// Runs every stage of a training run.
///
/// # Arguments
///
/// * `normalizer` - Shared normalizer.
/// * `documents` - Labeled raw documents.
/// * `config` - Feature, split, and classifier settings.
///
/// # Returns
///
/// An evaluated pipeline ready to predict.
pub fn attribute(
    normalizer: &Normalizer,
    documents: &[Document],
    config: &PipelineConfig,
) -> Result<FittedPipeline> {
    CorpusBuilt::new(normalizer, documents)
        .encode_labels()?
        .fit_features(&config.features)?
        .split(&config.split)?
        .train(&config.classifier)?
        .evaluate()
}
