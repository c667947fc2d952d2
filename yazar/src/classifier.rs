use std::collections::BTreeSet;
use std::str::FromStr;

use liblinear::LibLinearModel;
use log::debug;

use crate::errors::{Result, YazarError};
use crate::vectorizer::SparseVector;

/// LIBLINEAR solver used to fit the per-author weights.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SolverType {
    /// Logistic regression with an L2 penalty, solved in the primal. The default.
    L2RegularizedLogistic = 0,

    /// Linear SVM with squared hinge loss and an L2 penalty, solved in the dual.
    L2RegularizedL2LossSVCDual = 1,

    /// Linear SVM with squared hinge loss and an L2 penalty, solved in the primal.
    L2RegularizedL2LossSVC = 2,

    /// Linear SVM with hinge loss and an L2 penalty, solved in the dual.
    L2RegularizedL1LossSVCDual = 3,

    /// Crammer-Singer multi-class SVM.
    CrammerSingerSVC = 4,

    /// Linear SVM with squared hinge loss and a sparsity-inducing L1 penalty.
    L1RegularizedL2LossSVC = 5,

    /// Logistic regression with a sparsity-inducing L1 penalty.
    L1RegularizedLogistic = 6,

    /// Logistic regression with an L2 penalty, solved in the dual.
    L2RegularizedLogisticDual = 7,
}

impl Default for SolverType {
    fn default() -> Self {
        Self::L2RegularizedLogistic
    }
}

impl FromStr for SolverType {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::L2RegularizedLogistic),
            "1" => Ok(Self::L2RegularizedL2LossSVCDual),
            "2" => Ok(Self::L2RegularizedL2LossSVC),
            "3" => Ok(Self::L2RegularizedL1LossSVCDual),
            "4" => Ok(Self::CrammerSingerSVC),
            "5" => Ok(Self::L1RegularizedL2LossSVC),
            "6" => Ok(Self::L1RegularizedLogistic),
            "7" => Ok(Self::L2RegularizedLogisticDual),
            _ => Err("Could not parse a solver type: {0, 1, 2, 3, 4, 5, 6, 7}"),
        }
    }
}

impl From<SolverType> for liblinear::SolverType {
    fn from(solver: SolverType) -> Self {
        match solver {
            SolverType::L2RegularizedLogistic => Self::L2R_LR,
            SolverType::L2RegularizedL2LossSVCDual => Self::L2R_L2LOSS_SVC_DUAL,
            SolverType::L2RegularizedL2LossSVC => Self::L2R_L2LOSS_SVC,
            SolverType::L2RegularizedL1LossSVCDual => Self::L2R_L1LOSS_SVC_DUAL,
            SolverType::CrammerSingerSVC => Self::MCSVM_CS,
            SolverType::L1RegularizedL2LossSVC => Self::L1R_L2LOSS_SVC,
            SolverType::L1RegularizedLogistic => Self::L1R_LR,
            SolverType::L2RegularizedLogisticDual => Self::L2R_LR_DUAL,
        }
    }
}

/// Trainer of the linear multi-class model.
///
/// # Examples
///
/// ```no_run
/// use yazar::{Classifier, FeatureSpaceBuilder, SolverType};
///
/// let texts = ["seçim kurul", "sinema film", "seçim oy", "film yönetmen"];
/// let space = FeatureSpaceBuilder::new().fit(&texts).unwrap();
/// let xs = space.transform_all(&texts);
/// let ys = [0, 1, 0, 1];
///
/// let model = Classifier::new(SolverType::L2RegularizedLogistic)
///     .fit(&xs, &ys)
///     .unwrap();
/// let class = model.predict(&space.transform("seçim")).unwrap();
/// assert_eq!(0, class);
/// ```
#[derive(Clone, Debug)]
pub struct Classifier {
    solver: SolverType,
    epsilon: f64,
    cost: f64,
    bias: f64,
}

impl Classifier {
    /// Creates a new trainer with tolerance `0.01`, cost `1.0`, and bias `1.0`.
    pub const fn new(solver: SolverType) -> Self {
        Self {
            solver,
            epsilon: 0.01,
            cost: 1.0,
            bias: 1.0,
        }
    }

    /// Sets the tolerance of the termination criterion.
    pub const fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the parameter C.
    pub const fn cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Trains a model.
    ///
    /// # Arguments
    ///
    /// * `xs` - Feature vectors, all from the same feature space.
    /// * `ys` - Class ids, parallel to `xs`.
    ///
    /// # Returns
    ///
    /// A trained model bound to the feature space of `xs`.
    ///
    /// # Errors
    ///
    /// * [`YazarError::InsufficientClasses`] if `ys` has fewer than two distinct classes.
    /// * [`YazarError::InvalidArgument`] if `xs` and `ys` differ in length.
    /// * [`YazarError::FeatureSpaceMismatch`] if `xs` come from different feature spaces.
    /// * [`YazarError::Training`] if LIBLINEAR rejects the problem.
    pub fn fit(&self, xs: &[SparseVector], ys: &[u32]) -> Result<Model> {
        if xs.len() != ys.len() {
            return Err(YazarError::invalid_argument(
                "ys",
                format!("expected {} labels, got {}", xs.len(), ys.len()),
            ));
        }
        let n_classes = ys.iter().collect::<BTreeSet<_>>().len();
        if n_classes < 2 {
            return Err(YazarError::insufficient_classes(n_classes));
        }
        let space_id = xs[0].space_id;
        let dim = xs[0].dim;
        if let Some(x) = xs.iter().find(|x| x.space_id != space_id) {
            return Err(YazarError::feature_space_mismatch(space_id, x.space_id));
        }

        let train_xs: Vec<Vec<(u32, f64)>> = xs
            .iter()
            .map(|x| x.entries.iter().map(|&(c, w)| (c + 1, w)).collect())
            .collect();
        let train_ys: Vec<f64> = ys.iter().map(|&y| f64::from(y)).collect();

        let mut builder = liblinear::Builder::new();
        let training_input = liblinear::util::TrainingInput::from_sparse_features(train_ys, train_xs)
            .map_err(|e| YazarError::training(format!("liblinear error: {e:?}")))?;
        builder.problem().input_data(training_input).bias(self.bias);
        builder
            .parameters()
            .solver_type(self.solver.into())
            .stopping_criterion(self.epsilon)
            .constraints_violation_cost(self.cost);
        liblinear::toggle_liblinear_stdout_output(false);
        let model = builder.build_model();
        liblinear::toggle_liblinear_stdout_output(true);
        let model = model.map_err(|e| YazarError::training(e.to_string()))?;

        let mut classes = vec![];
        let mut weights = vec![];
        let mut biases = vec![];
        for (i, &cls) in model.labels().iter().enumerate() {
            let label_idx = i32::try_from(i)?;
            let mut row = vec![0.0; dim];
            for (fid, w) in row.iter_mut().enumerate() {
                *w = model.feature_coefficient(i32::try_from(fid + 1)?, label_idx);
            }
            classes.push(u32::try_from(cls)?);
            weights.push(row);
            biases.push(model.label_bias(label_idx));
        }
        debug!(
            "trained {} classes over {} features with {} examples",
            classes.len(),
            dim,
            xs.len()
        );

        Ok(Model {
            classes,
            weights,
            biases,
            dim,
            space_id,
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(SolverType::default())
    }
}

/// Linear decision functions, one per class.
#[derive(Clone, Debug)]
pub struct Model {
    classes: Vec<u32>,
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    dim: usize,
    space_id: u64,
}

impl Model {
    /// Class ids known to the model, in solver order.
    pub fn classes(&self) -> &[u32] {
        &self.classes
    }

    /// Fingerprint of the feature space the model was trained on.
    pub fn space_id(&self) -> u64 {
        self.space_id
    }

    fn check(&self, x: &SparseVector) -> Result<()> {
        if x.space_id != self.space_id {
            return Err(YazarError::feature_space_mismatch(self.space_id, x.space_id));
        }
        Ok(())
    }

    /// Computes the decision value of every class.
    ///
    /// # Errors
    ///
    /// [`YazarError::FeatureSpaceMismatch`] will be returned if `x` comes from another feature
    /// space.
    pub fn decision_values(&self, x: &SparseVector) -> Result<Vec<f64>> {
        self.check(x)?;
        Ok(self
            .weights
            .iter()
            .zip(&self.biases)
            .map(|(row, &bias)| {
                x.entries
                    .iter()
                    .filter_map(|&(c, v)| row.get(c as usize).map(|w| w * v))
                    .sum::<f64>()
                    + bias
            })
            .collect())
    }

    /// Predicts the class of a vector.
    ///
    /// Ties are resolved in favor of the class that comes first in solver order.
    ///
    /// # Errors
    ///
    /// [`YazarError::FeatureSpaceMismatch`] will be returned if `x` comes from another feature
    /// space.
    pub fn predict(&self, x: &SparseVector) -> Result<u32> {
        let scores = self.decision_values(x)?;
        let mut best = 0;
        for (i, &score) in scores.iter().enumerate().skip(1) {
            if score > scores[best] {
                best = i;
            }
        }
        Ok(self.classes[best])
    }

    /// Computes the fraction of correct predictions.
    ///
    /// # Returns
    ///
    /// A value in `[0, 1]`. An empty subset scores `0`.
    ///
    /// # Errors
    ///
    /// * [`YazarError::InvalidArgument`] if `xs` and `ys` differ in length.
    /// * [`YazarError::FeatureSpaceMismatch`] if any vector comes from another feature space.
    pub fn score(&self, xs: &[SparseVector], ys: &[u32]) -> Result<f64> {
        if xs.len() != ys.len() {
            return Err(YazarError::invalid_argument(
                "ys",
                format!("expected {} labels, got {}", xs.len(), ys.len()),
            ));
        }
        if xs.is_empty() {
            return Ok(0.0);
        }
        let mut n_correct = 0;
        for (x, &y) in xs.iter().zip(ys) {
            if self.predict(x)? == y {
                n_correct += 1;
            }
        }
        Ok(n_correct as f64 / xs.len() as f64)
    }

    /// Number of columns of the feature space.
    pub fn dim(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::vectorizer::FeatureSpaceBuilder;

    fn dataset() -> (Vec<&'static str>, Vec<u32>) {
        (
            vec![
                "seçim kurul oy",
                "seçim sandık oy",
                "kurul seçim sonuç",
                "sinema film yönetmen",
                "film sahne oyuncu",
                "sinema oyuncu film",
                "kitap şiir roman",
                "roman yazar kitap",
                "şiir yazar dergi",
            ],
            vec![0, 0, 0, 1, 1, 1, 2, 2, 2],
        )
    }

    #[test]
    fn test_fit_predict() {
        let (texts, ys) = dataset();
        let space = FeatureSpaceBuilder::new().fit(&texts).unwrap();
        let xs = space.transform_all(&texts);
        let model = Classifier::default().fit(&xs, &ys).unwrap();
        assert_eq!(0, model.predict(&space.transform("seçim oy")).unwrap());
        assert_eq!(1, model.predict(&space.transform("film sinema")).unwrap());
        assert_eq!(2, model.predict(&space.transform("roman şiir")).unwrap());
        assert_eq!(1.0, model.score(&xs, &ys).unwrap());
        assert_eq!(space.dim(), model.dim());
    }

    #[test]
    fn test_parse_solver() {
        assert_eq!(Ok(SolverType::L2RegularizedLogistic), "0".parse());
        assert_eq!(Ok(SolverType::CrammerSingerSVC), "4".parse());
        assert!("8".parse::<SolverType>().is_err());
    }

    #[test]
    fn test_binary_fit() {
        let (texts, ys) = dataset();
        let space = FeatureSpaceBuilder::new().fit(&texts[..6]).unwrap();
        let xs = space.transform_all(&texts[..6]);
        let model = Classifier::default().fit(&xs, &ys[..6]).unwrap();
        assert_eq!(2, model.classes().len());
        assert_eq!(0, model.predict(&space.transform("kurul sandık")).unwrap());
        assert_eq!(1, model.predict(&space.transform("yönetmen sahne")).unwrap());
    }

    #[test]
    fn test_zero_vector_predicts_known_class() {
        let (texts, ys) = dataset();
        let space = FeatureSpaceBuilder::new().fit(&texts).unwrap();
        let xs = space.transform_all(&texts);
        let model = Classifier::default().fit(&xs, &ys).unwrap();
        let class = model.predict(&space.transform("")).unwrap();
        assert!(model.classes().contains(&class));
    }

    #[test]
    fn test_score_range() {
        let (texts, ys) = dataset();
        let space = FeatureSpaceBuilder::new().fit(&texts).unwrap();
        let xs = space.transform_all(&texts);
        let model = Classifier::default().fit(&xs, &ys).unwrap();
        let flipped: Vec<u32> = ys.iter().map(|&y| (y + 1) % 3).collect();
        let score = model.score(&xs, &flipped).unwrap();
        assert!((0.0..=1.0).contains(&score));
        assert_eq!(0.0, model.score(&[], &[]).unwrap());
    }

    #[test]
    fn test_insufficient_classes() {
        let (texts, _) = dataset();
        let space = FeatureSpaceBuilder::new().fit(&texts).unwrap();
        let xs = space.transform_all(&texts[..3]);
        assert!(matches!(
            Classifier::default().fit(&xs, &[0, 0, 0]),
            Err(YazarError::InsufficientClasses(_))
        ));
        assert!(matches!(
            Classifier::default().fit(&[], &[]),
            Err(YazarError::InsufficientClasses(_))
        ));
    }

    #[test]
    fn test_feature_space_mismatch() {
        let (texts, ys) = dataset();
        let space = FeatureSpaceBuilder::new().fit(&texts).unwrap();
        let xs = space.transform_all(&texts);
        let model = Classifier::default().fit(&xs, &ys).unwrap();
        let other = FeatureSpaceBuilder::new().fit(&["seçim"]).unwrap();
        assert!(matches!(
            model.predict(&other.transform("seçim")),
            Err(YazarError::FeatureSpaceMismatch(_))
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let (texts, _) = dataset();
        let space = FeatureSpaceBuilder::new().fit(&texts).unwrap();
        let xs = space.transform_all(&texts);
        assert!(matches!(
            Classifier::default().fit(&xs, &[0, 1]),
            Err(YazarError::InvalidArgument(_))
        ));
    }
}
