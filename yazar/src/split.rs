use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::errors::{Result, YazarError};

/// How examples are assigned to the evaluation subset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplitStrategy {
    /// A seeded shuffle of all examples. Rare classes may end up in only one subset.
    Shuffled,

    /// A seeded shuffle within each class, keeping every class in the training subset.
    Stratified,
}

impl Default for SplitStrategy {
    fn default() -> Self {
        Self::Shuffled
    }
}

impl FromStr for SplitStrategy {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shuffled" => Ok(Self::Shuffled),
            "stratified" => Ok(Self::Stratified),
            _ => Err("Could not parse a split strategy: {shuffled, stratified}"),
        }
    }
}

/// Settings of the train/evaluation partition.
#[derive(Clone, Debug)]
pub struct SplitConfig {
    pub test_ratio: f64,
    pub seed: u64,
    pub strategy: SplitStrategy,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
            strategy: SplitStrategy::default(),
        }
    }
}

/// Indices of the training and evaluation subsets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition {
    pub train: Vec<usize>,
    pub eval: Vec<usize>,
}

impl Partition {
    /// Classes that appear in `ys` but are missing from the training or the evaluation subset.
    pub fn starved_classes(&self, ys: &[u32]) -> Vec<u32> {
        let train: BTreeSet<u32> = self.train.iter().map(|&i| ys[i]).collect();
        let eval: BTreeSet<u32> = self.eval.iter().map(|&i| ys[i]).collect();
        ys.iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .filter(|y| !train.contains(y) || !eval.contains(y))
            .collect()
    }
}

/// Partitions example indices into training and evaluation subsets.
///
/// # Arguments
///
/// * `ys` - Class ids of all examples.
/// * `config` - Ratio, seed, and strategy.
///
/// # Returns
///
/// A partition. Both index lists are sorted.
///
/// # Errors
///
/// [`YazarError::InvalidArgument`] will be returned if `test_ratio` is not in `[0, 1)`.
pub fn partition(ys: &[u32], config: &SplitConfig) -> Result<Partition> {
    if !(0.0..1.0).contains(&config.test_ratio) {
        return Err(YazarError::invalid_argument(
            "test_ratio",
            format!("must be in [0, 1), got {}", config.test_ratio),
        ));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let (mut train, mut eval) = match config.strategy {
        SplitStrategy::Shuffled => {
            let mut indices: Vec<usize> = (0..ys.len()).collect();
            indices.shuffle(&mut rng);
            let n_eval = (ys.len() as f64 * config.test_ratio).ceil() as usize;
            let train = indices.split_off(n_eval);
            (train, indices)
        }
        SplitStrategy::Stratified => {
            // Uses BTreeMap so that classes are visited in a reproducible order.
            let mut groups: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
            for (i, &y) in ys.iter().enumerate() {
                groups.entry(y).or_default().push(i);
            }
            let mut train = vec![];
            let mut eval = vec![];
            for (_, mut indices) in groups {
                indices.shuffle(&mut rng);
                let n_eval = ((indices.len() as f64 * config.test_ratio).round() as usize)
                    .min(indices.len() - 1);
                train.extend_from_slice(&indices[n_eval..]);
                eval.extend_from_slice(&indices[..n_eval]);
            }
            (train, eval)
        }
    };
    train.sort_unstable();
    eval.sort_unstable();
    Ok(Partition { train, eval })
}
