use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// The two dataset splits this crate knows about. A closed enum instead of
/// a string key: an unknown split cannot be requested at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitKind {
    Train,
    Test,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitKind::Train => write!(f, "train"),
            SplitKind::Test => write!(f, "test"),
        }
    }
}

/// One labeled split: `features` is [feature_dim × n_samples], `labels` is
/// [n_classes × n_samples] one-hot. Samples are columns in both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSplit {
    pub features: Matrix,
    pub labels: Matrix,
}

impl DatasetSplit {
    /// Builds a split after checking that features and labels describe the
    /// same samples.
    pub fn new(features: Matrix, labels: Matrix) -> Result<DatasetSplit, String> {
        let split = DatasetSplit { features, labels };
        split.validate()?;
        Ok(split)
    }

    /// Shape checks shared by `new` and archive deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if self.features.cols == 0 {
            return Err("split has no samples".to_owned());
        }
        if self.features.cols != self.labels.cols {
            return Err(format!(
                "features carry {} samples but labels carry {} (samples are columns).",
                self.features.cols, self.labels.cols
            ));
        }
        if self.labels.rows < 2 {
            return Err(format!(
                "labels must have at least 2 class rows, got {}.",
                self.labels.rows
            ));
        }
        Ok(())
    }

    pub fn n_samples(&self) -> usize {
        self.features.cols
    }

    pub fn feature_dim(&self) -> usize {
        self.features.rows
    }

    pub fn n_classes(&self) -> usize {
        self.labels.rows
    }

    /// Returns a copy of this split with its sample columns reordered by a
    /// fresh random permutation, applied identically to features and labels
    /// so the pairing is preserved. The receiver is not mutated.
    pub fn shuffled<R: Rng>(&self, rng: &mut R) -> DatasetSplit {
        let mut perm: Vec<usize> = (0..self.n_samples()).collect();
        perm.shuffle(rng);

        DatasetSplit {
            features: self.features.permute_cols(&perm),
            labels: self.labels.permute_cols(&perm),
        }
    }
}
