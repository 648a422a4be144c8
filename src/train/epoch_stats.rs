use serde::{Serialize, Deserialize};

/// Per-epoch training statistics for one weak learner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean log-loss per processed sample.
    pub mean_loss: f64,
    /// Fraction of processed samples misclassified this epoch; this is the
    /// convergence signal.
    pub train_error: f64,
}
