use serde::{Serialize, Deserialize};

/// Hyperparameters for one weak-learner training run.
///
/// # Fields
/// - `hidden_size`   — width of the single tanh hidden layer
/// - `n_epochs`      — epoch budget; training may stop earlier on convergence
/// - `learning_rate` — step size for the gradient-ascent update
/// - `batch_size`    — samples per mini-batch; a trailing remainder smaller
///                     than one batch is silently dropped
/// - `tolerance`     — early-stop threshold on the absolute change in
///                     training error between consecutive epochs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerConfig {
    pub hidden_size: usize,
    pub n_epochs: usize,
    pub learning_rate: f64,
    pub batch_size: usize,
    pub tolerance: f64,
}

impl Default for LearnerConfig {
    /// Reference hyperparameters: 800 hidden units, 10-epoch budget,
    /// lr 1e-3, batches of 200, tolerance 1e-3.
    fn default() -> Self {
        LearnerConfig {
            hidden_size: 800,
            n_epochs: 10,
            learning_rate: 1e-3,
            batch_size: 200,
            tolerance: 1e-3,
        }
    }
}
