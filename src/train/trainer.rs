use rand::Rng;

use crate::data::dataset::DatasetSplit;
use crate::dfa::learner::WeakLearner;
use crate::math::matrix::Matrix;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::LearnerConfig;

/// Small epsilon added inside log() to prevent log(0) = -inf.
const EPS: f64 = 1e-12;

/// Result of one weak-learner training run.
pub struct TrainedLearner {
    pub learner: WeakLearner,
    /// Training error of the epoch at which the run stopped.
    pub train_error: f64,
    /// One entry per completed epoch; shorter than the epoch budget when
    /// the convergence check fired early.
    pub epochs: Vec<EpochStats>,
}

/// Trains one weak learner on `split` with DFA mini-batch updates.
///
/// Each epoch draws a fresh random column permutation and applies it to a
/// copy of the split (the caller's split is never mutated), then walks
/// `floor(n_samples / batch_size)` full batches; trailing samples that do
/// not fill a batch are dropped. Training stops early once the training
/// error moves by at most `config.tolerance` between consecutive epochs.
///
/// Prints one progress line per epoch.
///
/// # Panics
/// Panics if `batch_size == 0`, `n_epochs == 0`, or the split holds fewer
/// samples than one batch.
pub fn train_weak_learner<R: Rng>(
    split: &DatasetSplit,
    config: &LearnerConfig,
    rng: &mut R,
) -> TrainedLearner {
    assert!(config.batch_size > 0, "batch_size must be at least 1");
    assert!(config.n_epochs > 0, "n_epochs must be at least 1");
    assert!(
        split.n_samples() >= config.batch_size,
        "split holds {} samples, fewer than one batch of {}",
        split.n_samples(),
        config.batch_size
    );

    let mut learner = WeakLearner::new(
        split.feature_dim(),
        config.hidden_size,
        split.n_classes(),
        rng,
    );

    let n_batches = split.n_samples() / config.batch_size;
    let samples_per_epoch = n_batches * config.batch_size;

    let mut epochs = Vec::new();
    let mut prev_train_error = 0.0;
    let mut train_error = 0.0;

    for epoch in 1..=config.n_epochs {
        let shuffled = split.shuffled(rng);

        let mut total_loss = 0.0;
        let mut misclassified = 0usize;

        for batch in 0..n_batches {
            let start = batch * config.batch_size;
            let end = start + config.batch_size;
            let samples = shuffled.features.columns(start, end);
            let targets = shuffled.labels.columns(start, end);

            let fwd = learner.forward(&samples);
            let error = fwd.y_hat.clone() - targets.clone();

            misclassified += count_disagreements(&fwd.y_hat, &targets);
            total_loss += log_loss(&fwd.y_hat, &targets);

            let grads = learner.dfa_backward(&error, &fwd, &samples);
            learner.apply_gradients(&grads, config.learning_rate);
        }

        train_error = misclassified as f64 / samples_per_epoch as f64;
        let mean_loss = total_loss / samples_per_epoch as f64;

        println!(
            "  epoch {:>3}  loss {:>12.6}  train error {:.4}",
            epoch, mean_loss, train_error
        );
        epochs.push(EpochStats { epoch, mean_loss, train_error });

        if (train_error - prev_train_error).abs() <= config.tolerance {
            break;
        }
        prev_train_error = train_error;
    }

    TrainedLearner { learner, train_error, epochs }
}

/// Re-runs the forward pass over `features` in fixed-size batches and
/// stitches the pre-sigmoid outputs (`a2`) back together along the sample
/// axis. Trailing samples that do not fill a batch are dropped, same policy
/// as training. Pure; parameters are not touched.
pub fn compute_linear_outputs(
    learner: &WeakLearner,
    features: &Matrix,
    batch_size: usize,
) -> Matrix {
    assert!(batch_size > 0, "batch_size must be at least 1");
    let n_batches = features.cols / batch_size;
    assert!(n_batches > 0, "split holds fewer samples than one batch");

    let blocks: Vec<Matrix> = (0..n_batches)
        .map(|batch| {
            let start = batch * batch_size;
            let samples = features.columns(start, start + batch_size);
            learner.forward(&samples).a2
        })
        .collect();

    Matrix::hstack(&blocks)
}

/// Misclassification rate of `learner` on a labeled split: argmax of the
/// sigmoid outputs against argmax of the one-hot labels, over the whole
/// split in one forward pass. Pure.
pub fn evaluate(learner: &WeakLearner, split: &DatasetSplit) -> f64 {
    let fwd = learner.forward(&split.features);
    let disagreements = count_disagreements(&fwd.y_hat, &split.labels);
    disagreements as f64 / split.n_samples() as f64
}

/// Number of columns whose predicted class (argmax of `outputs`) differs
/// from the labeled class (argmax of `targets`).
fn count_disagreements(outputs: &Matrix, targets: &Matrix) -> usize {
    outputs.argmax_cols().iter()
        .zip(targets.argmax_cols().iter())
        .filter(|(pred, truth)| pred != truth)
        .count()
}

/// Summed binary cross-entropy of a batch of sigmoid outputs against
/// one-hot targets:
///   L = -sum(t * ln(p + eps) + (1 - t) * ln(1 - p + eps))
fn log_loss(outputs: &Matrix, targets: &Matrix) -> f64 {
    outputs.data.iter().zip(targets.data.iter())
        .flat_map(|(out_row, target_row)| out_row.iter().zip(target_row.iter()))
        .map(|(&p, &t)| -(t * (p + EPS).ln() + (1.0 - t) * (1.0 - p + EPS).ln()))
        .sum()
}
