use std::path::PathBuf;

use rand::Rng;

use crate::data::archive::{DatasetArchive, save_named_matrix};
use crate::data::dataset::SplitKind;
use crate::math::matrix::Matrix;
use crate::train::train_config::LearnerConfig;
use crate::train::trainer::{compute_linear_outputs, evaluate, train_weak_learner};

/// Destination files for the two aggregated linear-output artifacts.
pub struct ArtifactPaths {
    pub train_linouts: PathBuf,
    pub test_linouts: PathBuf,
}

/// Per-learner error sequences returned by `run_ensemble`; index = learner
/// index, in training order.
#[derive(Debug, Clone)]
pub struct EnsembleReport {
    pub training_errors: Vec<f64>,
    pub testing_errors: Vec<f64>,
}

/// Trains `n_weak_learners` independent DFA weak learners and aggregates
/// their pre-sigmoid outputs.
///
/// Every learner is trained for exactly one epoch pass: the ensemble loop,
/// not the trainer's own epoch budget, is the source of iteration. Each
/// learner draws fresh parameters and a fresh feedback matrix from `rng`;
/// nothing is shared between learners except the read-only splits.
///
/// After the loop the per-learner [n_classes × n_samples] linear-output
/// blocks are stacked learner-over-learner into two
/// [(N·n_classes) × n_samples] matrices and written to `paths`. The writes
/// happen only once all learners finished, so a failed run leaves no
/// partial artifacts.
pub fn run_ensemble<R: Rng>(
    archive: &DatasetArchive,
    n_weak_learners: usize,
    config: &LearnerConfig,
    paths: &ArtifactPaths,
    rng: &mut R,
) -> Result<EnsembleReport, String> {
    if n_weak_learners == 0 {
        return Err("n_weak_learners must be at least 1".to_owned());
    }

    // One epoch per learner, regardless of the configured budget.
    let mut per_learner = config.clone();
    per_learner.n_epochs = 1;

    let train_split = archive.split(SplitKind::Train);
    let test_split = archive.split(SplitKind::Test);

    let mut training_errors = Vec::with_capacity(n_weak_learners);
    let mut testing_errors = Vec::with_capacity(n_weak_learners);
    let mut train_linouts = Vec::with_capacity(n_weak_learners);
    let mut test_linouts = Vec::with_capacity(n_weak_learners);

    for i in 1..=n_weak_learners {
        println!("weak learner #{}", i);

        let trained = train_weak_learner(train_split, &per_learner, rng);

        train_linouts.push(compute_linear_outputs(
            &trained.learner,
            &train_split.features,
            per_learner.batch_size,
        ));
        test_linouts.push(compute_linear_outputs(
            &trained.learner,
            &test_split.features,
            per_learner.batch_size,
        ));

        let test_error = evaluate(&trained.learner, test_split);
        println!("  test error of weak learner #{}: {:.4}", i, test_error);

        training_errors.push(trained.train_error);
        testing_errors.push(test_error);
    }

    let train_stack = Matrix::vstack(&train_linouts);
    let test_stack = Matrix::vstack(&test_linouts);

    save_named_matrix(&paths.train_linouts, "train_linear_outputs", &train_stack)?;
    save_named_matrix(&paths.test_linouts, "test_linear_outputs", &test_stack)?;

    Ok(EnsembleReport { training_errors, testing_errors })
}
