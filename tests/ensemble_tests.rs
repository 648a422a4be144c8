//! End-to-end tests for the ensemble driver.
//!
//! These tests verify:
//! - Aggregated artifact shapes: (N · n_classes) rows, floor-batched columns
//! - Error-sequence lengths match the requested learner count
//! - Seeded runs reproduce identical reports and artifacts
//! - A zero-learner request is rejected without writing anything

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use stacking_dfa::data::archive::load_named_matrix;
use stacking_dfa::math::matrix::Matrix;
use stacking_dfa::{
    run_ensemble, ArtifactPaths, DatasetArchive, DatasetSplit, LearnerConfig,
};

/// Builds a synthetic split with standard-normal features and one-hot
/// labels derived from the argmax of the first `n_classes` feature rows.
fn synthetic_split(
    n_samples: usize,
    feature_dim: usize,
    n_classes: usize,
    rng: &mut StdRng,
) -> DatasetSplit {
    let features = Matrix::standard_normal(feature_dim, n_samples, rng);

    let mut labels = Matrix::zeros(n_classes, n_samples);
    for j in 0..n_samples {
        let mut best = 0;
        for i in 1..n_classes {
            if features.data[i][j] > features.data[best][j] {
                best = i;
            }
        }
        labels.data[best][j] = 1.0;
    }

    DatasetSplit::new(features, labels).unwrap()
}

fn synthetic_archive(
    n_train: usize,
    n_test: usize,
    feature_dim: usize,
    n_classes: usize,
    seed: u64,
) -> DatasetArchive {
    let mut rng = StdRng::seed_from_u64(seed);
    DatasetArchive {
        train: synthetic_split(n_train, feature_dim, n_classes, &mut rng),
        test: synthetic_split(n_test, feature_dim, n_classes, &mut rng),
    }
}

fn temp_paths(tag: &str) -> ArtifactPaths {
    let dir = std::env::temp_dir();
    ArtifactPaths {
        train_linouts: dir.join(format!("stacking_dfa_{}_train.json", tag)),
        test_linouts: dir.join(format!("stacking_dfa_{}_test.json", tag)),
    }
}

fn cleanup(paths: &ArtifactPaths) {
    let _ = std::fs::remove_file(&paths.train_linouts);
    let _ = std::fs::remove_file(&paths.test_linouts);
}

// ============================================================================
// END-TO-END SCENARIO
// ============================================================================

/// 1000 train samples, 784 features, 10 classes, batch_size 200, 3 weak
/// learners: the aggregated artifacts must have exactly 30 rows and
/// floor(split_size / 200) * 200 columns, and both error sequences must
/// have length 3.
#[test]
fn three_learner_run_produces_correctly_shaped_artifacts() {
    let archive = synthetic_archive(1000, 500, 784, 10, 42);
    let paths = temp_paths("e2e");

    // The reference hidden width (800) only affects cost here, not any
    // asserted shape, so a narrow hidden layer keeps the test fast.
    let config = LearnerConfig {
        hidden_size: 8,
        batch_size: 200,
        ..LearnerConfig::default()
    };

    let mut rng = StdRng::seed_from_u64(1234);
    let report = run_ensemble(&archive, 3, &config, &paths, &mut rng).unwrap();

    assert_eq!(report.training_errors.len(), 3);
    assert_eq!(report.testing_errors.len(), 3);
    for &e in report.training_errors.iter().chain(report.testing_errors.iter()) {
        assert!((0.0..=1.0).contains(&e), "error rate {} outside [0, 1]", e);
    }

    let train_artifact = load_named_matrix(&paths.train_linouts).unwrap();
    assert_eq!(train_artifact.name, "train_linear_outputs");
    assert_eq!(train_artifact.matrix.rows, 30); // 3 learners × 10 classes
    assert_eq!(train_artifact.matrix.cols, 1000); // floor(1000/200) * 200

    let test_artifact = load_named_matrix(&paths.test_linouts).unwrap();
    assert_eq!(test_artifact.name, "test_linear_outputs");
    assert_eq!(test_artifact.matrix.rows, 30);
    assert_eq!(test_artifact.matrix.cols, 400); // floor(500/200) * 200

    cleanup(&paths);
}

// ============================================================================
// DETERMINISM
// ============================================================================

/// Two runs from the same seed must produce identical error sequences and
/// bit-identical aggregated matrices.
#[test]
fn seeded_runs_are_bit_identical() {
    let archive = synthetic_archive(100, 100, 20, 4, 7);
    let config = LearnerConfig {
        hidden_size: 8,
        batch_size: 25,
        ..LearnerConfig::default()
    };

    let paths_a = temp_paths("det_a");
    let mut rng_a = StdRng::seed_from_u64(555);
    let report_a = run_ensemble(&archive, 2, &config, &paths_a, &mut rng_a).unwrap();

    let paths_b = temp_paths("det_b");
    let mut rng_b = StdRng::seed_from_u64(555);
    let report_b = run_ensemble(&archive, 2, &config, &paths_b, &mut rng_b).unwrap();

    assert_eq!(report_a.training_errors, report_b.training_errors);
    assert_eq!(report_a.testing_errors, report_b.testing_errors);

    let train_a = load_named_matrix(&paths_a.train_linouts).unwrap();
    let train_b = load_named_matrix(&paths_b.train_linouts).unwrap();
    assert_eq!(train_a.matrix, train_b.matrix);

    let test_a = load_named_matrix(&paths_a.test_linouts).unwrap();
    let test_b = load_named_matrix(&paths_b.test_linouts).unwrap();
    assert_eq!(test_a.matrix, test_b.matrix);

    cleanup(&paths_a);
    cleanup(&paths_b);
}

// ============================================================================
// FAILURE BEHAVIOR
// ============================================================================

/// Requesting zero learners fails before any artifact is written.
#[test]
fn zero_learners_is_rejected_without_artifacts() {
    let archive = synthetic_archive(50, 50, 10, 3, 3);
    let paths = temp_paths("zero");
    cleanup(&paths);

    let config = LearnerConfig {
        hidden_size: 4,
        batch_size: 10,
        ..LearnerConfig::default()
    };

    let mut rng = StdRng::seed_from_u64(1);
    let result = run_ensemble(&archive, 0, &config, &paths, &mut rng);

    assert!(result.is_err());
    assert!(!paths.train_linouts.exists());
    assert!(!paths.test_linouts.exists());
}
