use std::path::PathBuf;
use std::process;

use rand::SeedableRng;
use rand::rngs::StdRng;

use stacking_dfa::{run_ensemble, ArtifactPaths, DatasetArchive, LearnerConfig};

/// Fixed seed for the single process-wide random source, so repeated runs
/// on the same archive reproduce bit-identically.
const SEED: u64 = 1234;

const DATASET_PATH: &str = "mnist_dataset.json";
const TRAIN_LINOUTS_PATH: &str = "train_linouts.json";
const TEST_LINOUTS_PATH: &str = "test_linouts.json";

fn main() {
    let n_weak_learners = match parse_args() {
        Ok(n) => n,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: stacking-dfa <n_weak_learners>");
            process::exit(1);
        }
    };

    if let Err(message) = run(n_weak_learners) {
        eprintln!("error: {}", message);
        process::exit(1);
    }
}

/// Expects exactly one positional argument: the weak-learner count.
fn parse_args() -> Result<usize, String> {
    let mut args = std::env::args().skip(1);
    let raw = args.next().ok_or("missing argument: number of weak learners")?;
    if args.next().is_some() {
        return Err("expected exactly one argument".to_owned());
    }
    raw.parse::<usize>()
        .map_err(|_| format!("'{}' is not a valid learner count", raw))
}

fn run(n_weak_learners: usize) -> Result<(), String> {
    let archive = DatasetArchive::load(DATASET_PATH)?;
    println!(
        "loaded '{}': train {} samples, test {} samples, {} features, {} classes",
        DATASET_PATH,
        archive.train.n_samples(),
        archive.test.n_samples(),
        archive.train.feature_dim(),
        archive.train.n_classes()
    );

    let config = LearnerConfig::default();
    let paths = ArtifactPaths {
        train_linouts: PathBuf::from(TRAIN_LINOUTS_PATH),
        test_linouts: PathBuf::from(TEST_LINOUTS_PATH),
    };

    let mut rng = StdRng::seed_from_u64(SEED);
    let report = run_ensemble(&archive, n_weak_learners, &config, &paths, &mut rng)?;

    println!("TRAINING: {:?}", report.training_errors);
    println!("TESTING:  {:?}", report.testing_errors);
    println!(
        "linear outputs written to '{}' and '{}'",
        TRAIN_LINOUTS_PATH, TEST_LINOUTS_PATH
    );
    Ok(())
}
