pub mod math;
pub mod data;
pub mod dfa;
pub mod train;
pub mod ensemble;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use data::dataset::{DatasetSplit, SplitKind};
pub use data::archive::DatasetArchive;
pub use dfa::learner::WeakLearner;
pub use train::train_config::LearnerConfig;
pub use train::trainer::train_weak_learner;
pub use ensemble::driver::{run_ensemble, ArtifactPaths, EnsembleReport};
