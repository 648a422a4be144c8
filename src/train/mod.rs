pub mod trainer;
pub mod epoch_stats;
pub mod train_config;

pub use trainer::{train_weak_learner, compute_linear_outputs, evaluate, TrainedLearner};
pub use epoch_stats::EpochStats;
pub use train_config::LearnerConfig;
