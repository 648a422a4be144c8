pub mod driver;

pub use driver::{run_ensemble, ArtifactPaths, EnsembleReport};
