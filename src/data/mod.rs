pub mod dataset;
pub mod archive;

pub use dataset::{DatasetSplit, SplitKind};
pub use archive::{DatasetArchive, NamedMatrix, save_named_matrix, load_named_matrix};
