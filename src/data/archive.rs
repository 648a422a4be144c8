use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::data::dataset::{DatasetSplit, SplitKind};
use crate::math::matrix::Matrix;

/// On-disk dataset archive: both splits in one JSON document, features and
/// labels already oriented samples-as-columns and one-hot encoded. This
/// crate performs no preprocessing of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetArchive {
    pub train: DatasetSplit,
    pub test: DatasetSplit,
}

impl DatasetArchive {
    /// Loads and validates an archive. Fails fast on a missing file,
    /// malformed JSON, or inconsistent shapes.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DatasetArchive, String> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("cannot open dataset archive '{}': {}", path.display(), e))?;
        let reader = BufReader::new(file);

        let archive: DatasetArchive = serde_json::from_reader(reader)
            .map_err(|e| format!("malformed dataset archive '{}': {}", path.display(), e))?;

        archive.train.validate()
            .map_err(|e| format!("train split in '{}': {}", path.display(), e))?;
        archive.test.validate()
            .map_err(|e| format!("test split in '{}': {}", path.display(), e))?;

        if archive.train.feature_dim() != archive.test.feature_dim() {
            return Err(format!(
                "train and test splits disagree on feature_dim ({} vs {}).",
                archive.train.feature_dim(),
                archive.test.feature_dim()
            ));
        }
        if archive.train.n_classes() != archive.test.n_classes() {
            return Err(format!(
                "train and test splits disagree on n_classes ({} vs {}).",
                archive.train.n_classes(),
                archive.test.n_classes()
            ));
        }

        Ok(archive)
    }

    pub fn split(&self, kind: SplitKind) -> &DatasetSplit {
        match kind {
            SplitKind::Train => &self.train,
            SplitKind::Test => &self.test,
        }
    }
}

/// A single named dense matrix, the artifact format for aggregated
/// linear outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedMatrix {
    pub name: String,
    pub matrix: Matrix,
}

/// Writes one named matrix as a JSON artifact.
pub fn save_named_matrix<P: AsRef<Path>>(
    path: P,
    name: &str,
    matrix: &Matrix,
) -> Result<(), String> {
    let path = path.as_ref();
    let file = File::create(path)
        .map_err(|e| format!("cannot create artifact '{}': {}", path.display(), e))?;
    let writer = BufWriter::new(file);

    let artifact = NamedMatrix {
        name: name.to_owned(),
        matrix: matrix.clone(),
    };
    serde_json::to_writer(writer, &artifact)
        .map_err(|e| format!("cannot write artifact '{}': {}", path.display(), e))
}

/// Reads back an artifact written by `save_named_matrix`.
pub fn load_named_matrix<P: AsRef<Path>>(path: P) -> Result<NamedMatrix, String> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| format!("cannot open artifact '{}': {}", path.display(), e))?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader)
        .map_err(|e| format!("malformed artifact '{}': {}", path.display(), e))
}
