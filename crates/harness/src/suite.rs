//! Test-vector discovery.
//!
//! A suite is a flat directory. Every regular file is an instruction image
//! except files with the `data` extension, which hold the data image of the
//! vector sharing their stem. A vector without a data file starts from an
//! all-zero data memory.

use std::fs;
use std::path::{Path, PathBuf};

use harness_core::{ImageError, MemoryImage, VectorImages, DEFAULT_EXCLUDED_VECTOR};
use tracing::{debug, warn};

use crate::error::SuiteError;

/// Extension of data-memory images.
pub const DATA_EXTENSION: &str = "data";

/// One discovered test vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    /// File name of the instruction image, used in reports.
    pub name: String,
    /// Instruction image path.
    pub instructions: PathBuf,
    /// Paired data image path; may not exist.
    pub data: PathBuf,
}

impl TestVector {
    /// Pairs an instruction image with its data image.
    #[must_use]
    pub fn new(instructions: PathBuf) -> Self {
        let name = instructions
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let data = instructions.with_extension(DATA_EXTENSION);
        Self {
            name,
            instructions,
            data,
        }
    }

    /// Loads both images into fresh memories.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Image`] when the instruction image is missing or
    /// either image is malformed.
    pub fn load(&self) -> Result<VectorImages, SuiteError> {
        let image_error = |source: ImageError| SuiteError::Image {
            name: self.name.clone(),
            source,
        };

        let instructions = MemoryImage::from_path(&self.instructions).map_err(image_error)?;
        let data = if self.data.is_file() {
            MemoryImage::from_path(&self.data).map_err(image_error)?
        } else {
            warn!(vector = %self.name, "no data image, starting from zeroed memory");
            MemoryImage::default()
        };
        Ok(VectorImages { instructions, data })
    }
}

/// Lists the vectors in `dir`, sorted by file name.
///
/// [`DEFAULT_EXCLUDED_VECTOR`] and any file named in `exclude` are skipped.
///
/// # Errors
///
/// Returns [`SuiteError::Discover`] when the directory cannot be read.
pub fn discover(dir: &Path, exclude: &[String]) -> Result<Vec<TestVector>, SuiteError> {
    let discover_error = |source| SuiteError::Discover {
        path: dir.to_path_buf(),
        source,
    };

    let mut vectors = Vec::new();
    for entry in fs::read_dir(dir).map_err(discover_error)? {
        let path = entry.map_err(discover_error)?.path();
        if !path.is_file() || path.extension().is_some_and(|ext| ext == DATA_EXTENSION) {
            continue;
        }
        let vector = TestVector::new(path);
        if vector.name == DEFAULT_EXCLUDED_VECTOR || exclude.contains(&vector.name) {
            debug!(vector = %vector.name, "excluded");
            continue;
        }
        vectors.push(vector);
    }

    vectors.sort_by(|a, b| a.name.cmp(&b.name));
    debug!(count = vectors.len(), dir = %dir.display(), "vectors discovered");
    Ok(vectors)
}
