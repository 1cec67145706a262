use std::io;
use std::path::PathBuf;

use harness_core::{EngineError, HarnessError, ImageError};
use netlist::DescriptionError;
use thiserror::Error;

/// Fatal errors that abort a suite run.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// The test-case directory could not be listed.
    #[error("cannot list test cases in {path}: {source}")]
    Discover {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A vector's image could not be loaded.
    #[error("test case {name}: {source}")]
    Image {
        /// Vector file name.
        name: String,
        /// Underlying load failure.
        #[source]
        source: ImageError,
    },
    /// The circuit description was rejected.
    #[error(transparent)]
    Description(#[from] DescriptionError),
    /// Native-rule registration or another engine call failed.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// A vector run hit a fatal harness error.
    #[error("test case {name}: {source}")]
    Vector {
        /// Vector file name.
        name: String,
        /// Underlying harness failure.
        #[source]
        source: HarnessError,
    },
    /// Progress output could not be written.
    #[error("cannot write progress output: {0}")]
    Output(#[source] io::Error),
}
