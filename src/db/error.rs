use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while reading or writing the inventory file. Every variant
/// carries the path so the message shown to the user names the file at fault.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not check whether {} exists", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not open inventory file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("{} is not a readable inventory file", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("{} uses inventory format version {found}, expected {expected}", path.display())]
    UnsupportedVersion {
        path: PathBuf,
        found: i64,
        expected: i64,
    },
    #[error("failed to write inventory to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to replace {}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
