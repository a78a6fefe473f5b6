use std::path::PathBuf;
use thiserror::Error;

/// Failures that prevent a scan from starting. Problems with individual
/// files are reported per file as [`crate::report::FileError`] instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not a readable directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Unable to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
