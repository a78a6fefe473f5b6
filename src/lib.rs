pub mod engine;
pub mod error;
pub mod extractor;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod validator;

pub use engine::{scan, ScanEngine, ScanOptions};
pub use error::Error;
pub use extractor::TextEncoding;
pub use progress::{FnReporter, ProgressReporter, ScanPhase, SilentReporter};
pub use report::{Candidate, FileError, FileOutcome, FileResult, ScanReport};
pub use validator::is_valid;
