use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// One fragment of file text that matched the identifier pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Text exactly as found on disk, punctuation included.
    pub matched: String,
    /// The 11 digits handed to the validator.
    pub digits: String,
    pub valid: bool,
}

/// Why a file produced no candidates.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("unable to read file: {0}")]
    Unreadable(#[from] io::Error),

    #[error("no configured encoding could decode the file contents")]
    Undecodable,

    #[error("worker panicked: {0}")]
    Panicked(String),
}

#[derive(Debug)]
pub enum FileOutcome {
    Scanned(Vec<Candidate>),
    Failed(FileError),
}

/// The result of processing a single enumerated file.
#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

impl FileResult {
    pub fn new(path: PathBuf, outcome: Result<Vec<Candidate>, FileError>) -> Self {
        let outcome = match outcome {
            Ok(candidates) => FileOutcome::Scanned(candidates),
            Err(err) => FileOutcome::Failed(err),
        };
        Self { path, outcome }
    }

    /// Candidates in the order they appear in the file. Empty for failures.
    pub fn candidates(&self) -> &[Candidate] {
        match &self.outcome {
            FileOutcome::Scanned(candidates) => candidates,
            FileOutcome::Failed(_) => &[],
        }
    }

    pub fn error(&self) -> Option<&FileError> {
        match &self.outcome {
            FileOutcome::Failed(err) => Some(err),
            FileOutcome::Scanned(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        self.error().is_some()
    }

    /// `(path, matched text, validity)` for every candidate.
    pub fn entries(&self) -> impl Iterator<Item = (&Path, &str, bool)> + '_ {
        self.candidates()
            .iter()
            .map(move |c| (self.path.as_path(), c.matched.as_str(), c.valid))
    }
}

/// Everything one scan produced.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub root: Option<PathBuf>,
    /// Per-file results in completion order.
    pub files: Vec<FileResult>,
    /// Unique valid identifiers, keyed on the text as found. A punctuated and
    /// a bare rendering of the same digits are two entries.
    pub valid: BTreeSet<String>,
    /// Files enumerated for this scan.
    pub total: usize,
    /// Files that produced a result, failed ones included.
    pub completed: usize,
    /// Files never read because the scan was cancelled.
    pub skipped: usize,
    pub cancelled: bool,
    pub walk_duration: Duration,
    pub scan_duration: Duration,
}

impl ScanReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileResult> {
        self.files.iter().filter(|f| f.is_failed())
    }

    pub fn candidate_count(&self) -> usize {
        self.files.iter().map(|f| f.candidates().len()).sum()
    }

    pub fn valid_candidate_count(&self) -> usize {
        self.files
            .iter()
            .flat_map(|f| f.candidates())
            .filter(|c| c.valid)
            .count()
    }

    /// Fold one completed file into the aggregate.
    pub(crate) fn record(&mut self, result: FileResult) {
        self.valid.extend(
            result
                .candidates()
                .iter()
                .filter(|c| c.valid)
                .map(|c| c.matched.clone()),
        );
        self.completed += 1;
        self.files.push(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(matched: &str, valid: bool) -> Candidate {
        Candidate {
            matched: matched.to_string(),
            digits: crate::validator::normalize(matched),
            valid,
        }
    }

    #[test]
    fn test_failed_result_has_no_candidates() {
        let result = FileResult::new(PathBuf::from("/tmp/x"), Err(FileError::Undecodable));
        assert!(result.is_failed());
        assert!(result.candidates().is_empty());
        assert_eq!(result.entries().count(), 0);
    }

    #[test]
    fn test_record_merges_only_valid_matches() {
        let mut report = ScanReport::default();
        report.record(FileResult::new(
            PathBuf::from("/a"),
            Ok(vec![
                candidate("111.444.777-35", true),
                candidate("11144477736", false),
            ]),
        ));
        report.record(FileResult::new(
            PathBuf::from("/b"),
            Ok(vec![
                candidate("111.444.777-35", true),
                candidate("11144477735", true),
            ]),
        ));

        assert_eq!(report.completed, 2);
        assert_eq!(report.candidate_count(), 4);
        assert_eq!(report.valid_candidate_count(), 3);
        let valid: Vec<&str> = report.valid.iter().map(|s| s.as_str()).collect();
        assert_eq!(valid, vec!["111.444.777-35", "11144477735"]);
    }

    #[test]
    fn test_entries_carry_path() {
        let result = FileResult::new(
            PathBuf::from("/docs/a.txt"),
            Ok(vec![candidate("11144477735", true)]),
        );
        let entries: Vec<_> = result.entries().collect();
        assert_eq!(entries, vec![(Path::new("/docs/a.txt"), "11144477735", true)]);
    }
}
