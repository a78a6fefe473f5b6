use crate::report::{FileResult, ScanReport};
use std::fmt;

/// Lifecycle of a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Enumerating,
    Dispatching,
    Collecting,
    Done,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Enumerating => "enumerating",
            ScanPhase::Dispatching => "dispatching",
            ScanPhase::Collecting => "collecting",
            ScanPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Trait for reporting scan progress.
///
/// Every method is invoked from the thread that called `scan`, never from a
/// worker, so implementations need no synchronization of their own.
/// All methods have default no-op implementations.
pub trait ProgressReporter {
    fn on_phase(&mut self, _phase: ScanPhase) {}
    fn on_walk_complete(&mut self, _total_files: usize, _duration_secs: f64) {}
    fn on_file_result(&mut self, _result: &FileResult) {}
    fn on_progress(&mut self, _done: usize, _total: usize) {}
    fn on_scan_complete(&mut self, _report: &ScanReport) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}

/// Reporter backed by a pair of closures.
pub struct FnReporter<P, F>
where
    P: FnMut(usize, usize),
    F: FnMut(&FileResult),
{
    on_progress: P,
    on_file_result: F,
}

impl<P, F> FnReporter<P, F>
where
    P: FnMut(usize, usize),
    F: FnMut(&FileResult),
{
    pub fn new(on_progress: P, on_file_result: F) -> Self {
        Self {
            on_progress,
            on_file_result,
        }
    }
}

impl<P, F> ProgressReporter for FnReporter<P, F>
where
    P: FnMut(usize, usize),
    F: FnMut(&FileResult),
{
    fn on_file_result(&mut self, result: &FileResult) {
        (self.on_file_result)(result);
    }

    fn on_progress(&mut self, done: usize, total: usize) {
        (self.on_progress)(done, total);
    }
}
