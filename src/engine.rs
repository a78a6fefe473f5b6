use crate::error::Error;
use crate::extractor::{self, TextEncoding, DEFAULT_ENCODINGS};
use crate::progress::{FnReporter, ProgressReporter, ScanPhase};
use crate::report::{Candidate, FileError, FileResult, ScanReport};
use crate::scanner;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Instant;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Files at or above this size are not enumerated.
    pub max_file_size: u64,
    /// Decoding attempts, in order.
    pub encodings: Vec<TextEncoding>,
    /// Worker threads. 0 means one per available core.
    pub threads: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_file_size: scanner::MAX_FILE_SIZE,
            encodings: DEFAULT_ENCODINGS.to_vec(),
            threads: 0,
        }
    }
}

pub struct ScanEngine {
    options: ScanOptions,
    cancel_token: Arc<AtomicBool>,
}

enum Completion {
    Finished(FileResult),
    Skipped(PathBuf),
}

impl Default for ScanEngine {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

impl ScanEngine {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            cancel_token: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Setting the returned flag stops workers from picking up new files.
    /// Files already being read finish and are reported. Setting it while
    /// enumerating skips every file. The flag is cleared whenever a scan
    /// starts.
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_token)
    }

    /// Run the full pipeline over `root`:
    /// 1. Enumerate regular files under the size limit
    /// 2. Extract and validate candidates on the worker pool
    /// 3. Collect results in completion order on the calling thread
    pub fn scan(
        &self,
        root: &Path,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ScanReport, Error> {
        if !root.is_dir() || fs::read_dir(root).is_err() {
            return Err(Error::InvalidDirectory(root.to_path_buf()));
        }
        self.cancel_token.store(false, Ordering::SeqCst);

        info!("Scanning directory {}", root.display());
        reporter.on_phase(ScanPhase::Enumerating);
        let walk_start = Instant::now();
        let paths = scanner::walk(root, self.options.max_file_size);
        let walk_duration = walk_start.elapsed();
        debug!(
            "Enumeration completed in {:.2}s, {} files to scan",
            walk_duration.as_secs_f64(),
            paths.len()
        );
        reporter.on_walk_complete(paths.len(), walk_duration.as_secs_f64());

        let mut report = self.dispatch(paths, reporter)?;
        report.root = Some(root.to_path_buf());
        report.walk_duration = walk_duration;
        Ok(report)
    }

    /// Dispatch and collect over an already enumerated list of files.
    pub fn scan_paths(
        &self,
        paths: Vec<PathBuf>,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ScanReport, Error> {
        self.cancel_token.store(false, Ordering::SeqCst);
        self.dispatch(paths, reporter)
    }

    fn dispatch(
        &self,
        paths: Vec<PathBuf>,
        reporter: &mut dyn ProgressReporter,
    ) -> Result<ScanReport, Error> {
        let encodings = self.options.encodings.clone();
        self.run(paths, reporter, move |path: &Path| {
            extractor::extract_file(path, &encodings)
        })
    }

    fn run<F>(
        &self,
        paths: Vec<PathBuf>,
        reporter: &mut dyn ProgressReporter,
        extract: F,
    ) -> Result<ScanReport, Error>
    where
        F: Fn(&Path) -> Result<Vec<Candidate>, FileError> + Sync,
    {
        let total = paths.len();
        let mut report = ScanReport {
            total,
            ..ScanReport::default()
        };

        // Cancelled before anything was dispatched, e.g. during enumeration.
        if self.cancel_token.load(Ordering::SeqCst) {
            warn!("Scan cancelled before dispatch, {} files skipped", total);
            report.skipped = total;
            report.cancelled = true;
            reporter.on_phase(ScanPhase::Done);
            reporter.on_scan_complete(&report);
            return Ok(report);
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(self.options.threads)
            .thread_name(|i| format!("cpf-scan-worker-{}", i))
            .build()?;

        let scan_start = Instant::now();

        // Workers only send; the aggregate below is touched by this thread alone.
        let (tx, rx) = mpsc::channel::<Completion>();
        let pool = &pool;
        let extract = &extract;
        let cancel = &self.cancel_token;

        reporter.on_phase(ScanPhase::Dispatching);
        thread::scope(|s| {
            s.spawn(move || {
                pool.install(|| {
                    paths.into_par_iter().for_each_with(tx, |tx, path| {
                        let completion = if cancel.load(Ordering::Relaxed) {
                            Completion::Skipped(path)
                        } else {
                            let outcome = process_file(&path, extract);
                            Completion::Finished(FileResult::new(path, outcome))
                        };
                        // The receiver outlives every sender.
                        let _ = tx.send(completion);
                    });
                });
            });

            reporter.on_phase(ScanPhase::Collecting);
            for completion in rx {
                match completion {
                    Completion::Finished(result) => {
                        if let Some(err) = result.error() {
                            error!("Error processing file {}: {}", result.path.display(), err);
                        }
                        reporter.on_file_result(&result);
                        report.record(result);
                        reporter.on_progress(report.completed, total);
                    }
                    Completion::Skipped(path) => {
                        debug!("Skipped {} after cancellation", path.display());
                        report.skipped += 1;
                    }
                }
            }
        });

        report.cancelled = cancel.load(Ordering::SeqCst);
        report.scan_duration = scan_start.elapsed();

        if report.cancelled {
            warn!(
                "Scan cancelled: {} of {} files processed, {} skipped",
                report.completed, total, report.skipped
            );
        }
        info!(
            "Scanned {} files in {:.2}s: {} candidates, {} unique valid, {} failed",
            report.completed,
            report.scan_duration.as_secs_f64(),
            report.candidate_count(),
            report.valid.len(),
            report.failures().count(),
        );

        reporter.on_phase(ScanPhase::Done);
        reporter.on_scan_complete(&report);
        Ok(report)
    }
}

/// Scan `root` with default options, reporting through two callbacks.
///
/// Blocks until every file has been processed. Callers that need a responsive
/// thread should run this elsewhere.
pub fn scan<P, F>(root: &Path, on_progress: P, on_file_result: F) -> Result<ScanReport, Error>
where
    P: FnMut(usize, usize),
    F: FnMut(&FileResult),
{
    let mut reporter = FnReporter::new(on_progress, on_file_result);
    ScanEngine::default().scan(root, &mut reporter)
}

fn process_file<F>(path: &Path, extract: &F) -> Result<Vec<Candidate>, FileError>
where
    F: Fn(&Path) -> Result<Vec<Candidate>, FileError>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| extract(path))) {
        Ok(outcome) => outcome,
        Err(payload) => Err(FileError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
