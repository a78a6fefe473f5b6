use colored::*;
use cpf_scan::{FileResult, ProgressReporter, ScanPhase, ScanReport};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const STEADY_TICK: Duration = Duration::from_millis(80);

/// CLI progress reporter using indicatif progress bars.
///
/// - Enumeration: spinner (total unknown until the walk finishes)
/// - Collection: progress bar over the enumerated files, with one printed
///   line per candidate above it
pub struct CliReporter {
    bar: Option<ProgressBar>,
    print_candidates: bool,
}

impl CliReporter {
    pub fn new(print_candidates: bool) -> Self {
        Self {
            bar: None,
            print_candidates,
        }
    }

    fn set_bar(&mut self, pb: ProgressBar) {
        if let Some(old) = self.bar.replace(pb) {
            old.finish_and_clear();
        }
    }

    fn finish_bar(&mut self) {
        if let Some(pb) = self.bar.take() {
            pb.finish_and_clear();
        }
    }

    fn println(&self, line: String) {
        match &self.bar {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_phase(&mut self, phase: ScanPhase) {
        if phase == ScanPhase::Enumerating {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_chars(TICK_CHARS),
            );
            pb.set_message("Enumerating files...");
            pb.enable_steady_tick(STEADY_TICK);
            self.set_bar(pb);
        }
    }

    fn on_walk_complete(&mut self, total_files: usize, duration_secs: f64) {
        self.finish_bar();
        eprintln!(
            "  {} Enumeration complete: {} files in {:.2}s",
            "✓".green(),
            total_files,
            duration_secs
        );

        let pb = ProgressBar::new(total_files as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "  {spinner:.cyan} Scanning [{bar:30.cyan/dim}] {pos}/{len} files ({eta} remaining) {wide_msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("━╸─")
            .tick_chars(TICK_CHARS),
        );
        pb.enable_steady_tick(STEADY_TICK);
        self.set_bar(pb);
    }

    fn on_file_result(&mut self, result: &FileResult) {
        if let Some(pb) = &self.bar {
            pb.set_message(result.path.display().to_string());
        }

        if let Some(err) = result.error() {
            self.println(format!(
                "{} {}: {}",
                "!".yellow(),
                result.path.display(),
                err
            ));
            return;
        }

        if !self.print_candidates {
            return;
        }
        for (path, matched, valid) in result.entries() {
            let status = if valid { "valid".green() } else { "invalid".red() };
            self.println(format!(
                "File: {} - CPF found: {} - {}",
                path.display(),
                matched,
                status
            ));
        }
    }

    fn on_progress(&mut self, done: usize, _total: usize) {
        if let Some(pb) = &self.bar {
            pb.set_position(done as u64);
        }
    }

    fn on_scan_complete(&mut self, report: &ScanReport) {
        self.finish_bar();
        eprintln!(
            "  {} Scan complete: {} files, {} candidates in {:.2}s",
            "✓".green(),
            report.completed,
            report.candidate_count(),
            report.scan_duration.as_secs_f64()
        );
    }
}
