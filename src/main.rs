mod app_config;
mod cli;
mod logging;
mod reporter;

use anyhow::{bail, Context};
use app_config::AppConfig;
use clap::{CommandFactory, Parser};
use cli::{CheckArgs, Cli, Commands, ScanArgs};
use colored::*;
use cpf_scan::{validator, ScanEngine, ScanReport};
use dotenv::dotenv;
use reporter::CliReporter;
use std::path::Path;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = app_config::load_configuration().context("Error loading configuration")?;

    let args = Cli::parse();

    match args.command {
        Some(Commands::Scan(scan_args)) => run_scan(&config, scan_args)?,
        Some(Commands::Check(check_args)) => run_check(&check_args),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_scan(config: &AppConfig, args: ScanArgs) -> anyhow::Result<()> {
    let roots: Vec<String> = if args.roots.is_empty() {
        config.root_paths.clone()
    } else {
        args.roots
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect()
    };
    if roots.is_empty() {
        bail!("No directories to scan: pass one or set root_paths in Config.toml");
    }

    let mut options = config.scan_options();
    if let Some(threads) = args.threads {
        options.threads = threads;
    }
    let engine = ScanEngine::new(options);

    let mut failed_roots = 0;
    for root in app_config::non_overlapping_directories(roots) {
        let mut reporter = CliReporter::new(!args.summary_only);
        match engine.scan(Path::new(&root), &mut reporter) {
            Ok(report) => print_summary(&report),
            Err(err) => {
                error!("Error scanning {}: {}", root, err);
                failed_roots += 1;
            }
        }
    }

    if failed_roots > 0 {
        bail!("{} director(ies) could not be scanned", failed_roots);
    }
    Ok(())
}

fn print_summary(report: &ScanReport) {
    let root = report
        .root
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    println!();
    info!(
        "{}: {} files scanned, {} failed, {} candidates",
        root,
        format!("{}", report.completed).cyan(),
        format!("{}", report.failures().count()).yellow(),
        format!("{}", report.candidate_count()).cyan(),
    );
    println!(
        "Total valid CPFs found: {}",
        format!("{}", report.valid.len()).green()
    );
    println!("Valid CPFs:");
    for cpf in &report.valid {
        println!("{}", cpf);
    }
}

fn run_check(args: &CheckArgs) {
    for id in &args.ids {
        let digits = validator::normalize(id.trim());
        let display = validator::format(&digits).unwrap_or_else(|| id.clone());
        if validator::is_valid(&digits) {
            println!("{} - {}", display, "valid".green());
        } else {
            println!("{} - {}", display, "invalid".red());
        }
    }
}
