use clap::Parser;
use dicomsort_core::cli::{Cli, OutputFormat};
use dicomsort_core::{DicomSorter, Settings, SortIssue, SortSummary, TextReport};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::Path;
use std::process;

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let loaded = match &cli.settings {
        Some(path) => match Settings::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let settings = cli.effective_settings(loaded);
    let options = cli.sort_options(&settings);

    let mut sorter = match DicomSorter::new(&cli.source, &cli.destination, &options) {
        Ok(sorter) => sorter,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Persist only templates that passed validation
    if cli.save_settings {
        if let Some(path) = &cli.settings {
            match settings.save(path) {
                Ok(()) => info!("Saved settings to {}", path.display()),
                Err(e) => error!("Failed to save settings to {}: {}", path.display(), e),
            }
        }
    }

    info!(
        "Sorting {} files from {} into {}",
        sorter.total(),
        cli.source.display(),
        cli.destination.display()
    );

    let show_progress = !cli.no_progress && matches!(cli.format, OutputFormat::Text);
    let pb = progress_bar(sorter.total(), show_progress);
    for progress in sorter.by_ref() {
        pb.set_position(progress.index as u64);
    }
    pb.finish_and_clear();

    let summary = sorter.summary();
    output_summary(cli.destination.as_path(), &summary, sorter.issues(), cli.format);
}

fn setup_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

fn progress_bar(total: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta})",
    )
    .map(|style| style.progress_chars("━╸ "))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

fn output_summary(
    destination: &Path,
    summary: &SortSummary,
    issues: &[SortIssue],
    format: OutputFormat,
) {
    match format {
        OutputFormat::Text => {
            let report = TextReport::new(destination, summary, issues);
            println!("{}", report);
        }
        OutputFormat::Json => {
            #[cfg(feature = "json")]
            {
                match output_json(destination, summary, issues) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        error!("Failed to serialize to JSON: {}", e);
                        eprintln!("Error: Failed to serialize to JSON: {}", e);
                        process::exit(1);
                    }
                }
            }
            #[cfg(not(feature = "json"))]
            {
                let _ = (destination, summary, issues);
                eprintln!("Error: JSON output requires the 'json' feature");
                eprintln!("Rebuild with: cargo build --features json");
                process::exit(1);
            }
        }
    }
}

#[cfg(feature = "json")]
fn output_json(
    destination: &Path,
    summary: &SortSummary,
    issues: &[SortIssue],
) -> Result<String, serde_json::Error> {
    use serde::Serialize;

    #[derive(Serialize)]
    struct ReportJson<'a> {
        destination: String,
        summary: &'a SortSummary,
        issues: Vec<IssueJson>,
    }

    #[derive(Serialize)]
    struct IssueJson {
        file_path: String,
        per_file: bool,
        message: String,
    }

    let report = ReportJson {
        destination: destination.display().to_string(),
        summary,
        issues: issues
            .iter()
            .map(|issue| IssueJson {
                file_path: issue.path.display().to_string(),
                per_file: issue.error.is_per_file(),
                message: issue.error.to_string(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&report)
}
