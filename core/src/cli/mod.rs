pub mod report;

use crate::settings::Settings;
use crate::types::{FileFilter, SortOptions};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for dicomsort
#[derive(Parser, Debug)]
#[command(name = "dicomsort")]
#[command(about = "Sort DICOM files into folders named after their metadata")]
#[command(version)]
pub struct Cli {
    /// Directory containing unsorted DICOM files
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory the sorted tree is written to
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Folder template, e.g. "{PatientID}/{StudyDate}"
    #[arg(long, value_name = "TEMPLATE")]
    pub folder_structure: Option<String>,

    /// File name template, e.g. "{Modality}_{InstanceNumber}.dcm"
    #[arg(long, value_name = "TEMPLATE")]
    pub file_structure: Option<String>,

    /// Which files to consider
    #[arg(long, default_value = "all")]
    pub filter: FilterArg,

    /// Only consider files with this extension (repeatable, overrides --filter)
    #[arg(short, long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Write compressed files as they are
    #[arg(long)]
    pub no_decompress: bool,

    /// Settings file holding default templates
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Store the effective templates in the settings file
    #[arg(long, requires = "settings")]
    pub save_settings: bool,

    /// Output format of the final report
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Candidate file filter options
#[derive(Debug, Clone, ValueEnum)]
pub enum FilterArg {
    /// Every regular file
    All,
    /// Files without extension or with .dcm / .dicom
    Dicom,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

impl Cli {
    /// Settings with command-line templates applied on top
    pub fn effective_settings(&self, mut settings: Settings) -> Settings {
        if let Some(folder) = &self.folder_structure {
            settings.folder_structure = folder.clone();
        }
        if let Some(file) = &self.file_structure {
            settings.file_name_structure = file.clone();
        }
        settings
    }

    /// Sort options for this invocation
    pub fn sort_options(&self, settings: &Settings) -> SortOptions {
        let filter = if !self.extensions.is_empty() {
            FileFilter::extensions(&self.extensions)
        } else {
            match self.filter {
                FilterArg::All => FileFilter::All,
                FilterArg::Dicom => FileFilter::DicomExtensions,
            }
        };

        settings
            .sort_options()
            .with_filter(filter)
            .decompress(!self.no_decompress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_FOLDER_STRUCTURE;

    #[test]
    fn test_minimal_arguments() {
        let cli = Cli::try_parse_from(["dicomsort", "in", "out"]).unwrap();
        let settings = cli.effective_settings(Settings::default());
        let options = cli.sort_options(&settings);

        assert_eq!(cli.source, PathBuf::from("in"));
        assert_eq!(cli.destination, PathBuf::from("out"));
        assert_eq!(options.folder_structure, DEFAULT_FOLDER_STRUCTURE);
        assert_eq!(options.filter, FileFilter::All);
        assert!(options.decompress);
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "dicomsort",
            "in",
            "out",
            "--folder-structure",
            "{Modality}",
            "--filter",
            "dicom",
            "--no-decompress",
        ])
        .unwrap();
        let settings = cli.effective_settings(Settings::default());
        let options = cli.sort_options(&settings);

        assert_eq!(settings.folder_structure, "{Modality}");
        assert_eq!(options.folder_structure, "{Modality}");
        assert_eq!(options.filter, FileFilter::DicomExtensions);
        assert!(!options.decompress);
    }

    #[test]
    fn test_extensions_override_filter() {
        let cli =
            Cli::try_parse_from(["dicomsort", "in", "out", "--filter", "dicom", "-e", "IMA", "-e", ".dcm"])
                .unwrap();
        let options = cli.sort_options(&Settings::default());
        assert_eq!(options.filter, FileFilter::extensions(["ima", "dcm"]));
    }

    #[test]
    fn test_save_settings_requires_file() {
        assert!(Cli::try_parse_from(["dicomsort", "in", "out", "--save-settings"]).is_err());
        assert!(Cli::try_parse_from([
            "dicomsort",
            "in",
            "out",
            "--save-settings",
            "--settings",
            "s.toml"
        ])
        .is_ok());
    }
}
