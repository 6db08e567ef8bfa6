use crate::error::Result;
use crate::types::{SortOptions, DEFAULT_FILE_NAME_STRUCTURE, DEFAULT_FOLDER_STRUCTURE};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Persisted user preferences
///
/// Stored as TOML. Keys missing from the file take their default values.
///
/// ```toml
/// folder_structure = "{PatientID}/{StudyDate}"
/// file_name_structure = "{Modality}_{InstanceNumber}.dcm"
/// show_shortcuts = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub folder_structure: String,
    pub file_name_structure: String,
    pub show_shortcuts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder_structure: DEFAULT_FOLDER_STRUCTURE.to_string(),
            file_name_structure: DEFAULT_FILE_NAME_STRUCTURE.to_string(),
            show_shortcuts: false,
        }
    }
}

impl Settings {
    /// Loads settings, falling back to defaults when the file does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(toml::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Writes settings, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Sort options using these templates
    pub fn sort_options(&self) -> SortOptions {
        SortOptions::default()
            .with_folder_structure(self.folder_structure.clone())
            .with_file_name_structure(self.file_name_structure.clone())
    }
}
