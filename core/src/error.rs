use std::path::PathBuf;
use thiserror::Error;

/// Result type for dicomsort operations
pub type Result<T> = std::result::Result<T, DicomSortError>;

/// Error types for dicomsort operations
///
/// The first three variants are per-file failures: the orchestrator records
/// them and keeps going. The rest are configuration errors that stop a run
/// before any file is touched.
#[derive(Error, Debug)]
pub enum DicomSortError {
    /// Source file could not be parsed as DICOM at all
    #[error("cannot read {}: {reason}", .path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    /// Payload claims a compressed transfer syntax but could not be decoded
    #[error("cannot decompress {}: {reason}", .path.display())]
    DecompressionFailure { path: PathBuf, reason: String },

    /// Destination directory or file could not be written
    #[error("cannot write {}: {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },

    /// Folder or file-name template is malformed
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Source root is missing or not a directory
    #[error("Invalid source directory: {}", .0.display())]
    InvalidSource(PathBuf),

    /// Destination root exists but is not a directory
    #[error("Invalid destination directory: {}", .0.display())]
    InvalidDestination(PathBuf),

    /// Settings file could not be parsed or serialized
    #[error("Settings error: {0}")]
    Settings(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DicomSortError {
    /// Whether this error concerns a single file and should not stop a run
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            DicomSortError::UnreadableFile { .. }
                | DicomSortError::DecompressionFailure { .. }
                | DicomSortError::WriteFailure { .. }
        )
    }
}

/// Errors raised while parsing a path template
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// Placeholder name is not one of the supported fields
    #[error("unsupported placeholder {{{name}}} in \"{template}\"")]
    UnknownPlaceholder { name: String, template: String },

    /// A `{` or `}` without its partner
    #[error("unbalanced brace at byte {position} in \"{template}\"")]
    UnbalancedBrace { position: usize, template: String },

    /// Rendered path would be absolute or climb out of the destination root
    #[error("template \"{0}\" escapes the destination directory")]
    EscapesRoot(String),

    /// File-name template renders to an empty name
    #[error("file name template \"{0}\" renders an empty file name")]
    EmptyFileName(String),
}

impl From<toml::de::Error> for DicomSortError {
    fn from(e: toml::de::Error) -> Self {
        DicomSortError::Settings(format!("{}", e))
    }
}

impl From<toml::ser::Error> for DicomSortError {
    fn from(e: toml::ser::Error) -> Self {
        DicomSortError::Settings(format!("{}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_classification() {
        let unreadable = DicomSortError::UnreadableFile {
            path: PathBuf::from("a.dcm"),
            reason: "bad".to_string(),
        };
        assert!(unreadable.is_per_file());

        let template = DicomSortError::from(TemplateError::EmptyFileName(String::new()));
        assert!(!template.is_per_file());
        assert!(!DicomSortError::InvalidSource(PathBuf::from("/nope")).is_per_file());
    }

    #[test]
    fn test_error_messages_carry_path() {
        let err = DicomSortError::WriteFailure {
            path: PathBuf::from("out/x.dcm"),
            reason: "permission denied".to_string(),
        };
        assert_eq!(err.to_string(), "cannot write out/x.dcm: permission denied");

        let err = TemplateError::UnknownPlaceholder {
            name: "Foo".to_string(),
            template: "{Foo}".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported placeholder {Foo} in \"{Foo}\"");
    }
}
