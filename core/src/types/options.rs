use crate::types::FileFilter;

/// Default folder template
pub const DEFAULT_FOLDER_STRUCTURE: &str =
    "{PatientID}/{StudyDate}/{KVP}/{SliceThickness}/{ConvolutionKernel}";

/// Default file name template
pub const DEFAULT_FILE_NAME_STRUCTURE: &str =
    "{Modality}_{InstanceNumber}_{KVP}_{SliceThickness}_{ConvolutionKernel}.dcm";

/// Options for a sorting run
///
/// # Example
///
/// ```
/// use dicomsort_core::{FileFilter, SortOptions};
///
/// let options = SortOptions::default()
///     .with_folder_structure("{PatientID}/{Modality}")
///     .with_filter(FileFilter::DicomExtensions)
///     .decompress(false);
///
/// assert_eq!(options.folder_structure, "{PatientID}/{Modality}");
/// assert!(!options.decompress);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOptions {
    /// Template for the directory part of each destination path
    pub folder_structure: String,

    /// Template for the file name
    pub file_name_structure: String,

    /// Candidate file filter applied during discovery
    pub filter: FileFilter,

    /// Decompress compressed transfer syntaxes before writing
    pub decompress: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            folder_structure: DEFAULT_FOLDER_STRUCTURE.to_string(),
            file_name_structure: DEFAULT_FILE_NAME_STRUCTURE.to_string(),
            filter: FileFilter::All,
            decompress: true,
        }
    }
}

impl SortOptions {
    /// Builder: Set the folder template
    pub fn with_folder_structure(mut self, template: impl Into<String>) -> Self {
        self.folder_structure = template.into();
        self
    }

    /// Builder: Set the file name template
    pub fn with_file_name_structure(mut self, template: impl Into<String>) -> Self {
        self.file_name_structure = template.into();
        self
    }

    /// Builder: Set the candidate file filter
    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Builder: Enable or disable decompression
    pub fn decompress(mut self, decompress: bool) -> Self {
        self.decompress = decompress;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SortOptions::default();
        assert_eq!(options.folder_structure, DEFAULT_FOLDER_STRUCTURE);
        assert_eq!(options.file_name_structure, DEFAULT_FILE_NAME_STRUCTURE);
        assert_eq!(options.filter, FileFilter::All);
        assert!(options.decompress);
    }

    #[test]
    fn test_builder_chain() {
        let options = SortOptions::default()
            .with_file_name_structure("{InstanceNumber}.dcm")
            .with_filter(FileFilter::extensions(["ima"]))
            .decompress(false);

        assert_eq!(options.file_name_structure, "{InstanceNumber}.dcm");
        assert_eq!(options.folder_structure, DEFAULT_FOLDER_STRUCTURE);
        assert!(matches!(options.filter, FileFilter::Extensions(_)));
        assert!(!options.decompress);
    }
}
