use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

/// Which files found under the source root are treated as candidates
///
/// Every candidate is handed to the DICOM reader; files that turn out not to
/// be DICOM are reported as unreadable, so a tighter filter mostly saves time
/// on messy folders.
///
/// # Example
///
/// ```
/// use dicomsort_core::FileFilter;
/// use std::path::Path;
///
/// let filter = FileFilter::DicomExtensions;
/// assert!(filter.accepts(Path::new("scan/IM0001")));
/// assert!(filter.accepts(Path::new("scan/slice.DCM")));
/// assert!(!filter.accepts(Path::new("scan/notes.txt")));
///
/// let custom = FileFilter::extensions([".IMA", "dcm"]);
/// assert!(custom.accepts(Path::new("a.ima")));
/// assert!(!custom.accepts(Path::new("IM0001")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum FileFilter {
    /// Every regular file
    #[default]
    All,

    /// Files without an extension, or with `.dcm` / `.dicom` (any case)
    DicomExtensions,

    /// Files whose lowercase extension (without the dot) is in the set
    Extensions(BTreeSet<String>),
}

impl FileFilter {
    /// Builds an allow-list filter
    ///
    /// Extensions are matched case-insensitively; a leading dot is optional.
    pub fn extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FileFilter::Extensions(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
                .collect(),
        )
    }

    /// Checks whether a path passes the filter
    pub fn accepts(&self, path: &Path) -> bool {
        let extension = path.extension().map(OsStr::to_string_lossy);
        match self {
            FileFilter::All => true,
            FileFilter::DicomExtensions => match extension {
                None => true,
                Some(ext) => ext.eq_ignore_ascii_case("dcm") || ext.eq_ignore_ascii_case("dicom"),
            },
            FileFilter::Extensions(allowed) => extension
                .map(|ext| allowed.contains(&ext.to_lowercase()))
                .unwrap_or(false),
        }
    }
}
