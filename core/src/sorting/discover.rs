use crate::error::{DicomSortError, Result};
use crate::types::FileFilter;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Recursively collects candidate files under `source`
///
/// Entries are visited in file-name order so repeated runs over the same
/// tree process files in the same order. Symlinked files are included;
/// symlinked directories are not descended into. When `exclude` names an
/// existing directory inside the tree (typically the destination), it is
/// skipped. Unreadable entries are logged and skipped.
///
/// # Errors
///
/// Returns [`DicomSortError::InvalidSource`] if `source` is not a directory.
pub fn find_dicom_files(
    source: &Path,
    filter: &FileFilter,
    exclude: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        return Err(DicomSortError::InvalidSource(source.to_path_buf()));
    }

    let excluded = exclude.and_then(|p| p.canonicalize().ok());
    let is_excluded = |entry: &DirEntry| match &excluded {
        Some(dir) if entry.file_type().is_dir() && entry.depth() > 0 => entry
            .path()
            .canonicalize()
            .map(|p| &p == dir)
            .unwrap_or(false),
        _ => false,
    };

    let mut files = Vec::new();
    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e));

    for entry in walker {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() && filter.accepts(path) {
                    files.push(path.to_path_buf());
                }
            }
            Err(err) => {
                warn!("Error accessing path under {}: {}", source.display(), err);
            }
        }
    }

    debug!(
        "Found {} candidate files under {}",
        files.len(),
        source.display()
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn test_recursive_discovery_in_name_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let b = touch(root, "b/IM0002");
        let a2 = touch(root, "a/nested/IM0003.dcm");
        let a1 = touch(root, "a/IM0001");
        let top = touch(root, "c.dcm");

        let files = find_dicom_files(root, &FileFilter::All, None).unwrap();
        assert_eq!(files, vec![a1, a2, b, top]);
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("empty_sub")).unwrap();

        let files = find_dicom_files(temp_dir.path(), &FileFilter::All, None).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_filter_applied() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "file1.dcm");
        touch(root, "file2.DICOM");
        touch(root, "IM0001");
        touch(root, "notes.txt");
        touch(root, "sub/readme.md");

        let all = find_dicom_files(root, &FileFilter::All, None).unwrap();
        assert_eq!(all.len(), 5);

        let dicom = find_dicom_files(root, &FileFilter::DicomExtensions, None).unwrap();
        assert_eq!(dicom.len(), 3);

        let md = find_dicom_files(root, &FileFilter::extensions(["md"]), None).unwrap();
        assert_eq!(md, vec![root.join("sub/readme.md")]);
    }

    #[test]
    fn test_excluded_directory_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let kept = touch(root, "raw/IM0001");
        touch(root, "sorted/p1/ct_1.dcm");

        let files =
            find_dicom_files(root, &FileFilter::All, Some(&root.join("sorted"))).unwrap();
        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn test_missing_exclude_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        touch(root, "IM0001");

        let files =
            find_dicom_files(root, &FileFilter::All, Some(&root.join("not_created"))).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_invalid_source() {
        let temp_dir = TempDir::new().unwrap();
        let file = touch(temp_dir.path(), "IM0001");

        assert!(matches!(
            find_dicom_files(&file, &FileFilter::All, None),
            Err(DicomSortError::InvalidSource(_))
        ));
        assert!(matches!(
            find_dicom_files(&temp_dir.path().join("missing"), &FileFilter::All, None),
            Err(DicomSortError::InvalidSource(_))
        ));
    }
}
