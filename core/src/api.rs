use crate::error::Result;
use crate::extraction::MetadataSource;
use crate::naming::PathRenderer;
use crate::sorting::DicomSorter;
use crate::types::{SortOptions, DEFAULT_FILE_NAME_STRUCTURE, DEFAULT_FOLDER_STRUCTURE};
use std::path::{Path, PathBuf};

/// Starts sorting `source` into `destination`
///
/// Validates the templates and both roots, scans the source tree, and
/// returns the progress iterator. Nothing is written until the iterator is
/// pulled.
///
/// # Example
///
/// ```no_run
/// use dicomsort_core::{sort_dicoms, SortOptions};
///
/// let sorter = sort_dicoms("incoming", "sorted", &SortOptions::default()).unwrap();
/// for progress in sorter {
///     println!("{}", progress);
/// }
/// ```
///
/// # Errors
///
/// Returns an error if a template is malformed, `source` is not a
/// directory, or `destination` exists and is not a directory.
pub fn sort_dicoms(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &SortOptions,
) -> Result<DicomSorter> {
    DicomSorter::new(source, destination, options)
}

/// Renders the destination path of a single record
///
/// `None` templates fall back to the defaults. Parses the templates on
/// every call; use [`PathRenderer`] directly when rendering many records.
///
/// # Example
///
/// ```
/// use dicomsort_core::render_path;
/// use dicom_object::InMemDicomObject;
/// use dicom_core::{DataElement, PrimitiveValue, VR, Tag};
/// use std::path::Path;
///
/// let mut dcm = InMemDicomObject::new_empty();
/// dcm.put(DataElement::new(
///     Tag(0x0010, 0x0020), // PatientID
///     VR::LO,
///     PrimitiveValue::from("P1"),
/// ));
/// dcm.put(DataElement::new(
///     Tag(0x0008, 0x0060), // Modality
///     VR::CS,
///     PrimitiveValue::from("CT"),
/// ));
///
/// let path = render_path(&dcm, Path::new("sorted"), Some("{PatientID}"), None).unwrap();
/// assert_eq!(path, Path::new("sorted/p1/ct_na_na_na_na.dcm"));
/// ```
///
/// # Errors
///
/// Returns an error if a template is malformed or the rendered path would
/// leave `destination`.
pub fn render_path<S>(
    record: &S,
    destination: &Path,
    folder_structure: Option<&str>,
    file_name_structure: Option<&str>,
) -> Result<PathBuf>
where
    S: MetadataSource + ?Sized,
{
    let renderer = PathRenderer::new(
        folder_structure.unwrap_or(DEFAULT_FOLDER_STRUCTURE),
        file_name_structure.unwrap_or(DEFAULT_FILE_NAME_STRUCTURE),
    )?;
    Ok(renderer.render(record, destination)?)
}
