use crate::error::{DicomSortError, Result};
use crate::extraction::tags::{get_string_value, SOP_CLASS_UID, SOP_INSTANCE_UID};
use dicom::transfer_syntax::entries::IMPLICIT_VR_LITTLE_ENDIAN;
use dicom_dictionary_std::uids;
use dicom_object::file::ReadPreamble;
use dicom_object::{DefaultDicomObject, FileMetaTableBuilder, InMemDicomObject, OpenFileOptions};
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Reads a DICOM file in permissive mode
///
/// # Algorithm
///
/// 1. Open as a regular DICOM file, with or without the 128-byte preamble
/// 2. Fall back to a bare implicit VR little endian data set without file
///    meta group, as written by some older modalities
/// 3. The fallback only counts as a success when the data set carries a SOP
///    Class UID and a SOP Instance UID; the file meta group is synthesized
///    from them
///
/// # Errors
///
/// Returns [`DicomSortError::UnreadableFile`] if neither attempt succeeds.
pub fn read_dicom_file(path: &Path) -> Result<DefaultDicomObject> {
    let open_error = match OpenFileOptions::new()
        .read_preamble(ReadPreamble::Auto)
        .open_file(path)
    {
        Ok(obj) => return Ok(obj),
        Err(e) => e,
    };

    debug!(
        "{} is not a standard DICOM file ({}), trying bare data set",
        path.display(),
        open_error
    );

    read_bare_dataset(path).map_err(|fallback| DicomSortError::UnreadableFile {
        path: path.to_path_buf(),
        reason: format!("{}; as bare data set: {}", open_error, fallback),
    })
}

/// Reads a data set that has no preamble and no file meta group
fn read_bare_dataset(path: &Path) -> std::result::Result<DefaultDicomObject, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let dataset = InMemDicomObject::read_dataset_with_ts(
        BufReader::new(file),
        &IMPLICIT_VR_LITTLE_ENDIAN.erased(),
    )
    .map_err(|e| e.to_string())?;

    let sop_class_uid =
        get_string_value(&dataset, SOP_CLASS_UID).ok_or("no SOP Class UID found")?;
    let sop_instance_uid =
        get_string_value(&dataset, SOP_INSTANCE_UID).ok_or("no SOP Instance UID found")?;

    dataset
        .with_meta(
            FileMetaTableBuilder::new()
                .media_storage_sop_class_uid(sop_class_uid)
                .media_storage_sop_instance_uid(sop_instance_uid)
                .transfer_syntax(uids::IMPLICIT_VR_LITTLE_ENDIAN),
        )
        .map_err(|e| e.to_string())
}
