use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Identification Tags
pub const SOP_CLASS_UID: Tag = Tag(0x0008, 0x0016);
pub const SOP_INSTANCE_UID: Tag = Tag(0x0008, 0x0018);
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);

// Patient/Study Tags
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const MODALITY: Tag = Tag(0x0008, 0x0060);

// Description Tags
pub const STUDY_DESCRIPTION: Tag = Tag(0x0008, 0x1030);
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

// Acquisition Tags
pub const KVP: Tag = Tag(0x0018, 0x0060);
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
pub const CONVOLUTION_KERNEL: Tag = Tag(0x0018, 0x1210);

// Pixel Data
pub const PIXEL_DATA: Tag = Tag(0x7FE0, 0x0010);

/// Helper to get string value from DICOM tag
///
/// Multi-valued elements come back joined with `\`. Surrounding whitespace
/// and NUL padding are removed. Returns `None` if the tag is not present,
/// cannot be converted to string, or holds an empty value.
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| {
            s.trim_matches(|c: char| c.is_whitespace() || c == '\0')
                .to_string()
        })
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};

    #[test]
    fn test_tag_values() {
        assert_eq!(PATIENT_ID, Tag(0x0010, 0x0020));
        assert_eq!(STUDY_DATE, Tag(0x0008, 0x0020));
        assert_eq!(KVP, Tag(0x0018, 0x0060));
        assert_eq!(SLICE_THICKNESS, Tag(0x0018, 0x0050));
        assert_eq!(PIXEL_DATA, Tag(0x7FE0, 0x0010));
    }

    #[test]
    fn test_get_string_value_trims_padding() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            PATIENT_ID,
            VR::LO,
            PrimitiveValue::from(" P1 "),
        ));
        dcm.put(DataElement::new(
            SOP_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from("1.2.3\0"),
        ));

        assert_eq!(get_string_value(&dcm, PATIENT_ID), Some("P1".to_string()));
        assert_eq!(
            get_string_value(&dcm, SOP_INSTANCE_UID),
            Some("1.2.3".to_string())
        );
    }

    #[test]
    fn test_get_string_value_missing_or_empty() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(MODALITY, VR::CS, PrimitiveValue::from("")));

        assert_eq!(get_string_value(&dcm, MODALITY), None);
        assert_eq!(get_string_value(&dcm, KVP), None);
    }

    #[test]
    fn test_get_string_value_numeric() {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            INSTANCE_NUMBER,
            VR::IS,
            PrimitiveValue::from(3_i32),
        ));

        assert_eq!(get_string_value(&dcm, INSTANCE_NUMBER), Some("3".to_string()));
    }
}
