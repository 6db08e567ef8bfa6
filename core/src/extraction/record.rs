use crate::extraction::tags::get_string_value;
use crate::types::Field;
use dicom_object::{FileDicomObject, InMemDicomObject};
use std::collections::{BTreeMap, HashMap};

/// Named-field lookup over a metadata record
///
/// Returns `None` when the field is absent or empty; callers substitute the
/// "NA" sentinel themselves.
pub trait MetadataSource {
    fn lookup(&self, field: Field) -> Option<String>;
}

impl MetadataSource for InMemDicomObject {
    fn lookup(&self, field: Field) -> Option<String> {
        get_string_value(self, field.tag())
    }
}

impl MetadataSource for FileDicomObject<InMemDicomObject> {
    fn lookup(&self, field: Field) -> Option<String> {
        get_string_value(self, field.tag())
    }
}

impl MetadataSource for HashMap<Field, String> {
    fn lookup(&self, field: Field) -> Option<String> {
        self.get(&field).filter(|v| !v.is_empty()).cloned()
    }
}

impl MetadataSource for BTreeMap<Field, String> {
    fn lookup(&self, field: Field) -> Option<String> {
        self.get(&field).filter(|v| !v.is_empty()).cloned()
    }
}
