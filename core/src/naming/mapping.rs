use crate::extraction::MetadataSource;
use crate::naming::Sanitizer;
use crate::types::Field;

/// Sanitized value for every supported field
///
/// Built once per file. Absent fields hold the sanitized "NA" sentinel, so
/// every placeholder always resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    values: [String; Field::ALL.len()],
}

impl FieldMapping {
    /// Extracts and sanitizes all fields from a metadata source
    pub fn from_source<S>(source: &S, sanitizer: &Sanitizer) -> Self
    where
        S: MetadataSource + ?Sized,
    {
        Self {
            values: Field::ALL.map(|field| sanitizer.sanitize_value(source.lookup(field))),
        }
    }

    /// Mapping with the same value for every field
    pub(crate) fn uniform(value: &str) -> Self {
        Self {
            values: Field::ALL.map(|_| value.to_string()),
        }
    }

    /// Sanitized value of a field
    pub fn get(&self, field: Field) -> &str {
        &self.values[field as usize]
    }

    /// Iterates over `(field, value)` pairs in placeholder-table order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_source_sanitizes_and_defaults() {
        let mut record = HashMap::new();
        record.insert(Field::PatientId, "P/1".to_string());
        record.insert(Field::SliceThickness, "1.0".to_string());

        let mapping = FieldMapping::from_source(&record, &Sanitizer::default());
        assert_eq!(mapping.get(Field::PatientId), "p_1");
        assert_eq!(mapping.get(Field::SliceThickness), "1_0");
        assert_eq!(mapping.get(Field::Modality), "na");
        assert_eq!(mapping.get(Field::SeriesInstanceUid), "na");
    }

    #[test]
    fn test_every_field_populated() {
        let record: HashMap<Field, String> = HashMap::new();
        let mapping = FieldMapping::from_source(&record, &Sanitizer::default());
        let pairs: Vec<_> = mapping.iter().collect();

        assert_eq!(pairs.len(), Field::ALL.len());
        assert!(pairs.iter().all(|(_, v)| *v == "na"));
        assert_eq!(pairs[0].0, Field::PatientId);
    }

    #[test]
    fn test_index_matches_field_order() {
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(field as usize, i);
        }
    }
}
