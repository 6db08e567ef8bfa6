use crate::extraction::tags::{
    CONVOLUTION_KERNEL, INSTANCE_NUMBER, KVP, MODALITY, PATIENT_ID, SERIES_DESCRIPTION,
    SERIES_INSTANCE_UID, SLICE_THICKNESS, STUDY_DATE, STUDY_DESCRIPTION, STUDY_INSTANCE_UID,
};
use dicom_core::Tag;
use std::fmt;

/// Metadata field usable as a template placeholder
///
/// The placeholder name is the DICOM keyword of the attribute, so a template
/// reads like `{PatientID}/{StudyDate}`. Names are case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub enum Field {
    PatientId,
    StudyDate,
    Modality,
    InstanceNumber,
    Kvp,
    SliceThickness,
    ConvolutionKernel,
    StudyDescription,
    SeriesDescription,
    StudyInstanceUid,
    SeriesInstanceUid,
}

impl Field {
    /// Every supported field, in placeholder-table order
    pub const ALL: [Field; 11] = [
        Field::PatientId,
        Field::StudyDate,
        Field::Modality,
        Field::InstanceNumber,
        Field::Kvp,
        Field::SliceThickness,
        Field::ConvolutionKernel,
        Field::StudyDescription,
        Field::SeriesDescription,
        Field::StudyInstanceUid,
        Field::SeriesInstanceUid,
    ];

    /// The seven fields referenced by the default templates
    pub const DEFAULTS: [Field; 7] = [
        Field::PatientId,
        Field::StudyDate,
        Field::Modality,
        Field::InstanceNumber,
        Field::Kvp,
        Field::SliceThickness,
        Field::ConvolutionKernel,
    ];

    /// Placeholder name as written inside `{}`
    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::PatientId => "PatientID",
            Field::StudyDate => "StudyDate",
            Field::Modality => "Modality",
            Field::InstanceNumber => "InstanceNumber",
            Field::Kvp => "KVP",
            Field::SliceThickness => "SliceThickness",
            Field::ConvolutionKernel => "ConvolutionKernel",
            Field::StudyDescription => "StudyDescription",
            Field::SeriesDescription => "SeriesDescription",
            Field::StudyInstanceUid => "StudyInstanceUID",
            Field::SeriesInstanceUid => "SeriesInstanceUID",
        }
    }

    /// DICOM attribute the field is read from
    pub fn tag(&self) -> Tag {
        match self {
            Field::PatientId => PATIENT_ID,
            Field::StudyDate => STUDY_DATE,
            Field::Modality => MODALITY,
            Field::InstanceNumber => INSTANCE_NUMBER,
            Field::Kvp => KVP,
            Field::SliceThickness => SLICE_THICKNESS,
            Field::ConvolutionKernel => CONVOLUTION_KERNEL,
            Field::StudyDescription => STUDY_DESCRIPTION,
            Field::SeriesDescription => SERIES_DESCRIPTION,
            Field::StudyInstanceUid => STUDY_INSTANCE_UID,
            Field::SeriesInstanceUid => SERIES_INSTANCE_UID,
        }
    }

    /// Looks up a field by its placeholder name
    pub fn from_placeholder(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.placeholder() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.placeholder())
    }
}
