pub mod discover;
pub mod sorter;

pub use discover::find_dicom_files;
pub use sorter::{DicomSorter, ErrorSink, SortIssue, SortSummary};
