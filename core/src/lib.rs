pub mod api;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod naming;
pub mod output;
pub mod settings;
pub mod sorting;
pub mod types;

pub use api::{render_path, sort_dicoms};
pub use cli::report::TextReport;
pub use error::{DicomSortError, Result, TemplateError};
pub use extraction::{read_dicom_file, MetadataSource};
pub use naming::{clean_text, FieldMapping, PathRenderer, PathTemplate, Sanitizer};
pub use output::{Decompressor, Materialized, Materializer, PixelDataDecompressor};
pub use settings::Settings;
pub use sorting::{DicomSorter, ErrorSink, SortIssue, SortSummary};
pub use types::*;
