pub mod reader;
pub mod record;
pub mod tags;

pub use reader::read_dicom_file;
pub use record::MetadataSource;
pub use tags::*;
