//! Core type definitions for dicomsort
//!
//! - [`Field`]: Metadata fields usable as template placeholders
//! - [`FileFilter`]: Which discovered files count as candidates
//! - [`SortOptions`]: Templates, filter and decompression switch for a run
//! - [`Progress`]: `(index, total)` values produced while sorting

mod field;
mod filter;
mod options;
mod progress;

pub use field::Field;
pub use filter::FileFilter;
pub use options::{SortOptions, DEFAULT_FILE_NAME_STRUCTURE, DEFAULT_FOLDER_STRUCTURE};
pub use progress::Progress;
