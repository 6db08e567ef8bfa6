use crate::error::{DicomSortError, Result};
use dicom::encoding::transfer_syntax::TransferSyntaxIndex;
use dicom::pixeldata::Transcode;
use dicom::transfer_syntax::entries::EXPLICIT_VR_LITTLE_ENDIAN;
use dicom::transfer_syntax::TransferSyntaxRegistry;
use dicom_object::DefaultDicomObject;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Decodes a compressed object into a native transfer syntax in place
pub trait Decompressor {
    fn decompress(&self, obj: &mut DefaultDicomObject) -> std::result::Result<(), String>;
}

/// Transcodes to Explicit VR Little Endian with dicom-pixeldata
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelDataDecompressor;

impl Decompressor for PixelDataDecompressor {
    fn decompress(&self, obj: &mut DefaultDicomObject) -> std::result::Result<(), String> {
        obj.transcode(&EXPLICIT_VR_LITTLE_ENDIAN.erased())
            .map_err(|e| e.to_string())
    }
}

/// Result of writing one file
#[derive(Debug)]
pub enum Materialized {
    /// Written, decompressed if needed and requested
    Written(PathBuf),

    /// Written in its original compressed form because decoding failed
    WrittenCompressed {
        path: PathBuf,
        warning: DicomSortError,
    },
}

impl Materialized {
    /// Destination the file was written to
    pub fn path(&self) -> &Path {
        match self {
            Materialized::Written(path) => path,
            Materialized::WrittenCompressed { path, .. } => path,
        }
    }

    /// Decompression warning, if any
    pub fn warning(&self) -> Option<&DicomSortError> {
        match self {
            Materialized::Written(_) => None,
            Materialized::WrittenCompressed { warning, .. } => Some(warning),
        }
    }
}

/// Writes parsed objects to their destination
///
/// Output is always re-encoded: preamble, the file meta group and the
/// data set in the object's (possibly transcoded) transfer syntax. Existing
/// files are overwritten.
pub struct Materializer {
    decompress: bool,
    decompressor: Box<dyn Decompressor>,
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Materializer {
    /// Creates a materializer using [`PixelDataDecompressor`]
    pub fn new(decompress: bool) -> Self {
        Self {
            decompress,
            decompressor: Box::new(PixelDataDecompressor),
        }
    }

    /// Builder: Replace the decompressor
    pub fn with_decompressor(mut self, decompressor: impl Decompressor + 'static) -> Self {
        self.decompressor = Box::new(decompressor);
        self
    }

    /// Whether decompression is attempted
    pub fn decompresses(&self) -> bool {
        self.decompress
    }

    /// Writes `obj` to `destination`
    ///
    /// # Algorithm
    ///
    /// 1. Create missing parent directories
    /// 2. If requested and the transfer syntax is compressed, decompress;
    ///    on failure keep the compressed data and record a warning
    /// 3. Write the file
    ///
    /// # Errors
    ///
    /// Returns [`DicomSortError::WriteFailure`] if a directory or the file
    /// cannot be written.
    pub fn materialize(
        &self,
        mut obj: DefaultDicomObject,
        destination: &Path,
    ) -> Result<Materialized> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| DicomSortError::WriteFailure {
                path: destination.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let mut warning = None;
        if self.decompress && is_compressed(&obj) {
            debug!(
                "Decompressing {} (transfer syntax {})",
                destination.display(),
                obj.meta().transfer_syntax()
            );
            if let Err(reason) = self.decompressor.decompress(&mut obj) {
                warn!(
                    "Could not decompress {}, writing compressed data: {}",
                    destination.display(),
                    reason
                );
                warning = Some(DicomSortError::DecompressionFailure {
                    path: destination.to_path_buf(),
                    reason,
                });
            }
        }

        obj.write_to_file(destination)
            .map_err(|e| DicomSortError::WriteFailure {
                path: destination.to_path_buf(),
                reason: e.to_string(),
            })?;

        let path = destination.to_path_buf();
        Ok(match warning {
            None => Materialized::Written(path),
            Some(warning) => Materialized::WrittenCompressed { path, warning },
        })
    }
}

/// Checks whether the object's transfer syntax needs a codec
///
/// Unknown transfer syntaxes are treated as uncompressed.
pub fn is_compressed(obj: &DefaultDicomObject) -> bool {
    let uid = obj.meta().transfer_syntax().trim_end_matches('\0');
    match TransferSyntaxRegistry.get(uid) {
        Some(ts) => !ts.is_codec_free(),
        None => {
            debug!("Unknown transfer syntax {}", uid);
            false
        }
    }
}
