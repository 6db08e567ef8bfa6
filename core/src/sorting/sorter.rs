use crate::error::{DicomSortError, Result};
use crate::extraction::read_dicom_file;
use crate::naming::PathRenderer;
use crate::output::{Materialized, Materializer};
use crate::sorting::discover::find_dicom_files;
use crate::types::{Progress, SortOptions};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

/// Receives recoverable per-file failures and warnings
///
/// Implemented for any `FnMut(&Path, &DicomSortError)` closure.
pub trait ErrorSink {
    fn report(&mut self, path: &Path, error: &DicomSortError);
}

impl<F> ErrorSink for F
where
    F: FnMut(&Path, &DicomSortError),
{
    fn report(&mut self, path: &Path, error: &DicomSortError) {
        self(path, error)
    }
}

/// A recovered failure or warning for one source file
#[derive(Debug)]
pub struct SortIssue {
    pub path: PathBuf,
    pub error: DicomSortError,
}

/// Counters for a sorting run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct SortSummary {
    /// Candidate files found during discovery
    pub total: usize,

    /// Files written, including those written compressed
    pub written: usize,

    /// Files written compressed because decompression failed
    pub warnings: usize,

    /// Files skipped because they could not be read or written
    pub failed: usize,

    /// Writes that replaced a file written earlier in the same run
    pub overwritten: usize,
}

impl SortSummary {
    /// Files handled so far, successfully or not
    pub fn processed(&self) -> usize {
        self.written + self.failed
    }

    /// Whether every processed file was written without warnings
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.warnings == 0
    }
}

/// Sorts DICOM files one at a time, yielding progress after each
///
/// Discovery happens in [`DicomSorter::new`]; each call to
/// [`next`](Iterator::next) then reads, renders and writes exactly one file
/// and returns `(index, total)`. An empty source yields a single `(0, 0)`.
/// Per-file failures are logged, passed to the error sink and kept in
/// [`issues`](DicomSorter::issues); they never end the iteration early.
/// Dropping the sorter between pulls cancels the run after the current file.
///
/// Destination collisions are not resolved: when two files render to the
/// same path the later one replaces the earlier one, which is logged and
/// counted in [`SortSummary::overwritten`]. Detecting them means keeping
/// every written target path for the rest of the run, the only per-file
/// state held across iterations.
pub struct DicomSorter {
    destination: PathBuf,
    files: Vec<PathBuf>,
    position: usize,
    finished: bool,
    renderer: PathRenderer,
    materializer: Materializer,
    sink: Option<Box<dyn ErrorSink>>,
    issues: Vec<SortIssue>,
    targets: HashSet<PathBuf>,
    summary: SortSummary,
}

impl DicomSorter {
    /// Validates the configuration and discovers candidate files
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A template is malformed
    /// - `source` is not a directory
    /// - `destination` exists and is not a directory
    pub fn new(
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        options: &SortOptions,
    ) -> Result<Self> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        let renderer = PathRenderer::new(&options.folder_structure, &options.file_name_structure)?;

        if destination.exists() && !destination.is_dir() {
            return Err(DicomSortError::InvalidDestination(destination.to_path_buf()));
        }

        let files = find_dicom_files(source, &options.filter, Some(destination))?;
        info!(
            "Found {} files in {}, sorting into {}",
            files.len(),
            source.display(),
            destination.display()
        );

        Ok(Self {
            destination: destination.to_path_buf(),
            summary: SortSummary {
                total: files.len(),
                ..SortSummary::default()
            },
            files,
            position: 0,
            finished: false,
            renderer,
            materializer: Materializer::new(options.decompress),
            sink: None,
            issues: Vec::new(),
            targets: HashSet::new(),
        })
    }

    /// Builder: Register a sink for per-file failures and warnings
    pub fn on_error(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Builder: Replace the path renderer
    ///
    /// Overrides the templates given in [`SortOptions`].
    pub fn with_renderer(mut self, renderer: PathRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Builder: Replace the materializer
    pub fn with_materializer(mut self, materializer: Materializer) -> Self {
        self.materializer = materializer;
        self
    }

    /// Number of files found during discovery
    pub fn total(&self) -> usize {
        self.files.len()
    }

    /// Discovered source files in processing order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Destination root
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Failures and warnings recorded so far
    pub fn issues(&self) -> &[SortIssue] {
        &self.issues
    }

    /// Counters for the run so far
    pub fn summary(&self) -> SortSummary {
        self.summary
    }

    /// Processes the next file and returns the resulting progress
    ///
    /// Returns `None` once every file has been processed.
    pub fn advance(&mut self) -> Option<Progress> {
        if self.finished {
            return None;
        }

        let total = self.files.len();
        if total == 0 {
            self.finished = true;
            return Some(Progress::empty());
        }

        let Some(source) = self.files.get(self.position).cloned() else {
            self.finished = true;
            return None;
        };
        self.position += 1;

        match self.process_file(&source) {
            Ok(materialized) => {
                self.summary.written += 1;
                let target = match materialized {
                    Materialized::Written(path) => path,
                    Materialized::WrittenCompressed { path, warning } => {
                        self.summary.warnings += 1;
                        self.record_issue(source, warning);
                        path
                    }
                };
                if !self.targets.insert(target.clone()) {
                    warn!(
                        "{} was written more than once, keeping the latest",
                        target.display()
                    );
                    self.summary.overwritten += 1;
                }
            }
            Err(error) => {
                self.summary.failed += 1;
                self.record_issue(source, error);
            }
        }

        Some(Progress::new(self.position, total))
    }

    /// Drains the remaining files and returns the final counters
    pub fn finish(mut self) -> SortSummary {
        while self.advance().is_some() {}
        self.summary
    }

    /// Runs read → render → write for one file
    fn process_file(&self, source: &Path) -> Result<Materialized> {
        let obj = read_dicom_file(source)?;
        let target = self
            .renderer
            .render(&obj, &self.destination)
            .map_err(|e| DicomSortError::WriteFailure {
                path: source.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!("{} -> {}", source.display(), target.display());
        self.materializer.materialize(obj, &target)
    }

    fn record_issue(&mut self, path: PathBuf, error: DicomSortError) {
        warn!("{}: {}", path.display(), error);
        if let Some(sink) = self.sink.as_mut() {
            sink.report(&path, &error);
        }
        self.issues.push(SortIssue { path, error });
    }
}

impl Iterator for DicomSorter {
    type Item = Progress;

    fn next(&mut self) -> Option<Progress> {
        self.advance()
    }
}

impl FusedIterator for DicomSorter {}
