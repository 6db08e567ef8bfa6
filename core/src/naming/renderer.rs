use crate::error::TemplateError;
use crate::extraction::MetadataSource;
use crate::naming::{FieldMapping, PathTemplate, Sanitizer};
use std::path::{Component, Path, PathBuf};

/// Value used to check template structure before any file is seen
const PROBE_VALUE: &str = "x";

/// Turns a metadata record into a destination path
///
/// Holds the parsed folder and file name templates plus the sanitizer used
/// to build each [`FieldMapping`]. There is no collision handling: two
/// records rendering to the same path overwrite each other when written.
///
/// # Example
///
/// ```
/// use dicomsort_core::{Field, PathRenderer};
/// use std::collections::HashMap;
/// use std::path::Path;
///
/// let renderer = PathRenderer::new("{PatientID}/{StudyDate}", "{Modality}.dcm").unwrap();
///
/// let mut record = HashMap::new();
/// record.insert(Field::PatientId, "P 7".to_string());
/// record.insert(Field::Modality, "MR".to_string());
///
/// let path = renderer.render(&record, Path::new("/sorted")).unwrap();
/// assert_eq!(path, Path::new("/sorted/p_7/na/mr.dcm"));
/// ```
#[derive(Debug, Clone)]
pub struct PathRenderer {
    folder: PathTemplate,
    file_name: PathTemplate,
    sanitizer: Sanitizer,
}

impl PathRenderer {
    /// Parses and validates both templates
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either template references an unsupported placeholder or has an
    ///   unbalanced brace
    /// - The literal text of a template would leave the destination root
    /// - The file name template renders to nothing
    pub fn new(folder_structure: &str, file_name_structure: &str) -> Result<Self, TemplateError> {
        let folder = PathTemplate::parse(folder_structure)?;
        let file_name = PathTemplate::parse(file_name_structure)?;

        let probe = FieldMapping::uniform(PROBE_VALUE);
        if !stays_inside(Path::new(&folder.render(&probe))) {
            return Err(TemplateError::EscapesRoot(folder_structure.to_string()));
        }

        let probe_name = file_name.render(&probe);
        if !stays_inside(Path::new(&probe_name)) {
            return Err(TemplateError::EscapesRoot(file_name_structure.to_string()));
        }
        if !has_normal_component(Path::new(&probe_name)) {
            return Err(TemplateError::EmptyFileName(file_name_structure.to_string()));
        }

        Ok(Self {
            folder,
            file_name,
            sanitizer: Sanitizer::default(),
        })
    }

    /// Builder: Replace the sanitizer
    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// The folder template
    pub fn folder_template(&self) -> &PathTemplate {
        &self.folder
    }

    /// The file name template
    pub fn file_name_template(&self) -> &PathTemplate {
        &self.file_name
    }

    /// Sanitized field values for a record
    pub fn mapping<S>(&self, source: &S) -> FieldMapping
    where
        S: MetadataSource + ?Sized,
    {
        FieldMapping::from_source(source, &self.sanitizer)
    }

    /// Destination path relative to the destination root
    ///
    /// Fails only when a sanitizer that lets path separators or dots through
    /// produces a value that would leave the destination root.
    pub fn relative_path(&self, mapping: &FieldMapping) -> Result<PathBuf, TemplateError> {
        let relative =
            PathBuf::from(self.folder.render(mapping)).join(self.file_name.render(mapping));
        if stays_inside(&relative) && has_normal_component(&relative) {
            Ok(relative)
        } else {
            Err(TemplateError::EscapesRoot(relative.display().to_string()))
        }
    }

    /// Full destination path of a record under `destination_root`
    pub fn render<S>(&self, source: &S, destination_root: &Path) -> Result<PathBuf, TemplateError>
    where
        S: MetadataSource + ?Sized,
    {
        let relative = self.relative_path(&self.mapping(source))?;
        Ok(destination_root.join(relative))
    }
}

/// True when every component is a plain name (or `.`)
fn stays_inside(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn has_normal_component(path: &Path) -> bool {
    path.components().any(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, DEFAULT_FILE_NAME_STRUCTURE, DEFAULT_FOLDER_STRUCTURE};
    use rstest::rstest;
    use std::collections::HashMap;

    fn default_renderer() -> PathRenderer {
        PathRenderer::new(DEFAULT_FOLDER_STRUCTURE, DEFAULT_FILE_NAME_STRUCTURE).unwrap()
    }

    fn ct_record() -> HashMap<Field, String> {
        [
            (Field::PatientId, "P1"),
            (Field::StudyDate, "20240101"),
            (Field::Modality, "CT"),
            (Field::InstanceNumber, "3"),
            (Field::Kvp, "120"),
            (Field::SliceThickness, "1.0"),
            (Field::ConvolutionKernel, "STANDARD"),
        ]
        .into_iter()
        .map(|(f, v)| (f, v.to_string()))
        .collect()
    }

    #[test]
    fn test_default_templates() {
        let path = default_renderer()
            .render(&ct_record(), Path::new("sorted"))
            .unwrap();
        assert_eq!(
            path,
            Path::new("sorted/p1/20240101/120/1_0/standard/ct_3_120_1_0_standard.dcm")
        );
    }

    #[test]
    fn test_forbidden_character_never_creates_directory() {
        let mut record = ct_record();
        record.insert(Field::PatientId, "P/1".to_string());

        let root = Path::new("sorted");
        let path = default_renderer().render(&record, root).unwrap();
        let first = path.strip_prefix(root).unwrap().components().next().unwrap();
        assert_eq!(first.as_os_str(), "p_1");
    }

    #[test]
    fn test_missing_fields_render_na() {
        let record: HashMap<Field, String> = HashMap::new();
        let path = default_renderer()
            .render(&record, Path::new("out"))
            .unwrap();
        assert_eq!(path, Path::new("out/na/na/na/na/na/na_na_na_na_na.dcm"));
    }

    #[rstest]
    #[case("")]
    #[case("{Modality}")]
    #[case("{PatientID}/{StudyInstanceUID}/{SeriesInstanceUID}")]
    #[case("./archive/{StudyDescription}")]
    fn test_rendered_path_stays_under_root(#[case] folder: &str) {
        let renderer = PathRenderer::new(folder, DEFAULT_FILE_NAME_STRUCTURE).unwrap();
        let mut record = ct_record();
        record.insert(Field::StudyDescription, "../../etc".to_string());

        let root = Path::new("/data/sorted");
        let path = renderer.render(&record, root).unwrap();
        assert!(path.starts_with(root));
        assert!(path
            .strip_prefix(root)
            .unwrap()
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir)));
    }

    #[test]
    fn test_empty_folder_template() {
        let renderer = PathRenderer::new("", "{Modality}.dcm").unwrap();
        let path = renderer.render(&ct_record(), Path::new("out")).unwrap();
        assert_eq!(path, Path::new("out/ct.dcm"));
    }

    #[rstest]
    #[case("/{PatientID}", "{Modality}.dcm")]
    #[case("{PatientID}/../{StudyDate}", "{Modality}.dcm")]
    #[case("{PatientID}", "../{Modality}.dcm")]
    fn test_template_escaping_root_rejected(#[case] folder: &str, #[case] file: &str) {
        assert!(matches!(
            PathRenderer::new(folder, file),
            Err(TemplateError::EscapesRoot(_))
        ));
    }

    #[rstest]
    #[case("")]
    #[case("/")]
    #[case(".")]
    fn test_empty_file_name_rejected(#[case] file: &str) {
        let result = PathRenderer::new(DEFAULT_FOLDER_STRUCTURE, file);
        assert!(matches!(
            result,
            Err(TemplateError::EmptyFileName(_)) | Err(TemplateError::EscapesRoot(_))
        ));
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        assert!(matches!(
            PathRenderer::new("{PatientName}", DEFAULT_FILE_NAME_STRUCTURE),
            Err(TemplateError::UnknownPlaceholder { .. })
        ));
    }

    #[test]
    fn test_permissive_sanitizer_cannot_escape() {
        let renderer = PathRenderer::new("{PatientID}", "{Modality}.dcm")
            .unwrap()
            .with_sanitizer(Sanitizer::new([' ']));
        let mut record = ct_record();
        record.insert(Field::PatientId, "../..".to_string());

        assert!(matches!(
            renderer.render(&record, Path::new("out")),
            Err(TemplateError::EscapesRoot(_))
        ));
    }

    #[test]
    fn test_identical_records_collide() {
        let renderer = default_renderer();
        let root = Path::new("out");
        assert_eq!(
            renderer.render(&ct_record(), root).unwrap(),
            renderer.render(&ct_record(), root).unwrap()
        );
    }
}
