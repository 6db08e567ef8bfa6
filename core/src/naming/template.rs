use crate::error::TemplateError;
use crate::naming::FieldMapping;
use crate::types::Field;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Matches escaped braces, `{Name}` placeholders, and stray braces
fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").expect("token regex is valid")
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Field),
}

/// Parsed path template such as `{PatientID}/{StudyDate}`
///
/// Placeholders are field names in braces; `{{` and `}}` produce literal
/// braces. Parsing fails on unknown placeholder names and unbalanced braces,
/// so rendering a parsed template always succeeds.
///
/// # Example
///
/// ```
/// use dicomsort_core::{Field, PathTemplate};
///
/// let template: PathTemplate = "{Modality}_{InstanceNumber}.dcm".parse().unwrap();
/// assert_eq!(template.fields(), vec![Field::Modality, Field::InstanceNumber]);
///
/// assert!("{PatientName}".parse::<PathTemplate>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Parses a template string
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in token_regex().captures_iter(template) {
            let Some(token) = caps.get(0) else {
                continue;
            };
            literal.push_str(&template[last..token.start()]);
            last = token.end();

            match (token.as_str(), caps.get(1)) {
                ("{{", _) => literal.push('{'),
                ("}}", _) => literal.push('}'),
                (_, Some(name)) => {
                    let field = Field::from_placeholder(name.as_str()).ok_or_else(|| {
                        TemplateError::UnknownPlaceholder {
                            name: name.as_str().to_string(),
                            template: template.to_string(),
                        }
                    })?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(field));
                }
                _ => {
                    return Err(TemplateError::UnbalancedBrace {
                        position: token.start(),
                        template: template.to_string(),
                    })
                }
            }
        }

        literal.push_str(&template[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    /// The template text as given
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Fields referenced by the template, in order of appearance
    pub fn fields(&self) -> Vec<Field> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(f) => Some(*f),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Substitutes every placeholder from the mapping
    pub fn render(&self, mapping: &FieldMapping) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Literal(text) => text.as_str(),
                Segment::Placeholder(field) => mapping.get(*field),
            })
            .collect()
    }
}

impl FromStr for PathTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
