use std::collections::BTreeSet;
use std::fmt::Display;

/// Characters replaced by [`Sanitizer::default`]
pub const DEFAULT_FORBIDDEN: [char; 12] =
    ['*', '.', ',', '"', '\\', '/', '|', '[', ']', ':', ';', ' '];

/// Text substituted for absent metadata values
pub const MISSING_VALUE: &str = "NA";

const REPLACEMENT: char = '_';

/// Maps metadata values to filesystem-safe tokens
///
/// Output is lowercase with every forbidden character replaced by `_`.
/// `_` itself can never be forbidden.
///
/// # Example
///
/// ```
/// use dicomsort_core::Sanitizer;
///
/// let sanitizer = Sanitizer::default();
/// assert_eq!(sanitizer.sanitize("P/1"), "p_1");
/// assert_eq!(sanitizer.sanitize(1.25), "1_25");
/// assert_eq!(sanitizer.sanitize_value(None::<&str>), "na");
///
/// let strict = Sanitizer::new(['-']);
/// assert_eq!(strict.sanitize("A-B.C"), "a_b.c");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitizer {
    forbidden: BTreeSet<char>,
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_FORBIDDEN)
    }
}

impl Sanitizer {
    /// Creates a sanitizer with a custom forbidden set
    pub fn new(forbidden: impl IntoIterator<Item = char>) -> Self {
        Self {
            forbidden: forbidden
                .into_iter()
                .filter(|c| *c != REPLACEMENT)
                .collect(),
        }
    }

    /// The forbidden character set
    pub fn forbidden(&self) -> &BTreeSet<char> {
        &self.forbidden
    }

    /// Sanitizes any displayable value
    pub fn sanitize(&self, value: impl Display) -> String {
        value
            .to_string()
            .to_lowercase()
            .chars()
            .map(|c| {
                if self.forbidden.contains(&c) {
                    REPLACEMENT
                } else {
                    c
                }
            })
            .collect()
    }

    /// Sanitizes an optional value, substituting [`MISSING_VALUE`] when absent
    pub fn sanitize_value<T: Display>(&self, value: Option<T>) -> String {
        match value {
            Some(v) => self.sanitize(v),
            None => self.sanitize(MISSING_VALUE),
        }
    }
}

/// Sanitizes text with the default forbidden set
pub fn clean_text(text: &str) -> String {
    Sanitizer::default().sanitize(text)
}
