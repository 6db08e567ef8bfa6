use std::fmt;

/// Progress of a sorting run
///
/// `index` counts the files processed so far (1-based once work starts),
/// `total` is fixed when the source tree is scanned. `(0, 0)` means the scan
/// found nothing to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Progress {
    pub index: usize,
    pub total: usize,
}

impl Progress {
    /// Creates a new progress value
    pub fn new(index: usize, total: usize) -> Self {
        debug_assert!(index <= total);
        Self { index, total }
    }

    /// The "nothing to do" sentinel
    pub fn empty() -> Self {
        Self { index: 0, total: 0 }
    }

    /// Whether this is the `(0, 0)` sentinel
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Whether this is the last value of a run
    pub fn is_complete(&self) -> bool {
        self.index == self.total
    }
}

impl From<Progress> for (usize, usize) {
    fn from(p: Progress) -> Self {
        (p.index, p.total)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.index, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sentinel() {
        let p = Progress::empty();
        assert!(p.is_empty());
        assert!(p.is_complete());
        assert_eq!(<(usize, usize)>::from(p), (0, 0));
    }

    #[test]
    fn test_display() {
        let p = Progress::new(3, 10);
        assert_eq!(p.to_string(), "3/10");
        assert!(!p.is_complete());
        assert!(!p.is_empty());
    }
}
