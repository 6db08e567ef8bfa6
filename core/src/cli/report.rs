use crate::sorting::{SortIssue, SortSummary};
use std::fmt;
use std::path::Path;

/// Text report formatter for a finished sorting run
pub struct TextReport<'a> {
    destination: &'a Path,
    summary: &'a SortSummary,
    issues: &'a [SortIssue],
}

impl<'a> TextReport<'a> {
    /// Creates a new text report
    pub fn new(destination: &'a Path, summary: &'a SortSummary, issues: &'a [SortIssue]) -> Self {
        Self {
            destination,
            summary,
            issues,
        }
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sort Summary")?;
        writeln!(f, "============")?;
        writeln!(f)?;
        writeln!(f, "Destination:    {}", self.destination.display())?;
        writeln!(f, "Files found:    {}", self.summary.total)?;
        writeln!(f, "Written:        {}", self.summary.written)?;
        writeln!(f, "Warnings:       {}", self.summary.warnings)?;
        writeln!(f, "Failed:         {}", self.summary.failed)?;
        writeln!(f, "Overwritten:    {}", self.summary.overwritten)?;

        if !self.issues.is_empty() {
            writeln!(f)?;
            writeln!(f, "Issues")?;
            writeln!(f, "------")?;
            for issue in self.issues {
                writeln!(f, "{}: {}", issue.path.display(), issue.error)?;
            }
        }

        Ok(())
    }
}
