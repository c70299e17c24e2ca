use colored::Colorize;

use crate::driver::{Failure, FileFailure};

/// Formats per-input failures for stderr.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    pub fn render(&self, failures: &[FileFailure]) -> String {
        let mut out = String::new();
        for (index, failure) in failures.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_failure(failure));
        }
        if let Some(summary) = self.summary(failures) {
            out.push_str("\n\n");
            out.push_str(&summary);
        }
        out
    }

    /// `path:line - error: message`
    pub fn format_failure(&self, failure: &FileFailure) -> String {
        let mut location = failure.display_path();
        if let Some(line) = failure.failure.line() {
            location.push(':');
            location.push_str(&line.to_string());
        }
        let location = if self.color {
            location.cyan().to_string()
        } else {
            location
        };
        format!(
            "{location} - {}: {}",
            self.format_category(&failure.failure),
            failure.failure
        )
    }

    fn format_category(&self, failure: &Failure) -> String {
        let label = match failure {
            Failure::Internal(_) => "internal error",
            Failure::Io(_)
            | Failure::Input(_)
            | Failure::Translation(_)
            | Failure::OutputTaken { .. } => "error",
        };
        if !self.color {
            return label.to_string();
        }
        match failure {
            Failure::Internal(_) => label.magenta().bold().to_string(),
            _ => label.red().bold().to_string(),
        }
    }

    /// `Found 3 errors in 2 files.` when there is more than one failure.
    fn summary(&self, failures: &[FileFailure]) -> Option<String> {
        if failures.len() < 2 {
            return None;
        }
        let mut files: Vec<String> = failures.iter().map(FileFailure::display_path).collect();
        files.sort();
        files.dedup();
        let file_word = if files.len() == 1 { "file" } else { "files" };
        let summary = format!(
            "Found {} errors in {} {file_word}.",
            failures.len(),
            files.len()
        );
        Some(if self.color {
            summary.bold().to_string()
        } else {
            summary
        })
    }
}
