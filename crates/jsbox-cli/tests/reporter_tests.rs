use std::path::PathBuf;

use jsbox_common::InputError;

use crate::driver::{Failure, FileFailure};
use crate::reporter::Reporter;

fn shape_failure() -> FileFailure {
    FileFailure {
        path: Some(PathBuf::from("app.json")),
        failure: Failure::Input(InputError::shape(
            "VarDeclaration",
            "declaration without declarators",
            Some(5),
        )),
    }
}

#[test]
fn formats_location_category_and_message() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.format_failure(&shape_failure()),
        "app.json:5 - error: malformed VarDeclaration node on line 5: declaration without declarators"
    );
}

#[test]
fn internal_errors_are_labelled() {
    let reporter = Reporter::new(false);
    let failure = FileFailure {
        path: None,
        failure: Failure::Internal("rewriter invariant violated: missing operand".to_string()),
    };
    assert_eq!(
        reporter.format_failure(&failure),
        "<stdin> - internal error: rewriter invariant violated: missing operand"
    );
}

#[test]
fn single_failure_has_no_summary() {
    let reporter = Reporter::new(false);
    let failures = vec![shape_failure()];
    assert_eq!(reporter.render(&failures), reporter.format_failure(&failures[0]));
}

#[test]
fn summary_counts_errors_and_files() {
    let reporter = Reporter::new(false);
    let other = FileFailure {
        path: Some(PathBuf::from("other.json")),
        failure: Failure::Io("failed to read other.json".to_string()),
    };
    let rendered = reporter.render(&[shape_failure(), shape_failure(), other]);
    assert!(rendered.ends_with("\n\nFound 3 errors in 2 files."));
    assert_eq!(rendered.lines().filter(|line| line.contains(" - error: ")).count(), 3);

    let same_file = reporter.render(&[shape_failure(), shape_failure()]);
    assert!(same_file.ends_with("Found 2 errors in 1 file."));
}
