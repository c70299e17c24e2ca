use super::*;

#[test]
fn test_parse_error_display_includes_location() {
    let err = InputError::parse("expected `,`", SourceLocation::new(3, 14));
    assert_eq!(err.to_string(), "parse error at 3:14: expected `,`");
    assert_eq!(err.line(), Some(3));
}

#[test]
fn test_shape_error_display_with_and_without_line() {
    let with_line = InputError::shape("If", "missing condition", Some(7));
    assert_eq!(
        with_line.to_string(),
        "malformed If node on line 7: missing condition"
    );

    let without_line = InputError::shape("ArgList", "parameter is not an identifier", None);
    assert_eq!(
        without_line.to_string(),
        "malformed ArgList node: parameter is not an identifier"
    );
    assert_eq!(without_line.line(), None);
}

#[test]
fn test_too_deep_has_no_line() {
    let err = InputError::TooDeep {
        depth: 5000,
        limit: 4001,
    };
    assert_eq!(err.line(), None);
    assert!(err.to_string().contains("5000"));
}

#[test]
fn test_location_display_omits_unknown_column() {
    assert_eq!(SourceLocation::line(12).to_string(), "12");
    assert_eq!(SourceLocation::new(12, 4).to_string(), "12:4");
}
