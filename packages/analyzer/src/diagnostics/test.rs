use super::*;
use host::Span;

#[test]
fn test_format_message_substitutes_arguments() {
    assert_eq!(
        AngularCode::CannotParseSelector.format_message(&["~x"]),
        "The selector '~x' cannot be parsed"
    );
    assert_eq!(
        AngularCode::MissingCssUrl.format_message(&[]),
        "Argument 'cssUrl' must be provided"
    );
}

#[test]
fn test_display_uses_upper_snake_name() {
    assert_eq!(AngularCode::InvalidPropertyKind.to_string(), "INVALID_PROPERTY_KIND");
    assert_eq!(AngularCode::ExpectedIn.to_string(), "EXPECTED_IN");
    assert_eq!(AngularCode::ExpressionSyntax.to_string(), "EXPRESSION_SYNTAX");
}

#[test]
fn test_diagnostics_accumulate_in_order() {
    let mut diagnostics = Diagnostics::new();
    assert!(diagnostics.is_empty());
    diagnostics.report(AngularCode::MissingName, Span::new(1, 2), &[]);
    diagnostics.report(AngularCode::InvalidPropertyField, Span::new(5, 9), &["field"]);
    assert_eq!(
        diagnostics.codes(),
        vec![AngularCode::MissingName, AngularCode::InvalidPropertyField]
    );
    let last = diagnostics.iter().last().unwrap();
    assert_eq!(last.message, "Unknown or read-only member 'field'");
    assert_eq!(last.span, Span::new(5, 9));
}
