use serde::Serialize;
use std::fmt;

/// Codes of every diagnostic the analyzer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AngularCode {
    CannotParseSelector,

    MissingSelector,
    MissingPublishAs,
    MissingTemplateUrl,
    MissingCssUrl,
    MissingName,

    /// The `map` argument is not a map literal.
    InvalidPropertyMap,
    /// A `map` key is not a string literal.
    InvalidPropertyName,
    /// A binding spec is not a string literal, or names no member.
    InvalidPropertySpec,
    /// A binding spec starts with none of the known kind markers.
    InvalidPropertyKind,
    /// A binding spec names a member the class cannot be bound through.
    InvalidPropertyField,

    ExpectedIdentifier,
    ExpectedIn,
    /// A template expression does not parse.
    ExpressionSyntax,
}

impl AngularCode {
    pub fn name(&self) -> &'static str {
        match self {
            AngularCode::CannotParseSelector => "CANNOT_PARSE_SELECTOR",
            AngularCode::MissingSelector => "MISSING_SELECTOR",
            AngularCode::MissingPublishAs => "MISSING_PUBLISH_AS",
            AngularCode::MissingTemplateUrl => "MISSING_TEMPLATE_URL",
            AngularCode::MissingCssUrl => "MISSING_CSS_URL",
            AngularCode::MissingName => "MISSING_NAME",
            AngularCode::InvalidPropertyMap => "INVALID_PROPERTY_MAP",
            AngularCode::InvalidPropertyName => "INVALID_PROPERTY_NAME",
            AngularCode::InvalidPropertySpec => "INVALID_PROPERTY_SPEC",
            AngularCode::InvalidPropertyKind => "INVALID_PROPERTY_KIND",
            AngularCode::InvalidPropertyField => "INVALID_PROPERTY_FIELD",
            AngularCode::ExpectedIdentifier => "EXPECTED_IDENTIFIER",
            AngularCode::ExpectedIn => "EXPECTED_IN",
            AngularCode::ExpressionSyntax => "EXPRESSION_SYNTAX",
        }
    }

    /// Message template; `{0}`, `{1}`... are replaced by report arguments.
    pub fn message(&self) -> &'static str {
        match self {
            AngularCode::CannotParseSelector => "The selector '{0}' cannot be parsed",
            AngularCode::MissingSelector => "Argument 'selector' must be provided",
            AngularCode::MissingPublishAs => "Argument 'publishAs' must be provided",
            AngularCode::MissingTemplateUrl => "Argument 'templateUrl' must be provided",
            AngularCode::MissingCssUrl => "Argument 'cssUrl' must be provided",
            AngularCode::MissingName => "Argument 'name' must be provided",
            AngularCode::InvalidPropertyMap => "Argument 'map' must be a constant map literal",
            AngularCode::InvalidPropertyName => "Property name must be a string literal",
            AngularCode::InvalidPropertySpec => {
                "Property binding spec must be a string literal naming a member"
            }
            AngularCode::InvalidPropertyKind => {
                "Unknown property binding kind in '{0}', expected one of @, &, =>, =>!, <=>"
            }
            AngularCode::InvalidPropertyField => "Unknown or read-only member '{0}'",
            AngularCode::ExpectedIdentifier => "Expected an identifier",
            AngularCode::ExpectedIn => "Expected 'in' keyword",
            AngularCode::ExpressionSyntax => "Syntax error in template expression: {0}",
        }
    }

    pub fn format_message(&self, args: &[&str]) -> String {
        let mut message = self.message().to_string();
        for (index, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{}}}", index), arg);
        }
        message
    }
}

impl fmt::Display for AngularCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
