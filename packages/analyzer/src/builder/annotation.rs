use crate::diagnostics::{AngularCode, Diagnostics};
use crate::selector::{parse_selector, Selector};
use host::{Annotation, ArgumentList, Expression, StringLiteral};

/// Reads named arguments of one class annotation, reporting missing ones at
/// the annotation.
pub(crate) struct AnnotationArguments<'a, 'd> {
    annotation: &'a Annotation,
    arguments: &'a ArgumentList,
    diagnostics: &'d mut Diagnostics,
}

impl<'a, 'd> AnnotationArguments<'a, 'd> {
    pub(crate) fn new(
        annotation: &'a Annotation,
        arguments: &'a ArgumentList,
        diagnostics: &'d mut Diagnostics,
    ) -> Self {
        AnnotationArguments {
            annotation,
            arguments,
            diagnostics,
        }
    }

    pub(crate) fn diagnostics(&mut self) -> &mut Diagnostics {
        self.diagnostics
    }

    pub(crate) fn optional_string(&self, name: &str) -> Option<&'a StringLiteral> {
        self.arguments
            .named(name)
            .and_then(Expression::as_string_literal)
    }

    pub(crate) fn required_string(&mut self, name: &str, code: AngularCode) -> Option<&'a StringLiteral> {
        let literal = self.optional_string(name);
        if literal.is_none() {
            self.diagnostics.report(code, self.annotation.span, &[]);
        }
        literal
    }

    pub(crate) fn required_selector(&mut self) -> Option<Selector> {
        let literal = self.required_string("selector", AngularCode::MissingSelector)?;
        parse_selector(self.diagnostics, literal.value_offset(), &literal.value)
    }
}
