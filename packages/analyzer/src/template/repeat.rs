use super::context::{Fragment, TemplateHost};
use super::html::{EmbeddedExpression, TagNode, TemplateVariable};
use super::processor::{report_trailing_tokens, DirectiveProcessor};
use crate::diagnostics::AngularCode;
use host::{Block, DeclaredIdentifier, Expression, ForEachStatement, Keyword, Span, Statement};

/// `name in iterable`: declares `name` for the tag's subtree, typed as the
/// element type of `iterable`.
pub struct RepeatProcessor {
    attribute: String,
}

impl RepeatProcessor {
    pub fn new(attribute: impl Into<String>) -> Self {
        RepeatProcessor {
            attribute: attribute.into(),
        }
    }
}

impl DirectiveProcessor for RepeatProcessor {
    fn can_apply(&self, tag: &TagNode) -> bool {
        tag.has_attribute(&self.attribute)
    }

    fn apply(&self, host: &mut dyn TemplateHost, tag: &mut TagNode) {
        let Some(attribute) = tag.attribute_mut(&self.attribute) else {
            return;
        };
        let text = attribute.text().to_string();
        let offset = attribute.text_offset();
        let mut tokens = host.scan(&text, 0, text.len(), offset);

        if !tokens.current().is_identifier() {
            let span = tokens.current().span;
            host.report_error(span, AngularCode::ExpectedIdentifier, &[]);
            return;
        }
        let mut name = match host.parse_expression(&mut tokens) {
            Expression::Identifier(identifier) if !identifier.name.is_empty() => identifier,
            other => {
                host.report_error(other.span(), AngularCode::ExpectedIdentifier, &[]);
                return;
            }
        };
        if !tokens.current().is_keyword(Keyword::In) {
            host.report_error(name.span, AngularCode::ExpectedIn, &[]);
            return;
        }
        tokens.advance();
        let iterable = host.parse_expression(&mut tokens);
        report_trailing_tokens(host, &tokens);

        let variable = host.declare_variable(&mut name);
        let span = Span::at(offset, text.len());
        let mut statement = Statement::ForEach(ForEachStatement {
            loop_variable: DeclaredIdentifier {
                type_name: None,
                identifier: name,
            },
            iterable,
            body: Block::default(),
            span,
        });
        host.resolve_node(Fragment::Statement(&mut statement));
        let Statement::ForEach(ForEachStatement {
            loop_variable,
            iterable,
            ..
        }) = statement
        else {
            return;
        };

        let name = loop_variable.identifier;
        let ty = name.best_type();
        host.set_variable_type(variable, ty.clone());
        attribute.variable = Some(TemplateVariable {
            name: name.name.clone(),
            name_offset: name.span.offset,
            ty,
            element: variable,
        });
        attribute.expressions = vec![
            EmbeddedExpression::new(Expression::Identifier(name)),
            EmbeddedExpression::new(iterable),
        ];
        host.define_variable(variable);
    }
}
