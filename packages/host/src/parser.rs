//! Expression parser for host-language fragments.
//!
//! Parses the longest valid expression from a [`TokenStream`] and leaves the
//! stream positioned at the first unconsumed token. Syntax errors are recorded
//! and a synthetic empty identifier stands in for the missing operand, so a
//! parse always produces an expression.

use crate::ast::*;
use crate::scanner::{Keyword, Token, TokenKind, TokenStream};
use crate::span::Span;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at {span}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

/// Binary operators from loosest to tightest binding.
const PRECEDENCE: &[&[&str]] = &[
    &["??"],
    &["||"],
    &["&&"],
    &["==", "!="],
    &["<", ">", "<=", ">="],
    &["+", "-"],
    &["*", "/", "%"],
];

#[derive(Debug, Default)]
pub struct ExpressionParser {
    errors: Vec<ParseError>,
}

impl ExpressionParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    pub fn parse_expression(&mut self, tokens: &mut TokenStream) -> Expression {
        self.parse_binary(tokens, 0)
    }

    fn record_error(&mut self, message: impl Into<String>, token: &Token) {
        self.errors.push(ParseError {
            message: message.into(),
            span: token.span,
        });
    }

    fn parse_binary(&mut self, tokens: &mut TokenStream, level: usize) -> Expression {
        if level == PRECEDENCE.len() {
            return self.parse_postfix(tokens);
        }
        let mut left = self.parse_binary(tokens, level + 1);
        loop {
            let token = tokens.current();
            if token.kind != TokenKind::Operator || !PRECEDENCE[level].contains(&token.lexeme.as_str())
            {
                return left;
            }
            let operator = tokens.advance().lexeme;
            let right = self.parse_binary(tokens, level + 1);
            let span = left.span().cover(right.span());
            left = Expression::Binary(BinaryExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span,
                static_type: None,
            });
        }
    }

    fn parse_postfix(&mut self, tokens: &mut TokenStream) -> Expression {
        let mut result = self.parse_primary(tokens);
        loop {
            if tokens.consume_optional_character('.') {
                let name = self.expect_identifier(tokens);
                if tokens.current().is_character('(') {
                    let arguments = self.parse_arguments(tokens);
                    let span = result.span().cover(arguments.span);
                    result = Expression::MethodInvocation(MethodInvocation {
                        target: Some(Box::new(result)),
                        method_name: name,
                        arguments,
                        span,
                        static_type: None,
                    });
                } else {
                    let span = result.span().cover(name.span);
                    result = Expression::PropertyAccess(PropertyAccess {
                        target: Box::new(result),
                        property: name,
                        span,
                    });
                }
            } else if tokens.current().is_character('(') {
                // `name(...)` is an implicit-this invocation; anything else is not callable here.
                let name = match result {
                    Expression::Identifier(name) => name,
                    other => return other,
                };
                let arguments = self.parse_arguments(tokens);
                let span = name.span.cover(arguments.span);
                result = Expression::MethodInvocation(MethodInvocation {
                    target: None,
                    method_name: name,
                    arguments,
                    span,
                    static_type: None,
                });
            } else {
                return result;
            }
        }
    }

    fn parse_primary(&mut self, tokens: &mut TokenStream) -> Expression {
        let token = tokens.current().clone();
        match token.kind {
            TokenKind::Identifier => {
                tokens.advance();
                Expression::Identifier({ let offset = token.offset(); Identifier::new(token.lexeme, offset) })
            }
            TokenKind::String => {
                tokens.advance();
                Expression::StringLiteral(StringLiteral {
                    value: token.lexeme,
                    span: token.span,
                })
            }
            TokenKind::Integer => {
                tokens.advance();
                match token.lexeme.parse::<i64>() {
                    Ok(value) => Expression::IntegerLiteral(IntegerLiteral {
                        value,
                        span: token.span,
                    }),
                    Err(_) => {
                        self.record_error("Integer literal out of range", &token);
                        self.synthetic_identifier(&token)
                    }
                }
            }
            TokenKind::Keyword(Keyword::Null) => {
                tokens.advance();
                Expression::NullLiteral(token.span)
            }
            TokenKind::Keyword(Keyword::True) => {
                tokens.advance();
                Expression::BooleanLiteral(true, token.span)
            }
            TokenKind::Keyword(Keyword::False) => {
                tokens.advance();
                Expression::BooleanLiteral(false, token.span)
            }
            TokenKind::Keyword(Keyword::This) => {
                tokens.advance();
                Expression::Identifier(Identifier::new("this", token.offset()))
            }
            TokenKind::Keyword(Keyword::New) | TokenKind::Keyword(Keyword::Const) => {
                tokens.advance();
                self.parse_instance_creation(tokens, &token)
            }
            TokenKind::Character if token.is_character('(') => {
                tokens.advance();
                let inner = self.parse_expression(tokens);
                if !tokens.consume_optional_character(')') {
                    let current = tokens.current().clone();
                    self.record_error("Expected ')'", &current);
                }
                inner
            }
            TokenKind::Eof => {
                self.record_error("Unexpected end of expression", &token);
                self.synthetic_identifier(&token)
            }
            _ => {
                self.record_error(
                    format!("Unexpected token '{}'", token.lexeme),
                    &token,
                );
                self.synthetic_identifier(&token)
            }
        }
    }

    fn parse_instance_creation(&mut self, tokens: &mut TokenStream, keyword: &Token) -> Expression {
        let name = self.expect_identifier(tokens);
        let type_name = TypeName {
            name,
            type_arguments: Vec::new(),
        };
        let arguments = if tokens.current().is_character('(') {
            self.parse_arguments(tokens)
        } else {
            let current = tokens.current().clone();
            self.record_error("Expected '('", &current);
            ArgumentList::default()
        };
        let span = keyword.span.cover(arguments.span).cover(type_name.name.span);
        Expression::InstanceCreation(InstanceCreation {
            type_name,
            arguments,
            span,
            static_type: None,
        })
    }

    fn parse_arguments(&mut self, tokens: &mut TokenStream) -> ArgumentList {
        let open = tokens.advance();
        let mut arguments = Vec::new();
        if !tokens.current().is_character(')') {
            loop {
                arguments.push(self.parse_argument(tokens));
                if !tokens.consume_optional_character(',') {
                    break;
                }
            }
        }
        let close = tokens.current().clone();
        if close.is_character(')') {
            tokens.advance();
        } else {
            self.record_error("Expected ')'", &close);
        }
        ArgumentList {
            arguments,
            span: open.span.cover(close.span),
        }
    }

    fn parse_argument(&mut self, tokens: &mut TokenStream) -> Expression {
        if tokens.current().is_identifier() && tokens.peek(1).is_character(':') {
            let name_token = tokens.advance();
            tokens.advance();
            let name = { let offset = name_token.offset(); Identifier::new(name_token.lexeme, offset) };
            let expression = self.parse_expression(tokens);
            let span = name.span.cover(expression.span());
            return Expression::Named(NamedExpression {
                name,
                expression: Box::new(expression),
                span,
            });
        }
        self.parse_expression(tokens)
    }

    fn expect_identifier(&mut self, tokens: &mut TokenStream) -> Identifier {
        let token = tokens.current().clone();
        if token.is_identifier() {
            tokens.advance();
            return { let offset = token.offset(); Identifier::new(token.lexeme, offset) };
        }
        self.record_error("Expected an identifier", &token);
        Identifier::new("", token.offset())
    }

    fn synthetic_identifier(&self, token: &Token) -> Expression {
        Expression::Identifier(Identifier::new("", token.offset()))
    }
}
