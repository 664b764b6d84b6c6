//! Factory for building AST nodes by hand.
//!
//! Used by tests and tools that synthesize code without running a full front
//! end. [`Fixture`] ties nodes to offsets in a piece of source text so that
//! spans match what a parser would have produced.

use crate::ast::*;
use crate::span::Span;
use crate::types::{MemberKind, Modifiers};

/// Source text that node offsets are looked up in.
pub struct Fixture {
    source: String,
}

impl Fixture {
    pub fn new(source: impl Into<String>) -> Self {
        Fixture {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Offset of the first occurrence of `search`.
    ///
    /// Panics when `search` does not occur, which in a fixture is a bug in the test.
    pub fn offset(&self, search: &str) -> usize {
        self.offset_after(search, 0)
    }

    pub fn offset_after(&self, search: &str, from: usize) -> usize {
        match self.source[from..].find(search) {
            Some(found) => from + found,
            None => panic!("'{}' not found in fixture source", search),
        }
    }

    /// Identifier at the first occurrence of `name`.
    pub fn ident(&self, name: &str) -> Identifier {
        Identifier::new(name, self.offset(name))
    }

    pub fn ident_after(&self, name: &str, from: usize) -> Identifier {
        Identifier::new(name, self.offset_after(name, from))
    }

    /// String literal `'value'` located at its first quoted occurrence.
    pub fn string(&self, value: &str) -> Expression {
        let quoted = format!("'{}'", value);
        let offset = self.offset(&quoted);
        string_literal(value, offset)
    }

    pub fn null(&self, search: &str) -> Expression {
        Expression::NullLiteral(Span::at(self.offset(search), 4))
    }

    pub fn integer(&self, value: i64) -> Expression {
        let text = value.to_string();
        Expression::IntegerLiteral(IntegerLiteral {
            value,
            span: Span::at(self.offset(&text), text.len()),
        })
    }
}

pub fn identifier(name: &str, offset: usize) -> Identifier {
    Identifier::new(name, offset)
}

/// `offset` is the position of the opening quote.
pub fn string_literal(value: &str, offset: usize) -> Expression {
    Expression::StringLiteral(StringLiteral {
        value: value.to_string(),
        span: Span::at(offset, value.len() + 2),
    })
}

pub fn identifier_expression(identifier: Identifier) -> Expression {
    Expression::Identifier(identifier)
}

pub fn named(name: Identifier, value: Expression) -> Expression {
    let span = name.span.cover(value.span());
    Expression::Named(NamedExpression {
        name,
        expression: Box::new(value),
        span,
    })
}

pub fn map_literal(entries: Vec<(Expression, Expression)>, span: Span) -> Expression {
    Expression::MapLiteral(MapLiteral {
        is_const: true,
        entries: entries
            .into_iter()
            .map(|(key, value)| MapEntry { key, value })
            .collect(),
        span,
    })
}

pub fn argument_list(arguments: Vec<Expression>) -> ArgumentList {
    let span = cover_all(arguments.iter().map(Expression::span));
    ArgumentList { arguments, span }
}

/// `@name` when `arguments` is `None`, `@name(...)` otherwise.
pub fn annotation(name: Identifier, arguments: Option<Vec<Expression>>) -> Annotation {
    let arguments = arguments.map(argument_list);
    let at_sign = Span::new(name.span.offset.saturating_sub(1), name.span.end);
    let span = cover_all([at_sign].into_iter().chain(arguments.iter().map(|a| a.span)));
    Annotation {
        name,
        arguments,
        span,
    }
}

pub fn type_name(name: Identifier) -> TypeName {
    TypeName {
        name,
        type_arguments: Vec::new(),
    }
}

pub fn generic_type_name(name: Identifier, type_arguments: Vec<TypeName>) -> TypeName {
    TypeName {
        name,
        type_arguments,
    }
}

pub fn instance_creation(type_name: Identifier, arguments: Vec<Expression>) -> Expression {
    let arguments = argument_list(arguments);
    let span = cover_all([type_name.span, arguments.span].into_iter());
    Expression::InstanceCreation(InstanceCreation {
        type_name: self::type_name(type_name),
        arguments,
        span,
        static_type: None,
    })
}

pub fn invocation(
    target: Option<Expression>,
    method_name: Identifier,
    arguments: Vec<Expression>,
) -> MethodInvocation {
    let arguments = argument_list(arguments);
    let span = cover_all(
        [method_name.span, arguments.span]
            .into_iter()
            .chain(target.iter().map(Expression::span)),
    );
    MethodInvocation {
        target: target.map(Box::new),
        method_name,
        arguments,
        span,
        static_type: None,
    }
}

pub fn invocation_expression(
    target: Option<Expression>,
    method_name: Identifier,
    arguments: Vec<Expression>,
) -> Expression {
    Expression::MethodInvocation(invocation(target, method_name, arguments))
}

pub fn property_access(target: Expression, property: Identifier) -> Expression {
    let span = target.span().cover(property.span);
    Expression::PropertyAccess(PropertyAccess {
        target: Box::new(target),
        property,
        span,
    })
}

pub fn cascade(target: Expression, sections: Vec<MethodInvocation>) -> Expression {
    let span = cover_all(
        std::iter::once(target.span()).chain(sections.iter().map(|section| section.span)),
    );
    Expression::Cascade(Cascade {
        target: Box::new(target),
        sections,
        span,
    })
}

pub fn variable_list(
    modifiers: Modifiers,
    type_name: Option<TypeName>,
    names: Vec<(Identifier, Option<Expression>)>,
) -> VariableDeclarationList {
    let variables: Vec<VariableDeclaration> = names
        .into_iter()
        .map(|(name, initializer)| {
            let mut span = name.span;
            if let Some(initializer) = &initializer {
                span = span.cover(initializer.span());
            }
            VariableDeclaration {
                name,
                initializer,
                span,
            }
        })
        .collect();
    let span = cover_all(variables.iter().map(|variable| variable.span));
    VariableDeclarationList {
        modifiers,
        type_name,
        variables,
        span,
    }
}

pub fn variable_statement(name: Identifier, initializer: Option<Expression>) -> Statement {
    Statement::Variables(variable_list(
        Modifiers::empty(),
        None,
        vec![(name, initializer)],
    ))
}

pub fn expression_statement(expression: Expression) -> Statement {
    Statement::Expression(expression)
}

pub fn block(statements: Vec<Statement>) -> Block {
    let span = cover_all(statements.iter().map(statement_span));
    Block { statements, span }
}

pub fn field(
    annotations: Vec<Annotation>,
    modifiers: Modifiers,
    type_name: Option<TypeName>,
    name: Identifier,
) -> ClassMember {
    let fields = variable_list(modifiers, type_name, vec![(name, None)]);
    let span = cover_all(
        annotations
            .iter()
            .map(|annotation| annotation.span)
            .chain(std::iter::once(fields.span)),
    );
    ClassMember::Field(FieldDeclaration {
        annotations,
        fields,
        span,
    })
}

pub fn method(
    annotations: Vec<Annotation>,
    kind: MemberKind,
    name: Identifier,
    parameters: Vec<Parameter>,
    body: Vec<Statement>,
) -> ClassMember {
    let body = block(body);
    let span = cover_all(
        annotations
            .iter()
            .map(|annotation| annotation.span)
            .chain([name.span, body.span]),
    );
    ClassMember::Method(MethodDeclaration {
        annotations,
        kind,
        modifiers: Modifiers::empty(),
        return_type: None,
        name,
        parameters,
        body,
        span,
    })
}

/// `set name(value) {}`
pub fn setter(name: Identifier) -> ClassMember {
    let parameter = Parameter {
        type_name: None,
        name: Identifier::new("value", name.span.end),
    };
    method(Vec::new(), MemberKind::Setter, name, vec![parameter], Vec::new())
}

pub fn constructor(name: Identifier, body: Vec<Statement>) -> ClassMember {
    let body = block(body);
    let span = cover_all([name.span, body.span].into_iter());
    ClassMember::Constructor(ConstructorDeclaration {
        name: Some(name),
        body,
        span,
    })
}

pub fn class_declaration(
    annotations: Vec<Annotation>,
    name: Identifier,
    superclass: Option<TypeName>,
    members: Vec<ClassMember>,
) -> Declaration {
    let span = cover_all(
        annotations
            .iter()
            .map(|annotation| annotation.span)
            .chain(std::iter::once(name.span))
            .chain(members.iter().map(member_span)),
    );
    Declaration::Class(ClassDeclaration {
        annotations,
        name,
        superclass,
        members,
        span,
        element: None,
    })
}

pub fn function(name: Identifier, body: Vec<Statement>) -> Declaration {
    let body = block(body);
    let span = cover_all([name.span, body.span].into_iter());
    Declaration::Function(FunctionDeclaration { name, body, span })
}

pub fn compilation_unit(declarations: Vec<Declaration>) -> CompilationUnit {
    CompilationUnit {
        declarations,
        span: Span::default(),
    }
}

fn statement_span(statement: &Statement) -> Span {
    match statement {
        Statement::Expression(expression) => expression.span(),
        Statement::Variables(list) => list.span,
        Statement::ForEach(for_each) => for_each.span,
        Statement::Block(block) => block.span,
    }
}

fn member_span(member: &ClassMember) -> Span {
    match member {
        ClassMember::Field(field) => field.span,
        ClassMember::Constructor(constructor) => constructor.span,
        ClassMember::Method(method) => method.span,
    }
}

/// Smallest span covering every non-empty span in `spans`.
fn cover_all(spans: impl Iterator<Item = Span>) -> Span {
    spans
        .filter(|span| !span.is_empty())
        .reduce(|covered, span| covered.cover(span))
        .unwrap_or_default()
}
