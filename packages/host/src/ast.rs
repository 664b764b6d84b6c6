//! AST shapes produced by the host parser and annotated by the host resolver.
//!
//! Nodes are owned values. Resolution results are stored in place:
//! identifiers carry their `static_element`, and typed expressions carry their
//! `static_type`.

use crate::span::Span;
use crate::types::{ClassId, MemberKind, Modifiers, Type, VariableId};
use serde::Serialize;

/// What a resolved identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementRef {
    Class(ClassId),
    Variable(VariableId),
    /// Index into the owning class's member list.
    Member(ClassId, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
    pub static_element: Option<ElementRef>,
    pub static_type: Option<Type>,
}

impl Identifier {
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        let name = name.into();
        let span = Span::at(offset, name.len());
        Identifier {
            name,
            span,
            static_element: None,
            static_type: None,
        }
    }

    pub fn variable(&self) -> Option<VariableId> {
        match self.static_element {
            Some(ElementRef::Variable(id)) => Some(id),
            _ => None,
        }
    }

    pub fn class(&self) -> Option<ClassId> {
        match self.static_element {
            Some(ElementRef::Class(id)) => Some(id),
            _ => None,
        }
    }

    /// Static type, or `dynamic` when resolution found nothing better.
    pub fn best_type(&self) -> Type {
        self.static_type.clone().unwrap_or(Type::Dynamic)
    }
}

/// A single-quoted or double-quoted string literal. The span covers the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

impl StringLiteral {
    /// Offset of the first character inside the quotes.
    pub fn value_offset(&self) -> usize {
        self.span.offset + 1
    }

    pub fn value_span(&self) -> Span {
        Span::at(self.value_offset(), self.value.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerLiteral {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: Expression,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLiteral {
    pub is_const: bool,
    pub entries: Vec<MapEntry>,
    pub span: Span,
}

/// `name: expression` inside an argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedExpression {
    pub name: Identifier,
    pub expression: Box<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub name: Identifier,
    pub type_arguments: Vec<TypeName>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArgumentList {
    pub arguments: Vec<Expression>,
    pub span: Span,
}

impl ArgumentList {
    /// Value of the named argument `name`, if present.
    pub fn named(&self, name: &str) -> Option<&Expression> {
        self.arguments.iter().find_map(|argument| match argument {
            Expression::Named(named) if named.name.name == name => Some(&*named.expression),
            _ => None,
        })
    }

    pub fn positional(&self) -> impl Iterator<Item = &Expression> {
        self.arguments
            .iter()
            .filter(|argument| !matches!(argument, Expression::Named(_)))
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceCreation {
    pub type_name: TypeName,
    pub arguments: ArgumentList,
    pub span: Span,
    pub static_type: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodInvocation {
    /// `None` for implicit `this` calls and for cascade sections.
    pub target: Option<Box<Expression>>,
    pub method_name: Identifier,
    pub arguments: ArgumentList,
    pub span: Span,
    pub static_type: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAccess {
    pub target: Box<Expression>,
    pub property: Identifier,
    pub span: Span,
}

/// `target..a()..b()`; the value of the whole expression is the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Cascade {
    pub target: Box<Expression>,
    pub sections: Vec<MethodInvocation>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
    pub span: Span,
    pub static_type: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    StringLiteral(StringLiteral),
    IntegerLiteral(IntegerLiteral),
    BooleanLiteral(bool, Span),
    NullLiteral(Span),
    MapLiteral(MapLiteral),
    Named(NamedExpression),
    InstanceCreation(InstanceCreation),
    MethodInvocation(MethodInvocation),
    PropertyAccess(PropertyAccess),
    Cascade(Cascade),
    Binary(BinaryExpression),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier(node) => node.span,
            Expression::StringLiteral(node) => node.span,
            Expression::IntegerLiteral(node) => node.span,
            Expression::BooleanLiteral(_, span) | Expression::NullLiteral(span) => *span,
            Expression::MapLiteral(node) => node.span,
            Expression::Named(node) => node.span,
            Expression::InstanceCreation(node) => node.span,
            Expression::MethodInvocation(node) => node.span,
            Expression::PropertyAccess(node) => node.span,
            Expression::Cascade(node) => node.span,
            Expression::Binary(node) => node.span,
        }
    }

    pub fn static_type(&self) -> Option<&Type> {
        match self {
            Expression::Identifier(node) => node.static_type.as_ref(),
            Expression::InstanceCreation(node) => node.static_type.as_ref(),
            Expression::MethodInvocation(node) => node.static_type.as_ref(),
            Expression::PropertyAccess(node) => node.property.static_type.as_ref(),
            Expression::Cascade(node) => node.target.static_type(),
            Expression::Binary(node) => node.static_type.as_ref(),
            Expression::Named(node) => node.expression.static_type(),
            Expression::StringLiteral(_)
            | Expression::IntegerLiteral(_)
            | Expression::BooleanLiteral(..)
            | Expression::NullLiteral(_)
            | Expression::MapLiteral(_) => None,
        }
    }

    pub fn best_type(&self) -> Type {
        self.static_type().cloned().unwrap_or(Type::Dynamic)
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(identifier) => Some(identifier),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&StringLiteral> {
        match self {
            Expression::StringLiteral(literal) => Some(literal),
            _ => None,
        }
    }

    pub fn as_map_literal(&self) -> Option<&MapLiteral> {
        match self {
            Expression::MapLiteral(map) => Some(map),
            _ => None,
        }
    }
}

/// `@Name` or `@Name(arguments)`. A bare annotation has no argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: Identifier,
    pub arguments: Option<ArgumentList>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: Identifier,
    pub initializer: Option<Expression>,
    pub span: Span,
}

impl VariableDeclaration {
    pub fn element(&self) -> Option<VariableId> {
        self.name.variable()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarationList {
    pub modifiers: Modifiers,
    pub type_name: Option<TypeName>,
    pub variables: Vec<VariableDeclaration>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredIdentifier {
    pub type_name: Option<TypeName>,
    pub identifier: Identifier,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

/// `for (<loop_variable> in <iterable>) <body>`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStatement {
    pub loop_variable: DeclaredIdentifier,
    pub iterable: Expression,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expression),
    Variables(VariableDeclarationList),
    ForEach(ForEachStatement),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDeclaration {
    pub annotations: Vec<Annotation>,
    pub fields: VariableDeclarationList,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDeclaration {
    pub name: Option<Identifier>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub type_name: Option<TypeName>,
    pub name: Identifier,
}

/// A method, getter or setter.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDeclaration {
    pub annotations: Vec<Annotation>,
    pub kind: MemberKind,
    pub modifiers: Modifiers,
    pub return_type: Option<TypeName>,
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassMember {
    Field(FieldDeclaration),
    Constructor(ConstructorDeclaration),
    Method(MethodDeclaration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub annotations: Vec<Annotation>,
    pub name: Identifier,
    pub superclass: Option<TypeName>,
    pub members: Vec<ClassMember>,
    pub span: Span,
    /// Set by the resolver.
    pub element: Option<ClassId>,
}

impl ClassDeclaration {
    pub fn constructors(&self) -> impl Iterator<Item = &ConstructorDeclaration> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Constructor(constructor) => Some(constructor),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: Identifier,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassDeclaration),
    Function(FunctionDeclaration),
    Variables(VariableDeclarationList),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    pub declarations: Vec<Declaration>,
    pub span: Span,
}

impl CompilationUnit {
    pub fn classes(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.declarations.iter().filter_map(|declaration| match declaration {
            Declaration::Class(class) => Some(class),
            _ => None,
        })
    }

    pub fn class_named(&self, name: &str) -> Option<&ClassDeclaration> {
        self.classes().find(|class| class.name.name == name)
    }

    /// Innermost class declaration whose span covers `offset`.
    pub fn enclosing_class(&self, offset: usize) -> Option<&ClassDeclaration> {
        self.classes().find(|class| class.span.contains(offset))
    }

    /// Variable declaration (top-level or local to any body) whose span covers `offset`.
    pub fn enclosing_variable(&self, offset: usize) -> Option<&VariableDeclaration> {
        self.declarations
            .iter()
            .flat_map(Declaration::variables)
            .find(|variable| variable.span.contains(offset))
    }
}

impl Declaration {
    /// Every variable declared directly by, or inside a body of, this declaration.
    pub fn variables(&self) -> Vec<&VariableDeclaration> {
        let mut found = Vec::new();
        match self {
            Declaration::Variables(list) => found.extend(list.variables.iter()),
            Declaration::Function(function) => function.body.collect_variables(&mut found),
            Declaration::Class(class) => {
                for member in &class.members {
                    match member {
                        ClassMember::Constructor(constructor) => {
                            constructor.body.collect_variables(&mut found)
                        }
                        ClassMember::Method(method) => method.body.collect_variables(&mut found),
                        ClassMember::Field(_) => {}
                    }
                }
            }
        }
        found
    }
}

impl Block {
    fn collect_variables<'a>(&'a self, found: &mut Vec<&'a VariableDeclaration>) {
        for statement in &self.statements {
            match statement {
                Statement::Variables(list) => found.extend(list.variables.iter()),
                Statement::ForEach(for_each) => for_each.body.collect_variables(found),
                Statement::Block(block) => block.collect_variables(found),
                Statement::Expression(_) => {}
            }
        }
    }
}
