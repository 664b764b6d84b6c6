//! Host-language interfaces and AST shapes consumed by the Angular analyzer.
//! This crate serves as the shared compatibility layer between the analyzer and
//! the language front end: resolved types, the AST, and a reference scanner,
//! expression parser and scope resolver. The `testing` feature adds AST
//! builders for tests.

pub mod ast;
#[cfg(any(test, feature = "testing"))]
pub mod factory;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod span;
pub mod types;

pub use ast::*;
pub use parser::{ExpressionParser, ParseError};
pub use resolver::Resolver;
pub use scanner::{scan, Keyword, Token, TokenKind, TokenStream};
pub use span::Span;
pub use types::*;
