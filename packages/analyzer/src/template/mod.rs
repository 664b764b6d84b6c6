//! Template resolution.
//!
//! Templates are HTML trees whose attributes and text embed host-language
//! expressions. Directive processors resolve those expressions and declare
//! the variables that tags introduce for their subtrees.

mod context;
mod directive;
mod expression;
mod html;
mod processor;
mod repeat;
mod resolver;

pub use context::{Fragment, TemplateContext, TemplateHost};
pub use directive::{BindingProcessor, ControllerProcessor};
pub use expression::ExpressionProcessor;
pub use html::{
    AttributeNode, EmbeddedExpression, HtmlNode, HtmlUnit, TagNode, TemplateVariable, TextNode,
};
pub use processor::{
    resolve_expression_text, resolve_interpolations, DirectiveProcessor, ProcessorRegistry,
};
pub use repeat::RepeatProcessor;
pub use resolver::HtmlUnitResolver;
