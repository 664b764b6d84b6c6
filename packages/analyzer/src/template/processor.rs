use super::directive::{BindingProcessor, ControllerProcessor};
use super::expression::ExpressionProcessor;
use super::context::{Fragment, TemplateHost};
use super::html::{EmbeddedExpression, TagNode};
use super::repeat::RepeatProcessor;
use crate::config::AnalyzerOptions;
use crate::diagnostics::AngularCode;
use crate::element::{DeclarationKey, ToolkitElement, UnitModel};
use host::TokenStream;
use indexmap::IndexMap;
use std::sync::Arc;

/// Template-side behavior of one directive.
///
/// Processors are stateless and shared across templates analyzed in parallel.
pub trait DirectiveProcessor: Send + Sync {
    fn can_apply(&self, tag: &TagNode) -> bool;

    fn apply(&self, host: &mut dyn TemplateHost, tag: &mut TagNode);
}

/// Processors keyed by the attribute or tag name that triggers them, in
/// registration order.
#[derive(Default, Clone)]
pub struct ProcessorRegistry {
    processors: IndexMap<String, Vec<Arc<dyn DirectiveProcessor>>>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The framework's own attributes: the repeat directive and plain
    /// expression attributes.
    pub fn with_builtins(options: &AnalyzerOptions) -> Self {
        let mut registry = Self::new();
        registry.register_builtins(options);
        registry
    }

    /// Processors for the elements of `models`, followed by the builtins, so
    /// that controller variables are visible to builtin attributes on the same tag.
    pub fn for_models<'m>(
        options: &AnalyzerOptions,
        models: impl IntoIterator<Item = &'m UnitModel>,
    ) -> Self {
        let mut registry = Self::new();
        for model in models {
            registry.register_model(model);
        }
        registry.register_builtins(options);
        registry
    }

    pub fn register_builtins(&mut self, options: &AnalyzerOptions) {
        self.register(
            options.repeat_attribute.clone(),
            Arc::new(RepeatProcessor::new(options.repeat_attribute.clone())),
        );
        for attribute in &options.expression_attributes {
            self.register(
                attribute.clone(),
                Arc::new(ExpressionProcessor::new(attribute.clone())),
            );
        }
    }

    /// Registers controllers, components and directives found in `model`.
    pub fn register_model(&mut self, model: &UnitModel) {
        for (key, element) in model.iter() {
            let DeclarationKey::Class(class) = key else {
                continue;
            };
            match element {
                ToolkitElement::Controller(controller) => self.register(
                    controller.selector.to_string(),
                    Arc::new(ControllerProcessor::new(controller, class)),
                ),
                ToolkitElement::Component(component) => self.register(
                    component.selector.to_string(),
                    Arc::new(BindingProcessor::new(
                        component.selector.clone(),
                        component.properties.clone(),
                    )),
                ),
                ToolkitElement::Directive(directive) => self.register(
                    directive.selector.to_string(),
                    Arc::new(BindingProcessor::new(
                        directive.selector.clone(),
                        directive.properties.clone(),
                    )),
                ),
                ToolkitElement::Filter(_) | ToolkitElement::Module(_) => {}
            }
        }
    }

    pub fn register(&mut self, key: impl Into<String>, processor: Arc<dyn DirectiveProcessor>) {
        self.processors.entry(key.into()).or_default().push(processor);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.processors.contains_key(key)
    }

    /// Number of registered processors.
    pub fn len(&self) -> usize {
        self.processors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Processors that apply to `tag`, in registration order.
    pub fn processors_for(&self, tag: &TagNode) -> Vec<Arc<dyn DirectiveProcessor>> {
        self.processors
            .values()
            .flatten()
            .filter(|processor| processor.can_apply(tag))
            .cloned()
            .collect()
    }
}

/// Parses and resolves `text[start..end]` as a single expression.
pub fn resolve_expression_text(
    host: &mut dyn TemplateHost,
    text: &str,
    start: usize,
    end: usize,
    base_offset: usize,
) -> EmbeddedExpression {
    let mut tokens = host.scan(text, start, end, base_offset);
    let mut expression = host.parse_expression(&mut tokens);
    report_trailing_tokens(host, &tokens);
    host.resolve_node(Fragment::Expression(&mut expression));
    EmbeddedExpression::new(expression)
}

/// Reports the first unconsumed token of a fully parsed expression.
pub(crate) fn report_trailing_tokens(host: &mut dyn TemplateHost, tokens: &TokenStream) {
    if tokens.is_at_end() {
        return;
    }
    let token = tokens.current();
    let message = format!("Unexpected token '{}'", token.lexeme);
    host.report_error(token.span, AngularCode::ExpressionSyntax, &[&message]);
}

/// Resolves every interpolation in `text`, whose first character is at `offset`.
///
/// An opening delimiter with no closing one ends the search.
pub fn resolve_interpolations(
    host: &mut dyn TemplateHost,
    text: &str,
    offset: usize,
) -> Vec<EmbeddedExpression> {
    let (open, close) = {
        let interpolation = &host.options().interpolation;
        (interpolation.start.clone(), interpolation.end.clone())
    };
    let mut expressions = Vec::new();
    if open.is_empty() || close.is_empty() {
        return expressions;
    }
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(&open) {
        let start = cursor + found + open.len();
        let Some(length) = text[start..].find(&close) else {
            break;
        };
        let end = start + length;
        expressions.push(resolve_expression_text(host, text, start, end, offset + start));
        cursor = end + close.len();
    }
    expressions
}
