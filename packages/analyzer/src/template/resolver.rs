use super::context::TemplateContext;
use super::html::{HtmlNode, HtmlUnit, TagNode, TextNode};
use super::processor::{resolve_interpolations, ProcessorRegistry};
use crate::config::AnalyzerOptions;
use crate::diagnostics::Diagnostics;
use crate::element::ComponentElement;
use host::{ClassId, Type, TypeTable, VariableId};

/// Walks a template, applying directive processors tag by tag.
///
/// Each tag opens a scope. Variables its processors define are visible to the
/// rest of that tag and to its children, never to siblings.
pub struct HtmlUnitResolver<'r, 't> {
    context: TemplateContext<'t>,
    registry: &'r ProcessorRegistry,
}

impl<'r, 't> HtmlUnitResolver<'r, 't> {
    pub fn new(
        types: &'t mut TypeTable,
        options: &'t AnalyzerOptions,
        registry: &'r ProcessorRegistry,
    ) -> Self {
        HtmlUnitResolver {
            context: TemplateContext::new(types, options),
            registry,
        }
    }

    /// Resolver for a component's template, with the component instance
    /// published under its `publishAs` name.
    pub fn for_component(
        types: &'t mut TypeTable,
        options: &'t AnalyzerOptions,
        registry: &'r ProcessorRegistry,
        component: &ComponentElement,
        class: ClassId,
    ) -> Self {
        let mut resolver = Self::new(types, options, registry);
        resolver.define_variable(&component.name, component.name_offset, Type::interface(class));
        resolver
    }

    /// Defines a variable visible to the whole template.
    pub fn define_variable(&mut self, name: &str, offset: usize, ty: Type) -> VariableId {
        self.context.add_variable(name, offset, ty)
    }

    pub fn resolve(mut self, unit: &mut HtmlUnit) -> Diagnostics {
        tracing::debug!(nodes = unit.nodes.len(), "resolving template");
        self.visit_nodes(&mut unit.nodes);
        self.context.into_diagnostics()
    }

    fn visit_nodes(&mut self, nodes: &mut [HtmlNode]) {
        for node in nodes {
            match node {
                HtmlNode::Tag(tag) => self.visit_tag(tag),
                HtmlNode::Text(text) => self.visit_text(text),
            }
        }
    }

    fn visit_tag(&mut self, tag: &mut TagNode) {
        self.context.push_scope();
        let processors = self.registry.processors_for(tag);
        if !processors.is_empty() {
            tracing::debug!(tag = %tag.name, processors = processors.len(), "applying directive processors");
        }
        for processor in processors {
            processor.apply(&mut self.context, tag);
        }
        self.visit_nodes(&mut tag.children);
        self.context.pop_scope();
    }

    fn visit_text(&mut self, text: &mut TextNode) {
        let content = text.text.clone();
        text.expressions = resolve_interpolations(&mut self.context, &content, text.offset);
    }
}
