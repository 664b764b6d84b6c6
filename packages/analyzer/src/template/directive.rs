use super::context::TemplateHost;
use super::html::{TagNode, TemplateVariable};
use super::processor::{resolve_expression_text, resolve_interpolations, DirectiveProcessor};
use crate::element::{ControllerElement, PropertyBinding, PropertyBindingKind};
use crate::selector::Selector;
use host::{ClassId, Identifier, Type};

/// Publishes a controller instance under its `publishAs` name for the
/// matched tag's subtree.
pub struct ControllerProcessor {
    selector: Selector,
    name: String,
    class: ClassId,
}

impl ControllerProcessor {
    pub fn new(controller: &ControllerElement, class: ClassId) -> Self {
        ControllerProcessor {
            selector: controller.selector.clone(),
            name: controller.name.clone(),
            class,
        }
    }
}

impl DirectiveProcessor for ControllerProcessor {
    fn can_apply(&self, tag: &TagNode) -> bool {
        self.selector.matches(tag)
    }

    fn apply(&self, host: &mut dyn TemplateHost, tag: &mut TagNode) {
        let ty = Type::interface(self.class);
        let mut identifier = Identifier::new(self.name.as_str(), tag.name_offset);
        let variable = host.declare_variable(&mut identifier);
        host.set_variable_type(variable, ty.clone());
        host.define_variable(variable);
        if let Selector::Attribute { name, .. } = &self.selector {
            let name_offset = tag.name_offset;
            if let Some(attribute) = tag.attribute_mut(name) {
                attribute.variable = Some(TemplateVariable {
                    name: self.name.clone(),
                    name_offset,
                    ty,
                    element: variable,
                });
            }
        }
    }
}

/// Resolves the attributes bound to properties of a component or directive.
///
/// `@` bindings hold interpolated text; every other kind holds one expression.
pub struct BindingProcessor {
    selector: Selector,
    properties: Vec<PropertyBinding>,
}

impl BindingProcessor {
    pub fn new(selector: Selector, properties: Vec<PropertyBinding>) -> Self {
        BindingProcessor {
            selector,
            properties,
        }
    }

    fn attribute_name<'p>(&'p self, property: &'p PropertyBinding) -> &'p str {
        if property.is_selector_binding() {
            self.selector.name()
        } else {
            &property.public_name
        }
    }
}

impl DirectiveProcessor for BindingProcessor {
    fn can_apply(&self, tag: &TagNode) -> bool {
        self.selector.matches(tag)
    }

    fn apply(&self, host: &mut dyn TemplateHost, tag: &mut TagNode) {
        for property in &self.properties {
            let Some(attribute) = tag.attribute_mut(self.attribute_name(property)) else {
                continue;
            };
            let text = attribute.text().to_string();
            let offset = attribute.text_offset();
            attribute.expressions = match property.kind {
                PropertyBindingKind::Attr => resolve_interpolations(host, &text, offset),
                _ if text.trim().is_empty() => Vec::new(),
                _ => vec![resolve_expression_text(host, &text, 0, text.len(), offset)],
            };
        }
    }
}
