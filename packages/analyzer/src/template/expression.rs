use super::context::TemplateHost;
use super::html::TagNode;
use super::processor::{resolve_expression_text, DirectiveProcessor};

/// An attribute whose whole value is one host expression, such as `ng-click`.
pub struct ExpressionProcessor {
    attribute: String,
}

impl ExpressionProcessor {
    pub fn new(attribute: impl Into<String>) -> Self {
        ExpressionProcessor {
            attribute: attribute.into(),
        }
    }
}

impl DirectiveProcessor for ExpressionProcessor {
    fn can_apply(&self, tag: &TagNode) -> bool {
        tag.has_attribute(&self.attribute)
    }

    fn apply(&self, host: &mut dyn TemplateHost, tag: &mut TagNode) {
        let Some(attribute) = tag.attribute_mut(&self.attribute) else {
            return;
        };
        if attribute.text().trim().is_empty() {
            return;
        }
        let text = attribute.text().to_string();
        let expression = resolve_expression_text(host, &text, 0, text.len(), attribute.text_offset());
        attribute.expressions = vec![expression];
    }
}
