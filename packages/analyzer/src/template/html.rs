use host::{Expression, Span, Type, VariableId};
use serde::Serialize;

/// A parsed template document. Parsing HTML is up to the caller; the
/// resolver only annotates the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlUnit {
    pub nodes: Vec<HtmlNode>,
}

impl HtmlUnit {
    pub fn new(nodes: Vec<HtmlNode>) -> Self {
        HtmlUnit { nodes }
    }

    /// Depth-first search for the first tag called `name`.
    pub fn find_tag(&self, name: &str) -> Option<&TagNode> {
        find_tag(&self.nodes, name)
    }
}

fn find_tag<'n>(nodes: &'n [HtmlNode], name: &str) -> Option<&'n TagNode> {
    nodes.iter().find_map(|node| match node {
        HtmlNode::Tag(tag) if tag.name == name => Some(tag),
        HtmlNode::Tag(tag) => find_tag(&tag.children, name),
        HtmlNode::Text(_) => None,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    Tag(TagNode),
    Text(TextNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagNode {
    pub name: String,
    pub name_offset: usize,
    pub attributes: Vec<AttributeNode>,
    pub children: Vec<HtmlNode>,
}

impl TagNode {
    pub fn new(name: impl Into<String>, name_offset: usize) -> Self {
        TagNode {
            name: name.into(),
            name_offset,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: AttributeNode) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_child(mut self, child: HtmlNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name_span(&self) -> Span {
        Span::at(self.name_offset, self.name.len())
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeNode> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn attribute_mut(&mut self, name: &str) -> Option<&mut AttributeNode> {
        self.attributes.iter_mut().find(|a| a.name == name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNode {
    pub name: String,
    pub name_offset: usize,
    pub value: Option<String>,
    /// Offset of the value's first character, after the opening quote.
    pub value_offset: Option<usize>,
    /// Resolved expressions found in the value.
    pub expressions: Vec<EmbeddedExpression>,
    /// Variable the attribute declares for its tag's subtree.
    pub variable: Option<TemplateVariable>,
}

impl AttributeNode {
    pub fn new(name: impl Into<String>, name_offset: usize) -> Self {
        AttributeNode {
            name: name.into(),
            name_offset,
            value: None,
            value_offset: None,
            expressions: Vec::new(),
            variable: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>, value_offset: usize) -> Self {
        self.value = Some(value.into());
        self.value_offset = Some(value_offset);
        self
    }

    pub fn name_span(&self) -> Span {
        Span::at(self.name_offset, self.name.len())
    }

    /// Value text, empty for a bare attribute.
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Document offset of `text()[0]`; right after the name for a bare attribute.
    pub fn text_offset(&self) -> usize {
        self.value_offset.unwrap_or(self.name_span().end)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
    pub offset: usize,
    pub expressions: Vec<EmbeddedExpression>,
}

impl TextNode {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        TextNode {
            text: text.into(),
            offset,
            expressions: Vec::new(),
        }
    }
}

/// A host expression embedded in template text, resolved in place.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedExpression {
    pub span: Span,
    pub expression: Expression,
}

impl EmbeddedExpression {
    pub fn new(expression: Expression) -> Self {
        EmbeddedExpression {
            span: expression.span(),
            expression,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVariable {
    pub name: String,
    pub name_offset: usize,
    pub ty: Type,
    pub element: VariableId,
}
