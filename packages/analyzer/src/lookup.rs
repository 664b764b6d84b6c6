//! Offset to element lookup for navigation and hover.
//!
//! Names in the element model live inside string literals. A query matches a
//! name when its offset falls anywhere in the literal text around it, from the
//! opening quote (or binding marker) through the closing quote.

use crate::element::{
    DeclarationKey, ElementKind, MemberRef, PropertyBinding, ToolkitElement, UnitModel,
};
use crate::selector::Selector;
use host::{CompilationUnit, Span};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupMatch<'m> {
    Element(&'m ToolkitElement),
    Property(&'m PropertyBinding),
    Member(&'m MemberRef),
    Selector(&'m Selector),
}

pub struct ElementLookup<'m> {
    unit: &'m CompilationUnit,
    model: &'m UnitModel,
}

impl<'m> ElementLookup<'m> {
    pub fn new(unit: &'m CompilationUnit, model: &'m UnitModel) -> Self {
        ElementLookup { unit, model }
    }

    /// Declaration whose elements are candidates at `offset`: the innermost
    /// local variable declaration, else the enclosing class.
    pub fn declaration_at(&self, offset: usize) -> Option<DeclarationKey> {
        if let Some(id) = self
            .unit
            .enclosing_variable(offset)
            .and_then(|variable| variable.element())
        {
            if !self.model.variable_elements(id).is_empty() {
                return Some(DeclarationKey::Variable(id));
            }
        }
        let class = self.unit.enclosing_class(offset)?;
        class.element.map(DeclarationKey::Class)
    }

    /// Most specific match at `offset`: a bound member name, then a property
    /// public name, then a selector name, then an element name.
    pub fn find(&self, offset: usize) -> Option<LookupMatch<'m>> {
        let key = self.declaration_at(offset)?;
        let elements = self.model.elements(key);
        elements
            .iter()
            .find_map(|element| match_properties(element, offset))
            .or_else(|| {
                elements.iter().find_map(|element| {
                    let selector = element.selector()?;
                    covers(selector_literal(selector), offset).then_some(LookupMatch::Selector(selector))
                })
            })
            .or_else(|| {
                elements.iter().find_map(|element| {
                    let span = element.name_span()?;
                    covers(quoted(span, 1), offset).then_some(LookupMatch::Element(element))
                })
            })
    }

    /// The element of `kind` on the declaration at `offset`, if any.
    pub fn find_kind(&self, offset: usize, kind: ElementKind) -> Option<&'m ToolkitElement> {
        let key = self.declaration_at(offset)?;
        self.model.element(key, kind)
    }
}

fn match_properties(element: &ToolkitElement, offset: usize) -> Option<LookupMatch<'_>> {
    let properties = element.properties();
    let member = properties.iter().find_map(|property| {
        let member = property.resolved_member.as_ref()?;
        let span = property.member_name_span()?;
        covers(quoted(span, property.kind.marker().len() + 1), offset).then_some(LookupMatch::Member(member))
    });
    member.or_else(|| {
        properties
            .iter()
            .find(|property| covers(quoted(property.public_name_span(), 1), offset))
            .map(LookupMatch::Property)
    })
}

fn selector_literal(selector: &Selector) -> Span {
    match selector {
        Selector::Tag { .. } => quoted(selector.name_span(), 1),
        Selector::Attribute { .. } => quoted(selector.name_span(), 2),
    }
}

/// `span` widened by the `prefix` characters before it and one closing character.
fn quoted(span: Span, prefix: usize) -> Span {
    Span::new(span.offset.saturating_sub(prefix), span.end + 1)
}

fn covers(span: Span, offset: usize) -> bool {
    span.offset <= offset && offset < span.end
}
