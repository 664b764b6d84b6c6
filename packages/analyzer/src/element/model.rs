use crate::selector::Selector;
use host::{ClassId, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyBindingKind {
    /// `@`: the attribute's interpolated string value.
    Attr,
    /// `&`: an expression evaluated on demand.
    Callback,
    /// `=>`: parent to child.
    OneWay,
    /// `=>!`: parent to child, once.
    OneWayOneTime,
    /// `<=>`: both directions.
    TwoWay,
}

impl PropertyBindingKind {
    pub fn marker(&self) -> &'static str {
        match self {
            PropertyBindingKind::Attr => "@",
            PropertyBindingKind::Callback => "&",
            PropertyBindingKind::OneWay => "=>",
            PropertyBindingKind::OneWayOneTime => "=>!",
            PropertyBindingKind::TwoWay => "<=>",
        }
    }
}

impl fmt::Display for PropertyBindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyBindingKind::Attr => "ATTR",
            PropertyBindingKind::Callback => "CALLBACK",
            PropertyBindingKind::OneWay => "ONE_WAY",
            PropertyBindingKind::OneWayOneTime => "ONE_WAY_ONE_TIME",
            PropertyBindingKind::TwoWay => "TWO_WAY",
        };
        write!(f, "{}", name)
    }
}

/// A class member a property binding writes to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRef {
    /// Class declaring the member, which may be a superclass of the bound class.
    pub class: ClassId,
    pub name: String,
    pub name_offset: usize,
}

impl MemberRef {
    pub fn name_span(&self) -> Span {
        Span::at(self.name_offset, self.name.len())
    }
}

/// A public attribute name bound to a member of a component or directive class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyBinding {
    pub public_name: String,
    pub public_name_offset: usize,
    pub kind: PropertyBindingKind,
    pub member_name: String,
    /// Set only when the member was named inside a binding spec string.
    pub member_name_offset: Option<usize>,
    pub resolved_member: Option<MemberRef>,
}

impl PropertyBinding {
    pub fn public_name_span(&self) -> Span {
        Span::at(self.public_name_offset, self.public_name.len())
    }

    pub fn member_name_span(&self) -> Option<Span> {
        self.member_name_offset
            .map(|offset| Span::at(offset, self.member_name.len()))
    }

    /// Whether the binding names the attribute of its owner's own selector (`'.'`).
    pub fn is_selector_binding(&self) -> bool {
        self.public_name == "."
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentElement {
    pub name: String,
    pub name_offset: usize,
    pub selector: Selector,
    pub template_uri: String,
    pub template_uri_offset: usize,
    pub style_uri: String,
    pub style_uri_offset: usize,
    pub properties: Vec<PropertyBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControllerElement {
    pub name: String,
    pub name_offset: usize,
    pub selector: Selector,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveElement {
    pub name: Option<String>,
    pub name_offset: Option<usize>,
    pub selector: Selector,
    pub properties: Vec<PropertyBinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterElement {
    pub name: String,
    pub name_offset: usize,
}

/// Reference to a module class passed to `install`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRef {
    pub class: ClassId,
    pub name: String,
}

/// Reference to a class registered with `type` or `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    pub class: ClassId,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleElement {
    pub child_modules: Vec<ModuleRef>,
    pub key_types: Vec<TypeRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Component,
    Controller,
    Directive,
    Filter,
    Module,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum ToolkitElement {
    Component(ComponentElement),
    Controller(ControllerElement),
    Directive(DirectiveElement),
    Filter(FilterElement),
    Module(ModuleElement),
}

impl ToolkitElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            ToolkitElement::Component(_) => ElementKind::Component,
            ToolkitElement::Controller(_) => ElementKind::Controller,
            ToolkitElement::Directive(_) => ElementKind::Directive,
            ToolkitElement::Filter(_) => ElementKind::Filter,
            ToolkitElement::Module(_) => ElementKind::Module,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ToolkitElement::Component(c) => Some(&c.name),
            ToolkitElement::Controller(c) => Some(&c.name),
            ToolkitElement::Directive(d) => d.name.as_deref(),
            ToolkitElement::Filter(f) => Some(&f.name),
            ToolkitElement::Module(_) => None,
        }
    }

    pub fn name_offset(&self) -> Option<usize> {
        match self {
            ToolkitElement::Component(c) => Some(c.name_offset),
            ToolkitElement::Controller(c) => Some(c.name_offset),
            ToolkitElement::Directive(d) => d.name_offset,
            ToolkitElement::Filter(f) => Some(f.name_offset),
            ToolkitElement::Module(_) => None,
        }
    }

    pub fn name_span(&self) -> Option<Span> {
        Some(Span::at(self.name_offset()?, self.name()?.len()))
    }

    pub fn selector(&self) -> Option<&Selector> {
        match self {
            ToolkitElement::Component(c) => Some(&c.selector),
            ToolkitElement::Controller(c) => Some(&c.selector),
            ToolkitElement::Directive(d) => Some(&d.selector),
            ToolkitElement::Filter(_) | ToolkitElement::Module(_) => None,
        }
    }

    pub fn properties(&self) -> &[PropertyBinding] {
        match self {
            ToolkitElement::Component(c) => &c.properties,
            ToolkitElement::Directive(d) => &d.properties,
            _ => &[],
        }
    }

    pub fn as_component(&self) -> Option<&ComponentElement> {
        match self {
            ToolkitElement::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_controller(&self) -> Option<&ControllerElement> {
        match self {
            ToolkitElement::Controller(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_directive(&self) -> Option<&DirectiveElement> {
        match self {
            ToolkitElement::Directive(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_filter(&self) -> Option<&FilterElement> {
        match self {
            ToolkitElement::Filter(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_module(&self) -> Option<&ModuleElement> {
        match self {
            ToolkitElement::Module(m) => Some(m),
            _ => None,
        }
    }
}
