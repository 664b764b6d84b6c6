use crate::diagnostics::AngularCode;
use crate::element::PropertyBindingKind;
use thiserror::Error;

/// Binding kind markers, longest first so that `=>!` wins over `=>`.
pub const BINDING_MARKERS: &[(&str, PropertyBindingKind)] = &[
    ("<=>", PropertyBindingKind::TwoWay),
    ("=>!", PropertyBindingKind::OneWayOneTime),
    ("=>", PropertyBindingKind::OneWay),
    ("&", PropertyBindingKind::Callback),
    ("@", PropertyBindingKind::Attr),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSpec {
    pub kind: PropertyBindingKind,
    pub member_name: String,
    pub member_name_offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingSpecError {
    #[error("binding spec '{0}' starts with no known kind marker")]
    UnknownKind(String),
    #[error("binding spec '{0}' names no member")]
    MissingMember(String),
}

impl BindingSpecError {
    pub fn code(&self) -> AngularCode {
        match self {
            BindingSpecError::UnknownKind(_) => AngularCode::InvalidPropertyKind,
            BindingSpecError::MissingMember(_) => AngularCode::InvalidPropertySpec,
        }
    }

    pub fn spec(&self) -> &str {
        match self {
            BindingSpecError::UnknownKind(spec) | BindingSpecError::MissingMember(spec) => spec,
        }
    }
}

/// Splits a binding spec into kind and member name.
///
/// `literal_offset` is the offset of the literal's opening quote, so the member
/// name starts at `literal_offset + marker.len() + 1`.
pub fn parse_binding_spec(literal_offset: usize, spec: &str) -> Result<BindingSpec, BindingSpecError> {
    let Some((marker, kind)) = BINDING_MARKERS
        .iter()
        .find(|(marker, _)| spec.starts_with(marker))
    else {
        return Err(BindingSpecError::UnknownKind(spec.to_string()));
    };
    let member_name = &spec[marker.len()..];
    if member_name.is_empty() {
        return Err(BindingSpecError::MissingMember(spec.to_string()));
    }
    Ok(BindingSpec {
        kind: *kind,
        member_name: member_name.to_string(),
        member_name_offset: literal_offset + marker.len() + 1,
    })
}
