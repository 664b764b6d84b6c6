/**
 * Selector parsing and matching
 *
 * Directive and component selectors are either a bare tag name or whatever
 * sits between a leading `[` and a trailing `]`. Anything else is reported
 * as unparsable.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::diagnostics::{AngularCode, Diagnostics};
use crate::template::TagNode;
use host::Span;

/// Tag and attribute names: a letter followed by letters, digits, `-` or `_`.
static SELECTOR_NAME_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][-\w]*$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Selector {
    /// `name`: matches tags called `name`.
    #[serde(rename_all = "camelCase")]
    Tag { name: String, name_offset: usize },
    /// `[name]`: matches any tag carrying attribute `name`.
    #[serde(rename_all = "camelCase")]
    Attribute { name: String, name_offset: usize },
}

impl Selector {
    pub fn name(&self) -> &str {
        match self {
            Selector::Tag { name, .. } | Selector::Attribute { name, .. } => name,
        }
    }

    pub fn name_offset(&self) -> usize {
        match self {
            Selector::Tag { name_offset, .. } | Selector::Attribute { name_offset, .. } => {
                *name_offset
            }
        }
    }

    pub fn name_span(&self) -> Span {
        Span::at(self.name_offset(), self.name().len())
    }

    pub fn matches(&self, tag: &TagNode) -> bool {
        match self {
            Selector::Tag { name, .. } => tag.name == *name,
            Selector::Attribute { name, .. } => tag.has_attribute(name),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Tag { name, .. } => write!(f, "{}", name),
            Selector::Attribute { name, .. } => write!(f, "[{}]", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("cannot parse selector '{0}'")]
    Unsupported(String),
}

/// Parses selector `text` whose first character is at document offset `base_offset`.
pub fn try_parse_selector(base_offset: usize, text: &str) -> Result<Selector, SelectorError> {
    if let Some(inner) = text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        return Ok(Selector::Attribute {
            name: inner.to_string(),
            name_offset: base_offset + 1,
        });
    }
    if SELECTOR_NAME_REGEXP.is_match(text) {
        return Ok(Selector::Tag {
            name: text.to_string(),
            name_offset: base_offset,
        });
    }
    Err(SelectorError::Unsupported(text.to_string()))
}

/// Like [`try_parse_selector`], reporting `CANNOT_PARSE_SELECTOR` over the
/// whole text when it fails.
pub fn parse_selector(
    diagnostics: &mut Diagnostics,
    base_offset: usize,
    text: &str,
) -> Option<Selector> {
    match try_parse_selector(base_offset, text) {
        Ok(selector) => Some(selector),
        Err(error) => {
            tracing::trace!(%error, base_offset, "selector rejected");
            diagnostics.report(
                AngularCode::CannotParseSelector,
                Span::at(base_offset, text.len()),
                &[text],
            );
            None
        }
    }
}
