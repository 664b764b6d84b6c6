use serde::Serialize;
use std::fmt;

/// Half-open source range `[offset, end)` in the text of a compilation unit or
/// template document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub offset: usize,
    pub end: usize,
}

impl Span {
    pub fn new(offset: usize, end: usize) -> Self {
        Span { offset, end }
    }

    pub fn at(offset: usize, len: usize) -> Self {
        Span {
            offset,
            end: offset + len,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inclusive at both ends so a caret placed right after a name still hits it.
    pub fn contains(&self, offset: usize) -> bool {
        self.offset <= offset && offset <= self.end
    }

    pub fn cover(&self, other: Span) -> Span {
        Span {
            offset: self.offset.min(other.offset),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.offset, self.end)
    }
}
