//! Source spans and instance-stamped locations.

use std::fmt;

use crate::ComponentId;

/// Source location span.
///
/// Layout: 8 bytes total
/// - start: u32 - byte offset from file start
/// - end: u32 - byte offset (exclusive)
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Ord, PartialOrd)]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for generated code.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A span plus the component instance a node belongs to.
///
/// Nodes written in source have no container. Cloning a node into an
/// instance stamps the instance on the copy, so diagnostics raised against
/// the copy can name the instance (`Top.radio.queue`) rather than the
/// template.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Location {
    pub span: Span,
    pub container: Option<ComponentId>,
}

impl Location {
    #[inline]
    pub const fn new(span: Span) -> Self {
        Location {
            span,
            container: None,
        }
    }

    /// The same location, stamped with the instance it was cloned into.
    #[inline]
    #[must_use]
    pub const fn in_container(self, container: ComponentId) -> Self {
        Location {
            span: self.span,
            container: Some(container),
        }
    }
}

impl From<Span> for Location {
    fn from(span: Span) -> Self {
        Location::new(span)
    }
}
