//! Bold span positions.

use serde::{Deserialize, Serialize};

/// A half-open interval of bold text, in character offsets.
///
/// `start` points at the opening `<b>` marker, `end` at the matching
/// `</b>`. Offsets count characters, not bytes, so they stay valid for
/// multi-byte text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Character offset of the opening marker
    pub start: usize,

    /// Character offset of the closing marker
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check whether an offset falls strictly inside the span.
    ///
    /// Used to decide whether a line break splits the span: offsets at
    /// either marker do not count as inside.
    pub fn surrounds(&self, offset: usize) -> bool {
        self.start < offset && offset < self.end
    }
}
