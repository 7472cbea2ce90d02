//! Breadcrumb of the walker's position in the document pair.

use std::fmt;

/// Position in a Swagger document pair.
///
/// A stack of human-readable segments (`"Path /pet"`, `"Operation POST"`, ...)
/// plus flags telling whether the current node sits under a request parameter
/// or under a response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    segments: Vec<String>,
    request: bool,
    response: bool,
}

impl Location {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_path(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop_path(&mut self) -> Option<String> {
        self.segments.pop()
    }

    pub fn set_request(&mut self, request: bool) {
        self.request = request;
    }

    pub fn set_response(&mut self, response: bool) {
        self.response = response;
    }

    /// True while walking a parameter and its body schema.
    pub fn is_request(&self) -> bool {
        self.request
    }

    /// True while walking a response and its schema.
    pub fn is_response(&self) -> bool {
        self.response
    }

    /// Number of segments currently pushed.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Outermost to innermost segment, joined by `", "`.
    pub fn full_location(&self) -> String {
        self.segments.join(", ")
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_location())
    }
}
