//! Helpers shared by the unit tests.

use specguard_spec_parser::{parse_document, Document};

use crate::rules::Rule;
use crate::walker::DiffWalker;

/// Parse an inline YAML document, panicking on malformed fixtures.
pub(crate) fn document(yaml: &str) -> Document {
    parse_document(yaml).expect("test document should parse")
}

/// Walk `old` against `new` with a single fresh rule and return its errors.
pub(crate) fn run<R: Rule>(mut rule: R, old: &Document, new: &Document) -> Vec<String> {
    DiffWalker::new().walk(&mut rule, old, new);
    rule.errors()
}
