//! Backwards compatibility checks between two versions of a Swagger document.
//!
//! [`DiffWalker`] walks an old and a new [`Document`] in lock-step and drives a
//! [`DiffVisitor`]. The [`rules`] are visitors that record a violation for each
//! change that would break a client built against the old document.
//!
//! # Usage
//!
//! ```ignore
//! use specguard_diff::{default_rules, DiffWalker, Rule};
//!
//! let mut rules = default_rules();
//! DiffWalker::new().walk(&mut rules, &old, &new);
//! for error in rules.errors() {
//!     eprintln!("{}", error);
//! }
//! ```

pub mod location;
pub mod rules;
pub mod visitor;
pub mod walker;

#[cfg(test)]
mod test_support;

pub use location::Location;
pub use rules::{default_rules, CompositeRule, Rule, Violations};
pub use visitor::DiffVisitor;
pub use walker::DiffWalker;

use specguard_spec_parser::Document;

/// Compare `old` and `new` with the default rules and return every violation.
///
/// An empty result means `new` is backwards compatible with `old`.
pub fn check_compatibility(old: &Document, new: &Document) -> Vec<String> {
    let mut rules = default_rules();
    DiffWalker::new().walk(&mut rules, old, new);

    let errors = rules.errors();
    tracing::debug!(violations = errors.len(), "compatibility check complete");
    errors
}
