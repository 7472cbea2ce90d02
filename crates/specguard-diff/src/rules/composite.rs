use std::fmt;

use specguard_spec_parser::{HttpMethod, Model, Operation, Parameter, Path, Property, Response};

use super::Rule;
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Fans every callback out to a list of rules so that a single walk
/// evaluates all of them.
///
/// Errors are the concatenation of each child's errors, children in the
/// order they were added.
#[derive(Default)]
pub struct CompositeRule {
    rules: Vec<Box<dyn Rule>>,
}

impl CompositeRule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule.
    pub fn with(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Errors grouped by the rule that reported them, skipping silent rules.
    pub fn errors_by_rule(&self) -> Vec<(&'static str, Vec<String>)> {
        self.rules
            .iter()
            .map(|r| (r.name(), r.errors()))
            .filter(|(_, errors)| !errors.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for CompositeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeRule")
            .field("rules", &self.names())
            .finish()
    }
}

impl FromIterator<Box<dyn Rule>> for CompositeRule {
    fn from_iter<I: IntoIterator<Item = Box<dyn Rule>>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl DiffVisitor for CompositeRule {
    fn accept_path(
        &mut self,
        location: &Location,
        key: &str,
        left: Option<&Path>,
        right: Option<&Path>,
    ) {
        for rule in &mut self.rules {
            rule.accept_path(location, key, left, right);
        }
    }

    fn accept_operation(
        &mut self,
        location: &Location,
        method: HttpMethod,
        left: Option<&Operation>,
        right: Option<&Operation>,
    ) {
        for rule in &mut self.rules {
            rule.accept_operation(location, method, left, right);
        }
    }

    fn accept_parameter(
        &mut self,
        location: &Location,
        left: Option<&Parameter>,
        right: Option<&Parameter>,
    ) {
        for rule in &mut self.rules {
            rule.accept_parameter(location, left, right);
        }
    }

    fn accept_response(
        &mut self,
        location: &Location,
        key: &str,
        left: Option<&Response>,
        right: Option<&Response>,
    ) {
        for rule in &mut self.rules {
            rule.accept_response(location, key, left, right);
        }
    }

    fn accept_model(&mut self, location: &Location, left: Option<&Model>, right: Option<&Model>) {
        for rule in &mut self.rules {
            rule.accept_model(location, left, right);
        }
    }

    fn accept_property(
        &mut self,
        location: &Location,
        key: &str,
        left: Option<&Property>,
        right: Option<&Property>,
    ) {
        for rule in &mut self.rules {
            rule.accept_property(location, key, left, right);
        }
    }

    fn accept_enum_value(&mut self, location: &Location, left: Option<&str>, right: Option<&str>) {
        for rule in &mut self.rules {
            rule.accept_enum_value(location, left, right);
        }
    }
}

impl Rule for CompositeRule {
    fn name(&self) -> &'static str {
        "composite"
    }

    fn errors(&self) -> Vec<String> {
        self.rules.iter().flat_map(|r| r.errors()).collect()
    }
}
