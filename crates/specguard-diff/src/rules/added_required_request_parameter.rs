use specguard_spec_parser::{Parameter, Property};

use super::{Rule, Violations};
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Adding a required parameter, or a required property to a request body,
/// makes requests built against the old spec fail.
#[derive(Debug, Default)]
pub struct AddedRequiredRequestParameterRule {
    violations: Violations,
}

impl DiffVisitor for AddedRequiredRequestParameterRule {
    fn accept_parameter(
        &mut self,
        location: &Location,
        left: Option<&Parameter>,
        right: Option<&Parameter>,
    ) {
        if let (None, Some(right)) = (left, right) {
            if right.required {
                self.violations.add(
                    location,
                    format!(
                        "The required parameter '{}' has been added in the new spec.",
                        right.name
                    ),
                );
            }
        }
    }

    fn accept_property(
        &mut self,
        location: &Location,
        key: &str,
        left: Option<&Property>,
        right: Option<&Property>,
    ) {
        if let (None, Some(right)) = (left, right) {
            if right.required && location.is_request() {
                self.violations.add(
                    location,
                    format!("The required property '{}' has been added in the new spec.", key),
                );
            }
        }
    }
}

impl Rule for AddedRequiredRequestParameterRule {
    fn name(&self) -> &'static str {
        "added-required-request-parameter"
    }

    fn errors(&self) -> Vec<String> {
        self.violations.to_vec()
    }
}
