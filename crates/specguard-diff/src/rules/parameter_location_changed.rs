use specguard_spec_parser::Parameter;

use super::{Rule, Violations};
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Changing the location of a request parameter is a backwards incompatible
/// change.
///
/// For instance, moving a parameter from the `header` to the `query` is
/// reported. Parameters are paired by name only.
#[derive(Debug, Default)]
pub struct ParameterLocationChangedRule {
    violations: Violations,
}

impl DiffVisitor for ParameterLocationChangedRule {
    fn accept_parameter(
        &mut self,
        location: &Location,
        left: Option<&Parameter>,
        right: Option<&Parameter>,
    ) {
        // One-sided pairs are other rules' business.
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        if left.location != right.location {
            self.violations.add(
                location,
                format!(
                    "The location of parameter '{}' has changed in the new spec: '{}' previously was '{}'.",
                    left.name, right.location, left.location
                ),
            );
        }
    }
}

impl Rule for ParameterLocationChangedRule {
    fn name(&self) -> &'static str {
        "parameter-location-changed"
    }

    fn errors(&self) -> Vec<String> {
        self.violations.to_vec()
    }
}
