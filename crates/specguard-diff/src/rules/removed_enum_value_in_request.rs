use super::{Rule, Violations};
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Removing an enum value from a request is incompatible: a request valid
/// against the old spec, carrying the removed value, is now rejected.
#[derive(Debug, Default)]
pub struct RemovedEnumValueInRequestRule {
    violations: Violations,
}

impl DiffVisitor for RemovedEnumValueInRequestRule {
    fn accept_enum_value(&mut self, location: &Location, left: Option<&str>, right: Option<&str>) {
        if let (Some(value), None) = (left, right) {
            if location.is_request() {
                self.violations.add(
                    location,
                    format!("The enum value '{}' has been removed in the new spec.", value),
                );
            }
        }
    }
}

impl Rule for RemovedEnumValueInRequestRule {
    fn name(&self) -> &'static str {
        "removed-enum-value-in-request"
    }

    fn errors(&self) -> Vec<String> {
        self.violations.to_vec()
    }
}
