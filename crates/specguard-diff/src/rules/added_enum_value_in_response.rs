use super::{Rule, Violations};
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Adding an enum value to a response is incompatible: clients built against
/// the old spec do not recognize the new value.
#[derive(Debug, Default)]
pub struct AddedEnumValueInResponseRule {
    violations: Violations,
}

impl DiffVisitor for AddedEnumValueInResponseRule {
    fn accept_enum_value(&mut self, location: &Location, left: Option<&str>, right: Option<&str>) {
        if let (None, Some(value)) = (left, right) {
            if location.is_response() {
                self.violations.add(
                    location,
                    format!("The enum value '{}' has been added in the new spec.", value),
                );
            }
        }
    }
}

impl Rule for AddedEnumValueInResponseRule {
    fn name(&self) -> &'static str {
        "added-enum-value-in-response"
    }

    fn errors(&self) -> Vec<String> {
        self.violations.to_vec()
    }
}
