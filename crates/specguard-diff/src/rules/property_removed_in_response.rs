use specguard_spec_parser::Property;

use super::{Rule, Violations};
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Removing a property from a response breaks clients built against the old
/// spec, which expect the property to be present.
///
/// Removing a property from a request schema is compatible.
#[derive(Debug, Default)]
pub struct PropertyRemovedInResponseRule {
    violations: Violations,
}

impl DiffVisitor for PropertyRemovedInResponseRule {
    fn accept_property(
        &mut self,
        location: &Location,
        key: &str,
        _left: Option<&Property>,
        right: Option<&Property>,
    ) {
        if right.is_none() && location.is_response() {
            self.violations.add(
                location,
                format!("The property '{}' has been removed in the new spec.", key),
            );
        }
    }
}

impl Rule for PropertyRemovedInResponseRule {
    fn name(&self) -> &'static str {
        "property-removed-in-response"
    }

    fn errors(&self) -> Vec<String> {
        self.violations.to_vec()
    }
}
