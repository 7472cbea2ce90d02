use specguard_spec_parser::{HttpMethod, Operation, Path};

use super::{Rule, Violations};
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Removing endpoints is a backwards incompatible change as existing clients
/// could keep calling now missing endpoints.
///
/// A removed path is reported once; the walker does not descend into its
/// operations.
#[derive(Debug, Default)]
pub struct RemovedOperationRule {
    violations: Violations,
}

impl DiffVisitor for RemovedOperationRule {
    fn accept_path(
        &mut self,
        location: &Location,
        _key: &str,
        _left: Option<&Path>,
        right: Option<&Path>,
    ) {
        if right.is_none() {
            self.violations
                .add(location, "The path was removed in the new spec.");
        }
    }

    fn accept_operation(
        &mut self,
        location: &Location,
        _method: HttpMethod,
        _left: Option<&Operation>,
        right: Option<&Operation>,
    ) {
        if right.is_none() {
            self.violations
                .add(location, "The operation was removed in the new spec.");
        }
    }
}

impl Rule for RemovedOperationRule {
    fn name(&self) -> &'static str {
        "removed-operation"
    }

    fn errors(&self) -> Vec<String> {
        self.violations.to_vec()
    }
}
