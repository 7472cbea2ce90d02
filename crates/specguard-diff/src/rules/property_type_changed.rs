use specguard_spec_parser::{Model, Property};

use super::{Rule, Violations};
use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Changing the type or format of a schema or property is incompatible in
/// both directions: old clients send values the service no longer accepts,
/// and receive values they cannot parse.
#[derive(Debug, Default)]
pub struct PropertyTypeChangedRule {
    violations: Violations,
}

/// Absent type or format as printed in messages.
fn or_null(value: Option<&str>) -> &str {
    value.unwrap_or("null")
}

impl DiffVisitor for PropertyTypeChangedRule {
    fn accept_model(&mut self, location: &Location, left: Option<&Model>, right: Option<&Model>) {
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        let (left_type, right_type) = (left.type_name(), right.type_name());
        if left_type != right_type {
            self.violations.add(
                location,
                format!(
                    "The type changed in the new spec: '{}' was previously '{}'.",
                    or_null(right_type),
                    or_null(left_type)
                ),
            );
        }

        if let (Model::Object(left), Model::Object(right)) = (left, right) {
            if left.format != right.format {
                self.violations.add(
                    location,
                    format!(
                        "The format changed in the new spec: '{}' was previously '{}'.",
                        or_null(right.format.as_deref()),
                        or_null(left.format.as_deref())
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
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        if left.type_name() != right.type_name() {
            self.violations.add(
                location,
                format!(
                    "The type of property '{}' has changed in the new spec: '{}' was previously '{}'.",
                    key,
                    or_null(right.type_name()),
                    or_null(left.type_name())
                ),
            );
        }

        if left.format() != right.format() {
            self.violations.add(
                location,
                format!(
                    "The format of property '{}' has changed in the new spec: '{}' was previously '{}'.",
                    key,
                    or_null(right.format()),
                    or_null(left.format())
                ),
            );
        }
    }
}

impl Rule for PropertyTypeChangedRule {
    fn name(&self) -> &'static str {
        "property-type-changed"
    }

    fn errors(&self) -> Vec<String> {
        self.violations.to_vec()
    }
}
