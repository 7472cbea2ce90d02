//! Backwards compatibility rules.
//!
//! Two documents are deemed compatible when none of the rules reports a
//! violation while the walker visits them. Each rule looks at one concern and
//! only overrides the [`DiffVisitor`] callbacks it needs.

mod added_enum_value_in_response;
mod added_required_request_parameter;
mod composite;
mod parameter_location_changed;
mod property_removed_in_response;
mod property_type_changed;
mod removed_enum_value_in_request;
mod removed_operation;

use std::fmt;

pub use added_enum_value_in_response::AddedEnumValueInResponseRule;
pub use added_required_request_parameter::AddedRequiredRequestParameterRule;
pub use composite::CompositeRule;
pub use parameter_location_changed::ParameterLocationChangedRule;
pub use property_removed_in_response::PropertyRemovedInResponseRule;
pub use property_type_changed::PropertyTypeChangedRule;
pub use removed_enum_value_in_request::RemovedEnumValueInRequestRule;
pub use removed_operation::RemovedOperationRule;

use crate::location::Location;
use crate::visitor::DiffVisitor;

/// A compatibility check evaluated during a walk.
///
/// A rule accumulates violations for one walk and is not meant to be reused
/// for another document pair.
pub trait Rule: DiffVisitor {
    /// Stable kebab-case identifier.
    fn name(&self) -> &'static str;

    /// Violations found so far, in the order they were reported.
    fn errors(&self) -> Vec<String>;
}

/// Violation messages, each prefixed with the location it was found at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    /// Record `message` as `"<location> : <message>"`.
    pub fn add(&mut self, location: &Location, message: impl fmt::Display) {
        self.messages
            .push(format!("{} : {}", location.full_location(), message));
    }

    pub fn as_slice(&self) -> &[String] {
        &self.messages
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.messages.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

/// The full rule set, in the order their violations are reported.
pub fn default_rules() -> CompositeRule {
    CompositeRule::new()
        .with(AddedEnumValueInResponseRule::default())
        .with(AddedRequiredRequestParameterRule::default())
        .with(ParameterLocationChangedRule::default())
        .with(PropertyRemovedInResponseRule::default())
        .with(PropertyTypeChangedRule::default())
        .with(RemovedEnumValueInRequestRule::default())
        .with(RemovedOperationRule::default())
}
