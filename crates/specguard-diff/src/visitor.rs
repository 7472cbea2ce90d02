//! Diff visitor for the node kinds found in a Swagger document.

use specguard_spec_parser::{HttpMethod, Model, Operation, Parameter, Path, Property, Response};

use crate::location::Location;

/// Callbacks invoked by [`DiffWalker`](crate::DiffWalker) for each node present
/// in at least one of the two documents.
///
/// `left` is the node from the old document, `right` the node from the new one.
/// A node found in only one document is paired with `None`. Every callback
/// receives the walker's current [`Location`]. All methods default to no-ops.
pub trait DiffVisitor {
    fn accept_path(
        &mut self,
        _location: &Location,
        _key: &str,
        _left: Option<&Path>,
        _right: Option<&Path>,
    ) {
    }

    fn accept_operation(
        &mut self,
        _location: &Location,
        _method: HttpMethod,
        _left: Option<&Operation>,
        _right: Option<&Operation>,
    ) {
    }

    fn accept_parameter(
        &mut self,
        _location: &Location,
        _left: Option<&Parameter>,
        _right: Option<&Parameter>,
    ) {
    }

    fn accept_response(
        &mut self,
        _location: &Location,
        _key: &str,
        _left: Option<&Response>,
        _right: Option<&Response>,
    ) {
    }

    fn accept_model(&mut self, _location: &Location, _left: Option<&Model>, _right: Option<&Model>) {
    }

    fn accept_property(
        &mut self,
        _location: &Location,
        _key: &str,
        _left: Option<&Property>,
        _right: Option<&Property>,
    ) {
    }

    fn accept_enum_value(
        &mut self,
        _location: &Location,
        _left: Option<&str>,
        _right: Option<&str>,
    ) {
    }
}
