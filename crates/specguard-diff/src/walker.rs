//! Paired traversal of two Swagger documents.

use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

use specguard_spec_parser::{
    Document, HttpMethod, Model, Operation, Parameter, Path, Property, PropertyKind, Response,
};

use crate::location::Location;
use crate::visitor::DiffVisitor;

/// Walks a pair of documents in lock-step, calling a [`DiffVisitor`] for each
/// node present in at least one of them.
///
/// Nodes are paired by key: path template, HTTP method, parameter name,
/// response code, property name. References are resolved against the
/// definitions of the document they appear in. The walker keeps the current
/// [`Location`] and a per-episode set of visited models so that recursive
/// schemas are walked once. An episode is one parameter or one response.
///
/// A walker holds traversal state and must not be shared between concurrent
/// walks; create one per document pair.
#[derive(Debug, Default)]
pub struct DiffWalker {
    location: Location,
    /// Addresses of the models visited during the current episode.
    visited: HashSet<usize>,
}

impl DiffWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position. Empty between walks.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Walk `left` (old) and `right` (new), driving `visitor`.
    pub fn walk<V>(&mut self, visitor: &mut V, left: &Document, right: &Document)
    where
        V: DiffVisitor + ?Sized,
    {
        self.location = Location::new();
        self.visited.clear();

        tracing::debug!(
            left = %left.title,
            left_version = %left.version,
            right = %right.title,
            right_version = %right.version,
            "walking document pair"
        );

        let mut pass = Pass {
            walker: self,
            visitor,
            left,
            right,
        };

        for key in paired_keys(left.paths.keys(), right.paths.keys()) {
            pass.visit_path(key, left.paths.get(key), right.paths.get(key));
        }
    }
}

/// Keys of both sides, left first, each key once.
fn paired_keys<'k, K>(
    left: impl IntoIterator<Item = &'k K>,
    right: impl IntoIterator<Item = &'k K>,
) -> Vec<&'k K>
where
    K: Eq + Hash + ?Sized + 'k,
{
    let mut seen = HashSet::new();
    left.into_iter()
        .chain(right)
        .filter(|key| seen.insert(*key))
        .collect()
}

/// Identity of a model within the documents being walked.
fn identity(model: &Model) -> usize {
    model as *const Model as usize
}

/// One walk over a document pair.
struct Pass<'w, 'd, V: ?Sized> {
    walker: &'w mut DiffWalker,
    visitor: &'w mut V,
    left: &'d Document,
    right: &'d Document,
}

impl<'d, V> Pass<'_, 'd, V>
where
    V: DiffVisitor + ?Sized,
{
    /// Run `body` with `segment` pushed on the location; pops on every exit path of `body`.
    fn scoped(&mut self, segment: String, body: impl FnOnce(&mut Self)) {
        self.walker.location.push_path(segment);
        body(self);
        self.walker.location.pop_path();
    }

    fn visit_path(&mut self, key: &str, left: Option<&'d Path>, right: Option<&'d Path>) {
        self.scoped(format!("Path {}", key), |pass| {
            pass.visitor
                .accept_path(&pass.walker.location, key, left, right);

            let (Some(left), Some(right)) = (left, right) else {
                return;
            };

            for method in paired_keys(left.operations.keys(), right.operations.keys()) {
                pass.visit_operation(
                    *method,
                    left.operations.get(method),
                    right.operations.get(method),
                );
            }
        });
    }

    fn visit_operation(
        &mut self,
        method: HttpMethod,
        left: Option<&'d Operation>,
        right: Option<&'d Operation>,
    ) {
        self.scoped(format!("Operation {}", method), |pass| {
            pass.visitor
                .accept_operation(&pass.walker.location, method, left, right);

            let (Some(left), Some(right)) = (left, right) else {
                return;
            };

            let names = paired_keys(
                left.parameters.iter().map(|p| p.name.as_str()),
                right.parameters.iter().map(|p| p.name.as_str()),
            );
            for name in names {
                pass.visit_parameter(name, left.parameter(name), right.parameter(name));
            }

            for key in paired_keys(left.responses.keys(), right.responses.keys()) {
                pass.visit_response(key, left.responses.get(key), right.responses.get(key));
            }
        });
    }

    fn visit_parameter(
        &mut self,
        name: &str,
        left: Option<&'d Parameter>,
        right: Option<&'d Parameter>,
    ) {
        self.scoped(format!("Parameter {}", name), |pass| {
            pass.walker.location.set_request(true);
            pass.visit_parameter_schema(left, right);
            pass.walker.visited.clear();
            pass.walker.location.set_request(false);
        });
    }

    fn visit_parameter_schema(&mut self, left: Option<&'d Parameter>, right: Option<&'d Parameter>) {
        self.visitor
            .accept_parameter(&self.walker.location, left, right);

        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        // A non-body side contributes no schema.
        if left.is_body() || right.is_body() {
            self.visit_model(left.schema.as_ref(), right.schema.as_ref());
        }
    }

    fn visit_response(&mut self, key: &str, left: Option<&'d Response>, right: Option<&'d Response>) {
        self.scoped(format!("Response {}", key), |pass| {
            pass.walker.location.set_response(true);
            pass.visit_response_schema(key, left, right);
            pass.walker.visited.clear();
            pass.walker.location.set_response(false);
        });
    }

    fn visit_response_schema(
        &mut self,
        key: &str,
        left: Option<&'d Response>,
        right: Option<&'d Response>,
    ) {
        self.visitor
            .accept_response(&self.walker.location, key, left, right);

        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        if left.schema.is_none() && right.schema.is_none() {
            return;
        }

        self.visit_model(left.schema.as_ref(), right.schema.as_ref());
    }

    fn visit_model(&mut self, left: Option<&'d Model>, right: Option<&'d Model>) {
        let visited = &self.walker.visited;
        let seen = |model: Option<&Model>| model.is_some_and(|m| visited.contains(&identity(m)));
        if seen(left) && seen(right) {
            tracing::trace!(
                location = %self.walker.location,
                "model pair already visited in this episode"
            );
            return;
        }

        self.visitor
            .accept_model(&self.walker.location, left, right);

        for model in [left, right].into_iter().flatten() {
            self.walker.visited.insert(identity(model));
        }

        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        match (left, right) {
            (Model::Array(left), Model::Array(right)) => {
                self.visit_property("items", left.items.as_deref(), right.items.as_deref());
            }
            (Model::Object(left), Model::Object(right)) => {
                self.visit_enum_values(left.enum_values.as_deref(), right.enum_values.as_deref());
                self.visit_properties(left.properties.as_ref(), right.properties.as_ref());
            }
            (Model::Reference(left), Model::Reference(right)) => {
                let (left, right) = self.resolve(left, right);
                self.visit_model(left, right);
            }
            _ => {
                // Differing variants are for the rules to judge; nothing to pair below.
                tracing::trace!(location = %self.walker.location, "model variants differ");
            }
        }
    }

    /// Resolve each reference against its own document.
    fn resolve(&self, left: &str, right: &str) -> (Option<&'d Model>, Option<&'d Model>) {
        let left_model = self.left.resolve(left);
        let right_model = self.right.resolve(right);

        if left_model.is_none() {
            tracing::debug!(
                location = %self.walker.location,
                reference = left,
                "unresolved reference in old document"
            );
        }
        if right_model.is_none() {
            tracing::debug!(
                location = %self.walker.location,
                reference = right,
                "unresolved reference in new document"
            );
        }

        (left_model, right_model)
    }

    fn visit_properties(
        &mut self,
        left: Option<&'d BTreeMap<String, Property>>,
        right: Option<&'d BTreeMap<String, Property>>,
    ) {
        let (Some(left), Some(right)) = (left, right) else {
            return;
        };

        for name in paired_keys(left.keys(), right.keys()) {
            self.visit_property(name, left.get(name), right.get(name));
        }
    }

    fn visit_property(&mut self, name: &str, left: Option<&'d Property>, right: Option<&'d Property>) {
        self.scoped(format!("Property {}", name), |pass| {
            pass.visitor
                .accept_property(&pass.walker.location, name, left, right);

            let (Some(left), Some(right)) = (left, right) else {
                return;
            };

            match (&left.kind, &right.kind) {
                (PropertyKind::Reference(left), PropertyKind::Reference(right)) => {
                    let (left, right) = pass.resolve(left, right);
                    pass.visit_model(left, right);
                }
                (
                    PropertyKind::Object { properties: left },
                    PropertyKind::Object { properties: right },
                ) => {
                    pass.visit_properties(left.as_ref(), right.as_ref());
                }
                (PropertyKind::Array { items: left }, PropertyKind::Array { items: right }) => {
                    pass.visit_property("items", left.as_deref(), right.as_deref());
                }
                (
                    PropertyKind::String {
                        enum_values: left, ..
                    },
                    PropertyKind::String {
                        enum_values: right, ..
                    },
                ) => {
                    pass.visit_enum_values(left.as_deref(), right.as_deref());
                }
                _ => {}
            }
        });
    }

    fn visit_enum_values(&mut self, left: Option<&'d [String]>, right: Option<&'d [String]>) {
        let left = left.unwrap_or_default();
        let right = right.unwrap_or_default();

        let values = paired_keys(
            left.iter().map(String::as_str),
            right.iter().map(String::as_str),
        );
        for value in values {
            let in_left = left.iter().any(|v| v == value).then_some(value);
            let in_right = right.iter().any(|v| v == value).then_some(value);
            self.visitor
                .accept_enum_value(&self.walker.location, in_left, in_right);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::document;

    /// Records every callback as `"<kind> <location> | <left?> <right?>"`.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Recorder {
        fn record(&mut self, kind: &str, location: &Location, left: bool, right: bool) {
            let side = |present: bool| if present { "some" } else { "none" };
            self.calls.push(format!(
                "{} {} | {} {}",
                kind,
                location,
                side(left),
                side(right)
            ));
        }

        fn count(&self, prefix: &str) -> usize {
            self.calls.iter().filter(|c| c.starts_with(prefix)).count()
        }
    }

    impl DiffVisitor for Recorder {
        fn accept_path(
            &mut self,
            location: &Location,
            _key: &str,
            left: Option<&Path>,
            right: Option<&Path>,
        ) {
            self.record("path", location, left.is_some(), right.is_some());
        }

        fn accept_operation(
            &mut self,
            location: &Location,
            _method: HttpMethod,
            left: Option<&Operation>,
            right: Option<&Operation>,
        ) {
            self.record("operation", location, left.is_some(), right.is_some());
        }

        fn accept_parameter(
            &mut self,
            location: &Location,
            left: Option<&Parameter>,
            right: Option<&Parameter>,
        ) {
            assert!(location.is_request());
            assert!(!location.is_response());
            self.record("parameter", location, left.is_some(), right.is_some());
        }

        fn accept_response(
            &mut self,
            location: &Location,
            _key: &str,
            left: Option<&Response>,
            right: Option<&Response>,
        ) {
            assert!(location.is_response());
            assert!(!location.is_request());
            self.record("response", location, left.is_some(), right.is_some());
        }

        fn accept_model(&mut self, location: &Location, left: Option<&Model>, right: Option<&Model>) {
            self.record("model", location, left.is_some(), right.is_some());
        }

        fn accept_property(
            &mut self,
            location: &Location,
            _key: &str,
            left: Option<&Property>,
            right: Option<&Property>,
        ) {
            self.record("property", location, left.is_some(), right.is_some());
        }

        fn accept_enum_value(&mut self, location: &Location, left: Option<&str>, right: Option<&str>) {
            self.calls.push(format!(
                "enum {} | {} {}",
                location,
                left.unwrap_or("-"),
                right.unwrap_or("-")
            ));
        }
    }

    fn record(old: &Document, new: &Document) -> Vec<String> {
        let mut recorder = Recorder::default();
        let mut walker = DiffWalker::new();
        walker.walk(&mut recorder, old, new);
        assert_eq!(walker.location().depth(), 0);
        assert!(!walker.location().is_request());
        assert!(!walker.location().is_response());
        recorder.calls
    }

    const RECURSIVE: &str = r##"
swagger: "2.0"
info:
  title: Recursive
  version: "1"
paths:
  /nodes:
    post:
      parameters:
        - name: body
          in: body
          schema:
            $ref: "#/definitions/Node"
      responses:
        "200":
          description: OK
          schema:
            $ref: "#/definitions/Node"
definitions:
  Node:
    type: object
    properties:
      value:
        type: string
      children:
        type: array
        items:
          $ref: "#/definitions/Node"
      parent:
        $ref: "#/definitions/Node"
"##;

    #[test]
    fn recursive_schema_terminates() {
        let doc = document(RECURSIVE);
        let calls = record(&doc, &doc);

        // Each episode visits the inline reference and the Node definition once;
        // the nested references back to Node are cut by the guard.
        assert_eq!(
            calls
                .iter()
                .filter(|c| c.starts_with("model Path /nodes, Operation POST, Parameter body"))
                .count(),
            2
        );
        assert!(calls.contains(
            &"property Path /nodes, Operation POST, Parameter body, Property children, Property items | some some"
                .to_string()
        ));
        assert!(calls.contains(
            &"property Path /nodes, Operation POST, Response 200, Property parent | some some"
                .to_string()
        ));
    }

    #[test]
    fn guard_resets_between_episodes() {
        let doc = document(RECURSIVE);
        let calls = record(&doc, &doc);

        // The response gets the same budget as the parameter that walked Node before it.
        assert_eq!(
            calls
                .iter()
                .filter(|c| c.starts_with("model Path /nodes, Operation POST, Response 200"))
                .count(),
            2
        );
    }

    #[test]
    fn one_sided_path_is_not_descended() {
        let old = document(
            r##"
swagger: "2.0"
info: { title: Old, version: "1" }
paths:
  /kept:
    get:
      responses: {}
  /gone:
    get:
      parameters:
        - { name: q, in: query }
"##,
        );
        let new = document(
            r##"
swagger: "2.0"
info: { title: New, version: "1" }
paths:
  /kept:
    get:
      responses: {}
"##,
        );

        let calls = record(&old, &new);
        assert_eq!(
            calls,
            vec![
                "path Path /gone | some none".to_string(),
                "path Path /kept | some some".to_string(),
                "operation Path /kept, Operation GET | some some".to_string(),
            ]
        );
    }

    #[test]
    fn parameters_pair_by_name() {
        let old = document(
            r##"
swagger: "2.0"
info: { title: Old, version: "1" }
paths:
  /x:
    get:
      parameters:
        - { name: a, in: query }
        - { name: b, in: query }
"##,
        );
        let new = document(
            r##"
swagger: "2.0"
info: { title: New, version: "1" }
paths:
  /x:
    get:
      parameters:
        - { name: b, in: header }
        - { name: c, in: query, required: true }
"##,
        );

        let calls = record(&old, &new);
        assert_eq!(calls.len(), 5);
        assert!(calls.contains(&"parameter Path /x, Operation GET, Parameter a | some none".to_string()));
        assert!(calls.contains(&"parameter Path /x, Operation GET, Parameter b | some some".to_string()));
        assert!(calls.contains(&"parameter Path /x, Operation GET, Parameter c | none some".to_string()));
    }

    #[test]
    fn references_resolve_per_document() {
        let old = document(
            r##"
swagger: "2.0"
info: { title: Old, version: "1" }
paths:
  /pet:
    get:
      responses:
        "200":
          description: OK
          schema: { $ref: "#/definitions/Pet" }
definitions:
  Pet:
    type: object
    properties:
      name: { type: string }
"##,
        );
        let new = document(
            r##"
swagger: "2.0"
info: { title: New, version: "1" }
paths:
  /pet:
    get:
      responses:
        "200":
          description: OK
          schema: { $ref: "#/definitions/Pet" }
definitions:
  Pet:
    type: object
    properties:
      nickname: { type: string }
"##,
        );

        let calls = record(&old, &new);
        assert!(calls.contains(
            &"property Path /pet, Operation GET, Response 200, Property name | some none".to_string()
        ));
        assert!(calls.contains(
            &"property Path /pet, Operation GET, Response 200, Property nickname | none some"
                .to_string()
        ));
    }

    #[test]
    fn dangling_reference_is_absent() {
        let old = document(
            r##"
swagger: "2.0"
info: { title: Old, version: "1" }
paths:
  /pet:
    get:
      responses:
        "200":
          description: OK
          schema: { $ref: "#/definitions/Pet" }
definitions:
  Pet: { type: object }
"##,
        );
        let new = document(
            r##"
swagger: "2.0"
info: { title: New, version: "1" }
paths:
  /pet:
    get:
      responses:
        "200":
          description: OK
          schema: { $ref: "#/definitions/Pet" }
"##,
        );

        let calls = record(&old, &new);
        let models: Vec<_> = calls.iter().filter(|c| c.starts_with("model")).collect();
        assert_eq!(models.len(), 2);
        assert_eq!(
            models[1],
            "model Path /pet, Operation GET, Response 200 | some none"
        );
    }

    #[test]
    fn mismatched_variants_stop_after_model() {
        let old = document(
            r##"
swagger: "2.0"
info: { title: Old, version: "1" }
paths:
  /pets:
    get:
      responses:
        "200":
          description: OK
          schema:
            type: array
            items: { type: string }
"##,
        );
        let new = document(
            r##"
swagger: "2.0"
info: { title: New, version: "1" }
paths:
  /pets:
    get:
      responses:
        "200":
          description: OK
          schema:
            type: object
            properties:
              items: { type: string }
"##,
        );

        let calls = record(&old, &new);
        assert_eq!(calls.iter().filter(|c| c.starts_with("model")).count(), 1);
        assert_eq!(calls.iter().filter(|c| c.starts_with("property")).count(), 0);
    }

    #[test]
    fn enum_values_are_paired() {
        let old = document(
            r##"
swagger: "2.0"
info: { title: Old, version: "1" }
paths:
  /pets:
    post:
      parameters:
        - name: body
          in: body
          schema:
            type: object
            properties:
              color: { type: string, enum: [RED, GREEN] }
"##,
        );
        let new = document(
            r##"
swagger: "2.0"
info: { title: New, version: "1" }
paths:
  /pets:
    post:
      parameters:
        - name: body
          in: body
          schema:
            type: object
            properties:
              color: { type: string, enum: [GREEN, BLUE] }
"##,
        );

        let calls = record(&old, &new);
        let location = "Path /pets, Operation POST, Parameter body, Property color";
        let enums: Vec<_> = calls.iter().filter(|c| c.starts_with("enum")).cloned().collect();
        assert_eq!(
            enums,
            vec![
                format!("enum {} | RED -", location),
                format!("enum {} | GREEN GREEN", location),
                format!("enum {} | - BLUE", location),
            ]
        );
    }

    #[test]
    fn absent_property_collections_are_not_paired() {
        let old = document(
            r##"
swagger: "2.0"
info: { title: Old, version: "1" }
paths:
  /pets:
    get:
      responses:
        "200":
          description: OK
          schema: { type: object }
"##,
        );
        let new = document(
            r##"
swagger: "2.0"
info: { title: New, version: "1" }
paths:
  /pets:
    get:
      responses:
        "200":
          description: OK
          schema:
            type: object
            properties:
              id: { type: integer }
"##,
        );

        let calls = record(&old, &new);
        assert_eq!(calls.iter().filter(|c| c.starts_with("property")).count(), 0);
    }

    #[test]
    fn array_model_items_use_items_segment() {
        let doc = document(
            r##"
swagger: "2.0"
info: { title: Doc, version: "1" }
paths:
  /products:
    get:
      responses:
        "200":
          description: OK
          schema:
            type: array
            items: { $ref: "#/definitions/Product" }
definitions:
  Product:
    type: object
    properties:
      image: { type: string }
"##,
        );

        let calls = record(&doc, &doc);
        assert!(calls.contains(
            &"property Path /products, Operation GET, Response 200, Property items, Property image | some some"
                .to_string()
        ));
    }

    #[test]
    fn walker_is_reusable() {
        let doc = document(RECURSIVE);
        let mut walker = DiffWalker::new();

        let mut first = Recorder::default();
        walker.walk(&mut first, &doc, &doc);
        let mut second = Recorder::default();
        walker.walk(&mut second, &doc, &doc);

        assert_eq!(first.calls, second.calls);
        assert_eq!(first.count("path"), 1);
    }
}
