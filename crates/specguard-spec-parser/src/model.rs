use std::collections::BTreeMap;
use std::fmt;

/// A parsed Swagger 2.0 document.
///
/// Immutable once loaded: the diff engine only ever borrows it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// The `info.title` field.
    pub title: String,
    /// The `info.version` field.
    pub version: String,
    /// Path items keyed by path template (e.g. "/pet/{petId}").
    pub paths: BTreeMap<String, Path>,
    /// Schema definitions keyed by definition name, used to resolve references.
    pub definitions: BTreeMap<String, Model>,
}

impl Document {
    /// Look up a definition by its simple name.
    ///
    /// A missing definition is not an error here; callers treat it as absent.
    pub fn resolve(&self, name: &str) -> Option<&Model> {
        self.definitions.get(name)
    }
}

/// A path item: the operations available on one path template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub operations: BTreeMap<HttpMethod, Operation>,
}

/// HTTP methods recognized on a Swagger path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
    ];

    /// The lowercase key used in a Swagger path item.
    pub fn key(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }

    /// The uppercase method name.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation on a path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operation {
    /// The Swagger operationId, if present.
    pub operation_id: Option<String>,
    /// Parameters, path-level ones merged in. Names are unique within an operation.
    pub parameters: Vec<Parameter>,
    /// Responses keyed by status code or `default`.
    pub responses: BTreeMap<String, Response>,
}

impl Operation {
    /// Find a parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    FormData,
    Body,
}

impl ParameterLocation {
    /// Parse the Swagger `in` value.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            "formData" => Some(Self::FormData),
            "body" => Some(Self::Body),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::FormData => "formData",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    /// The `in` field.
    pub location: ParameterLocation,
    pub required: bool,
    /// Request schema; only body parameters carry one.
    pub schema: Option<Model>,
}

impl Parameter {
    pub fn is_body(&self) -> bool {
        self.location == ParameterLocation::Body
    }
}

/// An operation response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub description: String,
    pub schema: Option<Model>,
}

/// A schema attached to a body parameter, a response, or a definition.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Array(ArrayModel),
    Object(ObjectModel),
    /// Simple name of a definition (`#/definitions/Pet` is stored as `Pet`).
    Reference(String),
}

impl Model {
    /// The declared type used for compatibility comparisons.
    ///
    /// References carry no type of their own.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Model::Array(_) => Some("array"),
            Model::Object(object) => object.type_name.as_deref(),
            Model::Reference(_) => None,
        }
    }
}

/// A schema with `type: array`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayModel {
    pub items: Option<Box<Property>>,
}

/// Any non-array, non-reference schema: objects, but also inline primitives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectModel {
    pub type_name: Option<String>,
    pub format: Option<String>,
    /// `None` when the schema declares no `properties` object at all.
    pub properties: Option<BTreeMap<String, Property>>,
    pub enum_values: Option<Vec<String>>,
}

/// A named member of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Whether the enclosing object lists this property as required.
    pub required: bool,
    pub description: Option<String>,
    pub kind: PropertyKind,
}

/// The shape of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    /// integer, number, boolean, file, or an untyped value.
    Primitive {
        type_name: Option<String>,
        format: Option<String>,
    },
    String {
        format: Option<String>,
        enum_values: Option<Vec<String>>,
    },
    Array {
        items: Option<Box<Property>>,
    },
    Object {
        properties: Option<BTreeMap<String, Property>>,
    },
    /// Simple name of a definition.
    Reference(String),
}

impl Property {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            required: false,
            description: None,
            kind,
        }
    }

    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Primitive { type_name, .. } => type_name.as_deref(),
            PropertyKind::String { .. } => Some("string"),
            PropertyKind::Array { .. } => Some("array"),
            PropertyKind::Object { .. } => Some("object"),
            PropertyKind::Reference(_) => Some("ref"),
        }
    }

    pub fn format(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Primitive { format, .. } | PropertyKind::String { format, .. } => {
                format.as_deref()
            }
            _ => None,
        }
    }
}
