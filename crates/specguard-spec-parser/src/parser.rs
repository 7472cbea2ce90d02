use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::model::{
    ArrayModel, Document, HttpMethod, Model, ObjectModel, Operation, Parameter,
    ParameterLocation, Path, Property, PropertyKind, Response,
};

/// Parse a Swagger 2.0 document from a YAML/JSON string.
pub fn parse_document(input: &str) -> Result<Document, ParseError> {
    // Parse YAML (also handles JSON since JSON is valid YAML)
    let root: Value =
        serde_yaml::from_str(input).map_err(|e| ParseError::ParseError(e.to_string()))?;

    let root_obj = root
        .as_object()
        .ok_or_else(|| ParseError::ParseError("spec root must be an object".into()))?;

    detect_format(root_obj)?;

    let info = root_obj
        .get("info")
        .and_then(|v| v.as_object())
        .ok_or_else(|| ParseError::SchemaError("missing 'info' object".into()))?;

    let title = info
        .get("title")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ParseError::SchemaError("missing 'info.title'".into()))?
        .to_string();

    let version = info
        .get("version")
        .map(scalar_to_string)
        .unwrap_or_else(|| "0.0.0".to_string());

    let definitions = parse_definitions(root_obj)?;

    let shared = SharedComponents {
        parameters: root_obj.get("parameters").and_then(|v| v.as_object()),
        responses: root_obj.get("responses").and_then(|v| v.as_object()),
    };
    let paths = parse_paths(root_obj, &shared)?;

    Ok(Document {
        title,
        version,
        paths,
        definitions,
    })
}

/// Parse a document from a file path.
pub fn parse_document_file(path: &std::path::Path) -> Result<Document, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_document(&content)
}

/// Only Swagger 2.0 is understood.
fn detect_format(root: &Map<String, Value>) -> Result<(), ParseError> {
    match root.get("swagger") {
        Some(version) => {
            let version = scalar_to_string(version);
            if version != "2.0" {
                return Err(ParseError::SchemaError(format!(
                    "unsupported Swagger version: {} (only 2.0 supported)",
                    version
                )));
            }
            Ok(())
        }
        None => Err(ParseError::UnknownFormat),
    }
}

/// Root-level `parameters` and `responses` tables that operations may `$ref`.
struct SharedComponents<'a> {
    parameters: Option<&'a Map<String, Value>>,
    responses: Option<&'a Map<String, Value>>,
}

impl<'a> SharedComponents<'a> {
    /// Follow a `$ref` into one of the root tables, or return the value itself.
    fn inline(
        &self,
        value: &'a Value,
        prefix: &str,
        table: Option<&'a Map<String, Value>>,
    ) -> Result<&'a Value, ParseError> {
        let ref_str = match value.get("$ref").and_then(|v| v.as_str()) {
            Some(r) => r,
            None => return Ok(value),
        };

        ref_str
            .strip_prefix(prefix)
            .and_then(|name| table.and_then(|t| t.get(name)))
            .ok_or_else(|| ParseError::UnresolvedRef(ref_str.to_string()))
    }
}

fn parse_definitions(root: &Map<String, Value>) -> Result<BTreeMap<String, Model>, ParseError> {
    let definitions = match root.get("definitions").and_then(|v| v.as_object()) {
        Some(d) => d,
        None => return Ok(BTreeMap::new()),
    };

    definitions
        .iter()
        .map(|(name, schema)| Ok((name.clone(), parse_model(schema)?)))
        .collect()
}

/// Parse Swagger paths into path items.
fn parse_paths(
    root: &Map<String, Value>,
    shared: &SharedComponents<'_>,
) -> Result<BTreeMap<String, Path>, ParseError> {
    let mut paths = BTreeMap::new();

    let paths_obj = match root.get("paths").and_then(|v| v.as_object()) {
        Some(p) => p,
        None => return Ok(paths), // No paths is valid (empty API)
    };

    for (path, path_item) in paths_obj {
        if path.starts_with("x-") {
            continue;
        }

        let path_obj = path_item.as_object().ok_or_else(|| {
            ParseError::SchemaError(format!("path item for '{}' must be an object", path))
        })?;

        // Path-level parameters (inherited by all operations)
        let path_params = parse_parameters(path_obj, shared)?;

        let mut operations = BTreeMap::new();
        for method in HttpMethod::ALL {
            let op_value = match path_obj.get(method.key()) {
                Some(v) => v,
                None => continue,
            };

            let op_obj = op_value.as_object().ok_or_else(|| {
                ParseError::SchemaError(format!(
                    "operation {} {} must be an object",
                    method, path
                ))
            })?;

            // Operation-level parameters override path-level ones of the same name
            let mut parameters = parse_parameters(op_obj, shared)?;
            for inherited in &path_params {
                if !parameters.iter().any(|p| p.name == inherited.name) {
                    parameters.push(inherited.clone());
                }
            }

            let operation_id = op_obj
                .get("operationId")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string());

            let responses = parse_responses(op_obj, shared)?;

            operations.insert(
                method,
                Operation {
                    operation_id,
                    parameters,
                    responses,
                },
            );
        }

        paths.insert(path.clone(), Path { operations });
    }

    Ok(paths)
}

/// Parse parameters from a path item or operation object.
fn parse_parameters(
    obj: &Map<String, Value>,
    shared: &SharedComponents<'_>,
) -> Result<Vec<Parameter>, ParseError> {
    let items = match obj.get("parameters").and_then(|v| v.as_array()) {
        Some(arr) => arr,
        None => return Ok(Vec::new()),
    };

    let mut parameters: Vec<Parameter> = Vec::with_capacity(items.len());
    for item in items {
        let item = shared.inline(item, "#/parameters/", shared.parameters)?;
        let param_obj = item
            .as_object()
            .ok_or_else(|| ParseError::SchemaError("parameter must be an object".into()))?;

        let name = param_obj
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ParseError::SchemaError("parameter missing 'name'".into()))?
            .to_string();

        let location = param_obj
            .get("in")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ParseError::SchemaError(format!("parameter '{}' missing 'in'", name))
            })?;
        let location = ParameterLocation::parse(location).ok_or_else(|| {
            ParseError::SchemaError(format!(
                "parameter '{}' has invalid location '{}'",
                name, location
            ))
        })?;

        let required = param_obj
            .get("required")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let schema = match (location, param_obj.get("schema")) {
            (ParameterLocation::Body, Some(schema)) => Some(parse_model(schema)?),
            _ => None,
        };

        // Duplicate names are not supported; the first declaration wins.
        if parameters.iter().any(|p| p.name == name) {
            continue;
        }

        parameters.push(Parameter {
            name,
            location,
            required,
            schema,
        });
    }

    Ok(parameters)
}

/// Parse the responses object of an operation.
fn parse_responses(
    op: &Map<String, Value>,
    shared: &SharedComponents<'_>,
) -> Result<BTreeMap<String, Response>, ParseError> {
    let responses_obj = match op.get("responses").and_then(|v| v.as_object()) {
        Some(r) => r,
        None => return Ok(BTreeMap::new()),
    };

    let mut responses = BTreeMap::new();
    for (key, value) in responses_obj {
        if key.starts_with("x-") {
            continue;
        }

        let value = shared.inline(value, "#/responses/", shared.responses)?;

        let description = value
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();

        let schema = value.get("schema").map(parse_model).transpose()?;

        responses.insert(key.clone(), Response { description, schema });
    }

    Ok(responses)
}

/// Parse a schema object into a model.
fn parse_model(value: &Value) -> Result<Model, ParseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ParseError::SchemaError("schema must be an object".into()))?;

    if let Some(ref_str) = obj.get("$ref").and_then(|v| v.as_str()) {
        return Ok(Model::Reference(simple_ref(ref_str)));
    }

    let type_name = obj.get("type").and_then(|v| v.as_str());

    if type_name == Some("array") {
        let items = obj
            .get("items")
            .map(parse_property)
            .transpose()?
            .map(Box::new);
        return Ok(Model::Array(ArrayModel { items }));
    }

    Ok(Model::Object(ObjectModel {
        type_name: type_name.map(|s| s.to_string()),
        format: string_field(obj, "format"),
        properties: parse_properties(obj)?,
        enum_values: enum_values(obj),
    }))
}

/// Parse the `properties` of an object schema, applying its `required` list.
fn parse_properties(
    obj: &Map<String, Value>,
) -> Result<Option<BTreeMap<String, Property>>, ParseError> {
    let properties_obj = match obj.get("properties").and_then(|v| v.as_object()) {
        Some(p) => p,
        None => return Ok(None),
    };

    let required: Vec<&str> = obj
        .get("required")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    let mut properties = BTreeMap::new();
    for (name, value) in properties_obj {
        let mut property = parse_property(value)?;
        property.required = required.contains(&name.as_str());
        properties.insert(name.clone(), property);
    }

    Ok(Some(properties))
}

/// Parse a property schema.
fn parse_property(value: &Value) -> Result<Property, ParseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ParseError::SchemaError("property schema must be an object".into()))?;

    let kind = if let Some(ref_str) = obj.get("$ref").and_then(|v| v.as_str()) {
        PropertyKind::Reference(simple_ref(ref_str))
    } else {
        match obj.get("type").and_then(|v| v.as_str()) {
            Some("string") => PropertyKind::String {
                format: string_field(obj, "format"),
                enum_values: enum_values(obj),
            },
            Some("array") => PropertyKind::Array {
                items: obj
                    .get("items")
                    .map(parse_property)
                    .transpose()?
                    .map(Box::new),
            },
            Some("object") => PropertyKind::Object {
                properties: parse_properties(obj)?,
            },
            None if obj.contains_key("properties") => PropertyKind::Object {
                properties: parse_properties(obj)?,
            },
            other => PropertyKind::Primitive {
                type_name: other.map(|s| s.to_string()),
                format: string_field(obj, "format"),
            },
        }
    };

    Ok(Property {
        required: false,
        description: string_field(obj, "description"),
        kind,
    })
}

/// `#/definitions/Pet` -> `Pet`.
fn simple_ref(ref_str: &str) -> String {
    ref_str.rsplit('/').next().unwrap_or(ref_str).to_string()
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Enum literals compared as strings, whatever their YAML scalar type.
fn enum_values(obj: &Map<String, Value>) -> Option<Vec<String>> {
    obj.get("enum")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().map(scalar_to_string).collect())
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
