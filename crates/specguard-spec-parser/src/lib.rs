//! Swagger 2.0 document loader.
//!
//! Reads YAML/JSON specs into the [`Document`] model compared by the diff engine:
//! paths, operations, parameters, responses, and schema definitions.

pub mod error;
pub mod model;
pub mod parser;

pub use error::ParseError;
pub use model::{
    ArrayModel, Document, HttpMethod, Model, ObjectModel, Operation, Parameter,
    ParameterLocation, Path, Property, PropertyKind, Response,
};
pub use parser::{parse_document, parse_document_file};
