use thiserror::Error;

/// Errors produced while loading a Swagger document (E1001–E1004).
#[derive(Debug, Error)]
pub enum ParseError {
    /// E1001: File is not a Swagger 2.0 document.
    #[error("E1001: not a Swagger 2.0 document")]
    UnknownFormat,

    /// E1002: YAML/JSON parse error.
    #[error("E1002: parse error: {0}")]
    ParseError(String),

    /// E1003: Unresolved parameter or response $ref.
    #[error("E1003: unresolved $ref: {0}")]
    UnresolvedRef(String),

    /// E1004: Structural error in the document.
    #[error("E1004: schema validation error: {0}")]
    SchemaError(String),

    /// I/O error reading the spec file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// The stable error code, as printed by the CLI.
    pub fn code(&self) -> &'static str {
        match self {
            ParseError::UnknownFormat => "E1001",
            ParseError::ParseError(_) => "E1002",
            ParseError::UnresolvedRef(_) => "E1003",
            ParseError::SchemaError(_) => "E1004",
            ParseError::Io(_) => "E1000",
        }
    }
}
