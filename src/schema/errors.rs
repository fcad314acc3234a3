//! Schema error types
//!
//! Error codes:
//! - SVO_SCHEMA_MALFORMED (FATAL): file unreadable or not a schema
//! - SVO_SCHEMA_DIR_MISSING (FATAL): schema directory does not exist
//! - SVO_SCHEMA_DUPLICATE (REJECT): type name declared twice
//! - SVO_SCHEMA_INVALID_FIELD (REJECT): field declaration rejected
//! - SVO_SCHEMA_UNKNOWN_TYPE (REJECT): reference to an undeclared type

use std::fmt;

/// Severity levels for schema errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The schema is rejected, others may still be processed
    Reject,
    /// Schema loading cannot continue
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    SvoSchemaMalformed,
    SvoSchemaDirMissing,
    SvoSchemaDuplicate,
    SvoSchemaInvalidField,
    SvoSchemaUnknownType,
}

impl SchemaErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::SvoSchemaMalformed => "SVO_SCHEMA_MALFORMED",
            SchemaErrorCode::SvoSchemaDirMissing => "SVO_SCHEMA_DIR_MISSING",
            SchemaErrorCode::SvoSchemaDuplicate => "SVO_SCHEMA_DUPLICATE",
            SchemaErrorCode::SvoSchemaInvalidField => "SVO_SCHEMA_INVALID_FIELD",
            SchemaErrorCode::SvoSchemaUnknownType => "SVO_SCHEMA_UNKNOWN_TYPE",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SchemaErrorCode::SvoSchemaMalformed | SchemaErrorCode::SvoSchemaDirMissing => {
                Severity::Fatal
            }
            _ => Severity::Reject,
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What was wrong with a field declaration
#[derive(Debug, Clone)]
pub struct ValidationDetails {
    /// Field name, or the type name for schema-level problems
    pub field: String,
    /// Expected shape
    pub expected: String,
    /// What was found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn reserved_name(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            actual: format!("reserved name '{}'", field),
            field,
            expected: "a non-reserved identifier".into(),
        }
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expected: "unique name".into(),
            actual: "declared more than once".into(),
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// Schema error with context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    schema: Option<String>,
    details: Option<ValidationDetails>,
}

impl SchemaError {
    /// Schema file could not be read or parsed
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SvoSchemaMalformed,
            message: format!("Malformed schema file '{}': {}", path.into(), reason.into()),
            schema: None,
            details: None,
        }
    }

    pub fn dir_missing(path: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::SvoSchemaDirMissing,
            message: format!("Schema directory '{}' does not exist", path.into()),
            schema: None,
            details: None,
        }
    }

    pub fn duplicate(schema: impl Into<String>) -> Self {
        let name = schema.into();
        Self {
            code: SchemaErrorCode::SvoSchemaDuplicate,
            message: format!("Type '{}' is declared more than once", name),
            schema: Some(name),
            details: None,
        }
    }

    pub fn invalid_field(schema: impl Into<String>, details: ValidationDetails) -> Self {
        let name = schema.into();
        Self {
            code: SchemaErrorCode::SvoSchemaInvalidField,
            message: format!("Type '{}' rejected: {}", name, details),
            schema: Some(name),
            details: Some(details),
        }
    }

    pub fn unknown_type(schema: impl Into<String>, target: impl Into<String>) -> Self {
        let name = schema.into();
        Self {
            code: SchemaErrorCode::SvoSchemaUnknownType,
            message: format!("Type '{}' references undeclared type '{}'", name, target.into()),
            schema: Some(name),
            details: None,
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Type name the error is about, if known
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn details(&self) -> Option<&ValidationDetails> {
        self.details.as_ref()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
