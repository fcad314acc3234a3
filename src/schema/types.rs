//! Type descriptions consumed by the instrumentation generator
//!
//! Supported field types:
//! - string, int, long, float, double, bool, char, bigint: scalar values
//! - date, datetime: calendar values
//! - opaque: any Rust type written verbatim, always-write semantics
//! - reference: shared link to another declared type
//! - list, set, collection: change-tracking containers of one element type
//! - map: change-tracking map of key to value

use serde::{Deserialize, Serialize};

use super::errors::{SchemaError, SchemaResult, ValidationDetails};
use crate::container::ContainerKind;

/// Names the generated code already uses.
const RESERVED_FIELDS: &[&str] = &["version", "new", "default"];

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while",
];

const EQUALITY_SAFE_SPELLINGS: &[&str] = &[
    "bool", "char", "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64",
    "u128", "usize", "f32", "f64", "String", "&'static str",
];

/// Marker listed in `implements` by types that already carry version state.
pub const VERSIONABLE_MARKER: &str = "Versionable";

/// Declared type of a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int,
    Long,
    Float,
    Double,
    Bool,
    Char,
    Bigint,
    Date,
    Datetime,
    /// Arbitrary Rust type; writes are never compared
    Opaque { rust_type: String },
    /// Shared link to another declared type
    Reference { target: String },
    List { element: Box<FieldType> },
    Set { element: Box<FieldType> },
    Collection { element: Box<FieldType> },
    Map {
        key: Box<FieldType>,
        value: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int => "int",
            FieldType::Long => "long",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Bool => "bool",
            FieldType::Char => "char",
            FieldType::Bigint => "bigint",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Opaque { .. } => "opaque",
            FieldType::Reference { .. } => "reference",
            FieldType::List { .. } => "list",
            FieldType::Set { .. } => "set",
            FieldType::Collection { .. } => "collection",
            FieldType::Map { .. } => "map",
        }
    }

    /// Container kind, when the field holds a change-tracking container
    pub fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            FieldType::List { .. } => Some(ContainerKind::List),
            FieldType::Set { .. } => Some(ContainerKind::Set),
            FieldType::Collection { .. } => Some(ContainerKind::Collection),
            FieldType::Map { .. } => Some(ContainerKind::Map),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        self.container_kind().is_some()
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, FieldType::Reference { .. })
    }

    /// True when writes of this type compare old and new values.
    ///
    /// Opaque types compare only when spelled as one of the primitive
    /// equality-safe types, matching what the setter probe resolves to.
    pub fn is_equality_safe(&self) -> bool {
        match self {
            FieldType::Opaque { rust_type } => {
                EQUALITY_SAFE_SPELLINGS.contains(&rust_type.trim())
            }
            FieldType::Reference { .. } => false,
            other => !other.is_container(),
        }
    }

    /// True when the type cannot be hashed (set elements and map keys).
    fn is_unhashable(&self) -> bool {
        matches!(self, FieldType::Float | FieldType::Double)
    }

    /// Rust spelling of the type. `crate_path` prefixes runtime items.
    pub fn rust_type(&self, crate_path: &str) -> String {
        match self {
            FieldType::String => "String".into(),
            FieldType::Int => "i32".into(),
            FieldType::Long => "i64".into(),
            FieldType::Float => "f32".into(),
            FieldType::Double => "f64".into(),
            FieldType::Bool => "bool".into(),
            FieldType::Char => "char".into(),
            FieldType::Bigint => "i128".into(),
            FieldType::Date => format!("{}::chrono::NaiveDate", crate_path),
            FieldType::Datetime => {
                format!("{0}::chrono::DateTime<{0}::chrono::Utc>", crate_path)
            }
            FieldType::Opaque { rust_type } => rust_type.clone(),
            FieldType::Reference { target } => format!("{}::node::Shared<{}>", crate_path, target),
            FieldType::List { element } | FieldType::Collection { element } => {
                format!("Vec<{}>", element.rust_type(crate_path))
            }
            FieldType::Set { element } => {
                format!("std::collections::HashSet<{}>", element.rust_type(crate_path))
            }
            FieldType::Map { key, value } => format!(
                "std::collections::HashMap<{}, {}>",
                key.rust_type(crate_path),
                value.rust_type(crate_path)
            ),
        }
    }

    /// Reference targets named by this type, including container elements
    pub fn references(&self) -> Vec<&str> {
        match self {
            FieldType::Reference { target } => vec![target.as_str()],
            FieldType::List { element }
            | FieldType::Set { element }
            | FieldType::Collection { element } => element.references(),
            FieldType::Map { key, value } => {
                let mut out = key.references();
                out.extend(value.references());
                out
            }
            _ => Vec::new(),
        }
    }
}

/// Field declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Required values are stored bare, others as `Option`
    #[serde(default)]
    pub required: bool,
    /// Setter name; defaults to `set_<name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setter: Option<String>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            setter: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_setter(mut self, setter: impl Into<String>) -> Self {
        self.setter = Some(setter.into());
        self
    }

    pub fn setter_name(&self) -> String {
        self.setter
            .clone()
            .unwrap_or_else(|| format!("set_{}", self.name))
    }

    /// Rust type of the stored field.
    ///
    /// References are always optional; containers are never wrapped.
    pub fn rust_type(&self, crate_path: &str) -> String {
        let inner = self.field_type.rust_type(crate_path);
        if self.field_type.is_container() || (self.required && !self.field_type.is_reference()) {
            inner
        } else {
            format!("Option<{}>", inner)
        }
    }
}

/// One value-object type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// CamelCase type name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Capabilities the type already provides
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            description: None,
            implements: Vec::new(),
            fields,
        }
    }

    /// True when the type declares it is already Versionable
    pub fn is_instrumented(&self) -> bool {
        self.implements.iter().any(|i| i == VERSIONABLE_MARKER)
    }

    /// snake_case module name for the generated file
    pub fn module_name(&self) -> String {
        to_snake_case(&self.name)
    }

    /// Every reference target named anywhere in the fields
    pub fn references(&self) -> Vec<&str> {
        self.fields
            .iter()
            .flat_map(|f| f.field_type.references())
            .collect()
    }

    /// Checks names and field shapes. Cross-type references are checked by the loader.
    pub fn validate_structure(&self) -> SchemaResult<()> {
        if !is_type_name(&self.name) {
            return Err(SchemaError::invalid_field(
                &self.name,
                ValidationDetails::new(&self.name, "CamelCase type name", "invalid identifier"),
            ));
        }

        let mut seen: Vec<&str> = Vec::new();
        for field in &self.fields {
            let reject = |details: ValidationDetails| -> SchemaResult<()> {
                Err(SchemaError::invalid_field(&self.name, details))
            };

            if !is_field_name(&field.name) {
                return reject(ValidationDetails::new(
                    &field.name,
                    "snake_case identifier",
                    "invalid identifier",
                ));
            }
            if RESERVED_FIELDS.contains(&field.name.as_str()) {
                return reject(ValidationDetails::reserved_name(&field.name));
            }
            if seen.contains(&field.name.as_str()) {
                return reject(ValidationDetails::duplicate(&field.name));
            }
            seen.push(&field.name);

            if let Some(setter) = &field.setter {
                if !is_field_name(setter) || RESERVED_FIELDS.contains(&setter.as_str()) {
                    return reject(ValidationDetails::new(
                        &field.name,
                        "setter to be a snake_case identifier",
                        setter.clone(),
                    ));
                }
            }

            if let Err(details) = check_type(&field.name, &field.field_type, true) {
                return reject(details);
            }
        }

        // getters and setters share one namespace
        let setters: Vec<String> = self.fields.iter().map(FieldDef::setter_name).collect();
        for (i, setter) in setters.iter().enumerate() {
            if seen.contains(&setter.as_str()) || setters[..i].contains(setter) {
                return Err(SchemaError::invalid_field(
                    &self.name,
                    ValidationDetails::new(setter.clone(), "unique accessor name", "collision"),
                ));
            }
        }

        Ok(())
    }
}

fn check_type(field: &str, ty: &FieldType, top_level: bool) -> Result<(), ValidationDetails> {
    match ty {
        FieldType::Opaque { rust_type } if rust_type.trim().is_empty() => Err(
            ValidationDetails::new(field, "non-empty rust_type", "empty string"),
        ),
        FieldType::Reference { target } if !is_type_name(target) => Err(ValidationDetails::new(
            field,
            "CamelCase reference target",
            target.clone(),
        )),
        FieldType::List { element } | FieldType::Collection { element } => {
            check_element(field, ty, element, top_level)
        }
        FieldType::Set { element } => {
            check_element(field, ty, element, top_level)?;
            check_hashable(field, element)
        }
        FieldType::Map { key, value } => {
            check_element(field, ty, key, top_level)?;
            check_element(field, ty, value, top_level)?;
            check_hashable(field, key)
        }
        _ => Ok(()),
    }
}

fn check_element(
    field: &str,
    container: &FieldType,
    element: &FieldType,
    top_level: bool,
) -> Result<(), ValidationDetails> {
    if !top_level || element.is_container() {
        return Err(ValidationDetails::new(
            field,
            format!("{} element to be a scalar or reference", container.type_name()),
            element.type_name(),
        ));
    }
    check_type(field, element, false)
}

fn check_hashable(field: &str, ty: &FieldType) -> Result<(), ValidationDetails> {
    if ty.is_unhashable() {
        return Err(ValidationDetails::new(field, "hashable key type", ty.type_name()));
    }
    Ok(())
}

fn is_type_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => chars.all(|c| c.is_ascii_alphanumeric()),
        _ => false,
    }
}

fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    let head_ok = matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_');
    head_ok
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        && name != "_"
        && !RUST_KEYWORDS.contains(&name)
}

/// snake_case form of a CamelCase type name
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
