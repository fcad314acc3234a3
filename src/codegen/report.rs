//! Write-semantics report for loaded schemas

use serde::Serialize;

use crate::instrument::WriteSemantics;
use crate::schema::{FieldDef, Schema, SchemaLoader};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub setter: String,
    pub rust_type: String,
    /// `compare`, `always` or `container`
    pub semantics: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeReport {
    pub name: String,
    /// Already Versionable, left untouched by the generator
    pub instrumented: bool,
    pub fields: Vec<FieldReport>,
}

/// Semantics a generated setter will have for this field.
pub fn field_semantics(field: &FieldDef) -> WriteSemantics {
    match field.field_type.container_kind() {
        Some(kind) => WriteSemantics::Container(kind),
        None if field.field_type.is_equality_safe() => WriteSemantics::Compare,
        None => WriteSemantics::Always,
    }
}

pub fn type_report(schema: &Schema, crate_path: &str) -> TypeReport {
    TypeReport {
        name: schema.name.clone(),
        instrumented: schema.is_instrumented(),
        fields: schema
            .fields
            .iter()
            .map(|field| FieldReport {
                name: field.name.clone(),
                setter: field.setter_name(),
                rust_type: field.rust_type(crate_path),
                semantics: field_semantics(field).as_str(),
            })
            .collect(),
    }
}

/// One report per loaded schema, in name order.
pub fn semantics_report(loader: &SchemaLoader, crate_path: &str) -> Vec<TypeReport> {
    loader
        .all_schemas()
        .map(|schema| type_report(schema, crate_path))
        .collect()
}
