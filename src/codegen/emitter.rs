//! Renders one schema as a `tracked!` invocation

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::schema::{to_snake_case, FieldDef, FieldType, Schema};

/// First-line marker of every generated file
pub const HEADER_PREFIX: &str = "// @generated by smartvo instrument";

/// Output knobs that change the emitted text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Path used to reach the runtime, e.g. `smartvo` or `crate`
    pub crate_path: String,
    pub derive_debug: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            crate_path: "smartvo".into(),
            derive_debug: true,
        }
    }
}

/// Stable fingerprint of a schema and the options it is rendered with.
pub fn fingerprint(schema: &Schema, options: &EmitOptions) -> String {
    let mut hasher = crc32fast::Hasher::new();
    // serde_json writes struct fields in declaration order
    let body = serde_json::to_vec(schema).unwrap_or_default();
    hasher.update(&body);
    hasher.update(options.crate_path.as_bytes());
    hasher.update(&[options.derive_debug as u8]);
    format!("{:08x}", hasher.finalize())
}

/// The header line carrying the fingerprint
pub fn header_line(fingerprint: &str) -> String {
    format!("{}; fingerprint={}", HEADER_PREFIX, fingerprint)
}

/// Extracts the fingerprint from the first line of a generated file.
pub fn parse_header(source: &str) -> Option<&str> {
    let first = source.lines().next()?;
    let rest = first.strip_prefix(HEADER_PREFIX)?;
    rest.strip_prefix("; fingerprint=").map(str::trim)
}

/// Renders the full file for `schema`.
pub fn render(schema: &Schema, options: &EmitOptions) -> String {
    let krate = options.crate_path.as_str();
    let mut out = String::new();

    let _ = writeln!(out, "{}", header_line(&fingerprint(schema, options)));
    let _ = writeln!(out, "// Regenerate instead of editing.");
    let _ = writeln!(out);

    let imports: BTreeSet<&str> = schema
        .references()
        .into_iter()
        .filter(|target| *target != schema.name)
        .collect();
    for target in &imports {
        let _ = writeln!(out, "use super::{}::{};", to_snake_case(target), target);
    }
    if !imports.is_empty() {
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}::tracked! {{", krate);
    if let Some(description) = &schema.description {
        for line in description.lines() {
            let _ = writeln!(out, "    /// {}", line.trim_end());
        }
    }
    if options.derive_debug {
        let _ = writeln!(out, "    #[derive(Debug)]");
    }
    let _ = writeln!(out, "    pub struct {} {{", schema.name);

    let sections: [(&str, fn(&FieldType) -> bool); 6] = [
        ("values", |t| !t.is_container() && !t.is_reference()),
        ("references", FieldType::is_reference),
        ("lists", |t| matches!(t, FieldType::List { .. })),
        ("sets", |t| matches!(t, FieldType::Set { .. })),
        ("maps", |t| matches!(t, FieldType::Map { .. })),
        ("collections", |t| matches!(t, FieldType::Collection { .. })),
    ];

    for (section, belongs) in sections {
        let fields: Vec<&FieldDef> = schema
            .fields
            .iter()
            .filter(|f| belongs(&f.field_type))
            .collect();
        if fields.is_empty() {
            continue;
        }
        let _ = writeln!(out, "        {} {{", section);
        for field in fields {
            let _ = writeln!(
                out,
                "            {}: {} => {},",
                field.name,
                field_signature(field, krate),
                field.setter_name()
            );
        }
        let _ = writeln!(out, "        }}");
    }

    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}}");
    out
}

/// Type text as the macro expects it for each section
fn field_signature(field: &FieldDef, krate: &str) -> String {
    match &field.field_type {
        FieldType::List { element } | FieldType::Set { element } | FieldType::Collection { element } => {
            element.rust_type(krate)
        }
        FieldType::Map { key, value } => {
            format!("{} => {}", key.rust_type(krate), value.rust_type(krate))
        }
        _ => field.rust_type(krate),
    }
}
