//! Schema loader for the type descriptions fed to the generator
//!
//! - One JSON file per type in the schema directory
//! - Files are read in name order so output is deterministic
//! - A missing directory or unreadable file is FATAL
//! - References must name a loaded type once all files are in

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Reads schema files from disk and keeps them in a name-ordered registry.
pub struct SchemaLoader {
    schema_dir: PathBuf,
    schemas: BTreeMap<String, Schema>,
}

impl SchemaLoader {
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file in the schema directory, then checks references.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.is_dir() {
            return Err(SchemaError::dir_missing(self.schema_dir.display().to_string()));
        }

        let mut paths = fs::read_dir(&self.schema_dir)
            .map_err(failed(&self.schema_dir, "list"))?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(failed(&self.schema_dir, "list"))?;
        paths.retain(|path| path.extension().map_or(false, |ext| ext == "json"));
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        self.validate_references()
    }

    /// Loads and registers a single schema file.
    pub fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(failed(path, "read"))?;
        let schema: Schema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;
        self.register(schema)
    }

    /// Adds a schema built in code, with the same checks as a loaded file.
    pub fn register(&mut self, schema: Schema) -> SchemaResult<()> {
        schema.validate_structure()?;

        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::duplicate(&schema.name));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Every reference must name a registered type.
    pub fn validate_references(&self) -> SchemaResult<()> {
        for schema in self.schemas.values() {
            if let Some(missing) = schema
                .references()
                .into_iter()
                .find(|target| !self.schemas.contains_key(*target))
            {
                return Err(SchemaError::unknown_type(&schema.name, missing));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Schemas in name order
    pub fn all_schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes `schema` as `<snake_name>.json`. Never overwrites.
    pub fn save_schema(&self, schema: &Schema) -> SchemaResult<PathBuf> {
        let path = self.schema_dir.join(format!("{}.json", schema.module_name()));
        if path.exists() {
            return Err(SchemaError::duplicate(&schema.name));
        }

        fs::create_dir_all(&self.schema_dir).map_err(failed(&self.schema_dir, "create"))?;
        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(schema.name.clone(), format!("cannot serialize: {}", e))
        })?;
        fs::write(&path, content).map_err(failed(&path, "write"))?;

        Ok(path)
    }
}

/// Maps an I/O failure on `path` to a fatal malformed-schema error.
fn failed<'a>(path: &'a Path, action: &'a str) -> impl FnOnce(io::Error) -> SchemaError + 'a {
    move |e| SchemaError::malformed_schema(path.display().to_string(), format!("cannot {}: {}", action, e))
}
