//! Schema and Code Generation Tests
//!
//! From JSON schema files to `tracked!` sources:
//! - schemas load in name order and references are checked
//! - one file per type, skipped when up to date or already Versionable
//! - the check command reports write semantics per field

use std::fs;
use std::path::Path;

use smartvo::cli::{self, Config};
use smartvo::codegen::{parse_header, EmitOptions, Generator, Outcome, SkipReason};
use smartvo::schema::{SchemaErrorCode, SchemaLoader};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const OFFICE: &str = include_str!("generated/office.json");
const COMPANY: &str = include_str!("generated/company.json");

const OFFICE_RS: &str = include_str!("generated/office.rs");
const COMPANY_RS: &str = include_str!("generated/company.rs");

const LEGACY: &str = r#"{
    "name": "Legacy",
    "implements": ["Versionable"],
    "fields": [{"name": "code", "type": "int"}]
}"#;

fn write_schemas(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    for (name, body) in files {
        fs::write(dir.join(name), body).unwrap();
    }
}

fn config_for(root: &Path) -> Config {
    Config {
        schema_dir: root.join("schemas"),
        out_dir: root.join("generated"),
        crate_path: "smartvo".into(),
        derive_debug: true,
        force: false,
    }
}

// =============================================================================
// Loading
// =============================================================================

/// All schemas load and are listed in name order.
#[test]
fn test_load_schema_directory() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("schemas");
    write_schemas(&dir, &[("office.json", OFFICE), ("company.json", COMPANY)]);

    let mut loader = SchemaLoader::new(&dir);
    loader.load_all().unwrap();

    let names: Vec<&str> = loader.all_schemas().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Company", "Office"]);
}

/// A reference to a type with no schema file is rejected.
#[test]
fn test_dangling_reference_rejected() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("schemas");
    write_schemas(&dir, &[("company.json", COMPANY)]);

    let mut loader = SchemaLoader::new(&dir);
    let err = loader.load_all().unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::SvoSchemaUnknownType);
}

/// The same type declared in two files is rejected.
#[test]
fn test_duplicate_type_rejected() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("schemas");
    write_schemas(&dir, &[("a.json", OFFICE), ("b.json", OFFICE)]);

    let mut loader = SchemaLoader::new(&dir);
    let err = loader.load_all().unwrap_err();
    assert_eq!(err.code(), SchemaErrorCode::SvoSchemaDuplicate);
}

// =============================================================================
// Generation
// =============================================================================

/// One file per type, with sections and imports in place.
#[test]
fn test_instrument_writes_sources() {
    let tmp = TempDir::new().unwrap();
    write_schemas(
        &tmp.path().join("schemas"),
        &[("office.json", OFFICE), ("company.json", COMPANY), ("legacy.json", LEGACY)],
    );

    let report = cli::instrument(&config_for(tmp.path())).unwrap();
    assert_eq!(report.generated, vec!["Company".to_string(), "Office".to_string()]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].reason, SkipReason::AlreadyVersionable);

    let company = fs::read_to_string(tmp.path().join("generated/company.rs")).unwrap();
    assert!(parse_header(&company).is_some());
    assert!(company.contains("use super::office::Office;"));
    assert!(company.contains("smartvo::tracked! {"));
    assert!(company.contains("/// Top-level customer"));
    assert!(company.contains("name: Option<String> => set_name,"));
    assert!(company.contains("capital: i128 => set_capital,"));
    assert!(company.contains("logo: Vec<u8> => set_logo,"));
    assert!(company.contains("parent: Option<smartvo::node::Shared<Company>> => set_parent,"));
    assert!(company.contains("offices: smartvo::node::Shared<Office> => set_offices,"));
    assert!(company.contains("branches: String => smartvo::node::Shared<Office> => set_branches,"));

    let office = fs::read_to_string(tmp.path().join("generated/office.rs")).unwrap();
    assert!(office.contains("opened: Option<smartvo::chrono::NaiveDate> => set_opened,"));
    assert!(!tmp.path().join("generated/legacy.rs").exists());
}

/// The checked-in sources under tests/generated are byte for byte what
/// the emitter writes for the same schemas.
#[test]
fn test_checked_in_sources_match_emitter() {
    let tmp = TempDir::new().unwrap();
    write_schemas(
        &tmp.path().join("schemas"),
        &[("office.json", OFFICE), ("company.json", COMPANY)],
    );

    cli::instrument(&config_for(tmp.path())).unwrap();

    let company = fs::read_to_string(tmp.path().join("generated/company.rs")).unwrap();
    let office = fs::read_to_string(tmp.path().join("generated/office.rs")).unwrap();
    assert_eq!(company, COMPANY_RS);
    assert_eq!(office, OFFICE_RS);
}

/// Running twice rewrites nothing; force rewrites everything.
#[test]
fn test_instrument_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    write_schemas(&tmp.path().join("schemas"), &[("office.json", OFFICE)]);
    let config = config_for(tmp.path());

    cli::instrument(&config).unwrap();
    let second = cli::instrument(&config).unwrap();
    assert!(second.generated.is_empty());
    assert_eq!(second.skipped[0].reason, SkipReason::UpToDate);

    let forced = cli::instrument(&config.clone().with_overrides(None, None, true)).unwrap();
    assert_eq!(forced.generated, vec!["Office".to_string()]);
}

/// A hand-edited output file without the header is regenerated.
#[test]
fn test_foreign_file_is_replaced() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("generated");
    fs::create_dir_all(&out).unwrap();
    fs::write(out.join("office.rs"), "// written by hand\n").unwrap();

    let mut loader = SchemaLoader::new(&tmp.path().join("schemas"));
    loader
        .register(serde_json::from_str(OFFICE).unwrap())
        .unwrap();

    let generator = Generator::new(&out, EmitOptions::default());
    let schema = loader.get("Office").unwrap();
    assert!(matches!(generator.generate(schema).unwrap(), Outcome::Generated(_)));
}

/// Changing an emit option changes the fingerprint and regenerates.
#[test]
fn test_option_change_regenerates() {
    let tmp = TempDir::new().unwrap();
    write_schemas(&tmp.path().join("schemas"), &[("office.json", OFFICE)]);
    let mut config = config_for(tmp.path());

    cli::instrument(&config).unwrap();
    config.derive_debug = false;
    let report = cli::instrument(&config).unwrap();
    assert_eq!(report.generated.len(), 1);

    let office = fs::read_to_string(tmp.path().join("generated/office.rs")).unwrap();
    assert!(!office.contains("#[derive(Debug)]"));
}

// =============================================================================
// Check
// =============================================================================

/// The check report classifies each field.
#[test]
fn test_check_report() {
    let tmp = TempDir::new().unwrap();
    write_schemas(
        &tmp.path().join("schemas"),
        &[("office.json", OFFICE), ("company.json", COMPANY)],
    );

    let report = cli::check(&config_for(tmp.path())).unwrap();
    let company = report.iter().find(|t| t.name == "Company").unwrap();
    let semantics: Vec<(&str, &str)> = company
        .fields
        .iter()
        .map(|f| (f.name.as_str(), f.semantics))
        .collect();

    assert_eq!(
        semantics,
        vec![
            ("name", "compare"),
            ("capital", "compare"),
            ("logo", "always"),
            ("parent", "always"),
            ("offices", "container"),
            ("branches", "container"),
        ]
    );
}

/// A missing schema directory fails the command.
#[test]
fn test_missing_schema_dir_fails() {
    let tmp = TempDir::new().unwrap();
    let err = cli::instrument(&config_for(tmp.path())).unwrap_err();
    assert_eq!(err.code_str(), "SVO_CLI_SCHEMA_ERROR");
}

/// Configuration files resolve relative directories next to themselves.
#[test]
fn test_config_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    write_schemas(&tmp.path().join("schemas"), &[("office.json", OFFICE)]);
    let path = tmp.path().join("smartvo.json");
    fs::write(
        &path,
        r#"{"schema_dir": "schemas", "out_dir": "generated", "derive_debug": false}"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.schema_dir, tmp.path().join("schemas"));

    let report = cli::instrument(&config).unwrap();
    assert_eq!(report.generated, vec!["Office".to_string()]);
    assert!(tmp.path().join("generated/office.rs").exists());
}
