//! Dialect adaptors for Terraform provider schema dumps
//!
//! This crate reads a provider definition dumped from one of the host
//! schema dialects and exposes it through the dialect-neutral traits in
//! `tfschema-extractor-common`.
//!
//! ## Dialects
//!
//! All three share the [`dump`] model:
//!
//! - `legacy`: Terraform's bundled `helper/schema` package
//! - `sdk`: `terraform-plugin-sdk` v1
//! - `sdk-2`: `terraform-plugin-sdk` v2, without `PromoteSingle` and `Removed`
//!
//! ## Detection
//!
//! When no dialect is given, a top-level `"Dialect"` hint in the dump wins.
//! Otherwise a dump whose schema nodes set `PromoteSingle` or `Removed` is
//! read as `sdk`, and anything else is assumed to be `sdk-2` with a warning.
//! A v1 dump that leaves both fields unset looks exactly like an `sdk-2`
//! dump, so it needs `--dialect` or a `"Dialect"` hint. The `legacy` dialect
//! must always be requested explicitly.

pub mod dump;
pub mod shared;

pub use dump::{DumpParser, DumpProvider};
pub use shared::DefaultFunc;

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tfschema_extractor_common::{Dialect, ExtractorError, ProviderDefinition, Result};

/// Schema node fields only the v1 vocabulary knows about
const V1_ONLY_FIELDS: [&str; 2] = ["PromoteSingle", "Removed"];

/// Load a provider dump from a file
///
/// # Arguments
/// * `path` - JSON dump, or YAML when the extension is `.yaml`/`.yml`
/// * `dialect` - Dialect to read as; detected from the dump when `None`
pub fn load_provider(path: &Path, dialect: Option<Dialect>) -> Result<Box<dyn ProviderDefinition>> {
    let document = read_document(path)?;
    parse_provider(document, dialect).map_err(|e| match e {
        ExtractorError::Json(err) => {
            ExtractorError::Parse(format!("Failed to read dump {}: {}", path.display(), err))
        }
        other => other,
    })
}

/// Build a provider from an already decoded dump
pub fn parse_provider(
    document: Value,
    dialect: Option<Dialect>,
) -> Result<Box<dyn ProviderDefinition>> {
    let dialect = match dialect {
        Some(dialect) => dialect,
        None => {
            let detected = detect_dialect(&document)?;
            tracing::debug!(dialect = %detected, "Detected dump dialect");
            detected
        }
    };

    let provider = DumpParser::from_value(document, dialect)?.parse()?;
    Ok(Box::new(provider))
}

/// Read a JSON or YAML document
pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        ExtractorError::Parse(format!("Failed to read dump {}: {}", path.display(), e))
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| {
            ExtractorError::Parse(format!("Failed to parse YAML {}: {}", path.display(), e))
        })
    } else {
        serde_json::from_str(&content).map_err(|e| {
            ExtractorError::Parse(format!("Failed to parse JSON {}: {}", path.display(), e))
        })
    }
}

/// Detect the dialect of a decoded dump
pub fn detect_dialect(document: &Value) -> Result<Dialect> {
    if let Some(hint) = document.get("Dialect") {
        return match hint.as_str() {
            Some(name) => name.parse(),
            None => Err(ExtractorError::Parse(
                "Dialect hint must be a string".to_string(),
            )),
        };
    }

    if uses_v1_fields(document) {
        Ok(Dialect::Sdk)
    } else {
        tracing::warn!(
            "No v1-only schema fields found; assuming sdk-2 (pass --dialect or a \"Dialect\" hint to override)"
        );
        Ok(Dialect::Sdk2)
    }
}

/// Whether any schema node sets a v1-only field
///
/// Only node objects are inspected: the provider schema, each resource and
/// data source schema, and nested `Elem` nodes and blocks. Attribute names
/// and default values never count.
fn uses_v1_fields(document: &Value) -> bool {
    let top_level = document.get("Schema").into_iter();
    let resources = ["ResourcesMap", "DataSourcesMap"]
        .into_iter()
        .filter_map(|key| document.get(key).and_then(Value::as_object))
        .flat_map(|resources| resources.values())
        .filter_map(|resource| resource.get("Schema"));

    top_level
        .chain(resources)
        .filter_map(Value::as_object)
        .any(schema_map_uses_v1_fields)
}

fn schema_map_uses_v1_fields(schema: &Map<String, Value>) -> bool {
    schema
        .values()
        .filter_map(Value::as_object)
        .any(node_uses_v1_fields)
}

fn node_uses_v1_fields(node: &Map<String, Value>) -> bool {
    if V1_ONLY_FIELDS.iter().any(|field| node.contains_key(*field)) {
        return true;
    }
    match node.get("Elem").and_then(Value::as_object) {
        Some(elem) => match elem.get("Schema").and_then(Value::as_object) {
            Some(block) => schema_map_uses_v1_fields(block),
            None => node_uses_v1_fields(elem),
        },
        None => false,
    }
}
