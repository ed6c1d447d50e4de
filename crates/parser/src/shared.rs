//! Pieces shared by every dialect adaptor
//!
//! The dialects agree on how element references, default functions and
//! timeouts are spelled in a dump; only the schema node fields differ.

use serde::Deserialize;
use serde_json::{Number, Value};
use tfschema_extractor_common::{
    DefaultValueError, ElementRef, ExtractorError, ProviderDefinition, ResourceDefinition, Result,
    SchemaNode, ValueType,
};

/// Element reference as written in a dump
///
/// - `"TypeString"`: a bare value type
/// - `{"Schema": {...}}`: a nested resource (block)
/// - `{"Type": "TypeString", ...}`: a nested schema node
///
/// Anything else is kept verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Elem<S, R> {
    ValueType(ValueType),
    Resource(R),
    Schema(Box<S>),
    Other(Value),
}

impl<S: SchemaNode, R: ResourceDefinition> Elem<S, R> {
    pub fn as_element_ref(&self) -> ElementRef<'_> {
        match self {
            Elem::ValueType(value_type) => ElementRef::ValueType(*value_type),
            Elem::Resource(resource) => ElementRef::Resource(resource),
            Elem::Schema(schema) => ElementRef::Schema(schema.as_ref()),
            Elem::Other(value) => ElementRef::Other(value),
        }
    }
}

/// Default computed from the environment, like the host SDK's
/// `EnvDefaultFunc` and `MultiEnvDefaultFunc`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefaultFunc {
    /// Variables consulted in order; the first non-empty one wins
    #[serde(default)]
    pub env: Vec<String>,
    /// Value used when none of the variables is set
    #[serde(default)]
    pub fallback: Option<Value>,
}

impl DefaultFunc {
    /// Evaluate against the process environment
    pub fn evaluate(
        &self,
        value_type: ValueType,
    ) -> std::result::Result<Option<Value>, DefaultValueError> {
        self.evaluate_with(value_type, |name| std::env::var(name).ok())
    }

    /// Evaluate with a custom variable lookup
    pub fn evaluate_with<F>(
        &self,
        value_type: ValueType,
        lookup: F,
    ) -> std::result::Result<Option<Value>, DefaultValueError>
    where
        F: Fn(&str) -> Option<String>,
    {
        for var in &self.env {
            if let Some(text) = lookup(var).filter(|t| !t.is_empty()) {
                return coerce(var, text, value_type).map(Some);
            }
        }
        Ok(self.fallback.clone())
    }
}

fn coerce(
    var: &str,
    text: String,
    value_type: ValueType,
) -> std::result::Result<Value, DefaultValueError> {
    let parsed = match value_type {
        ValueType::Bool => parse_bool(&text).map(Value::Bool).ok_or("bool"),
        ValueType::Int => text.trim().parse::<i64>().ok().map(Value::from).ok_or("int"),
        ValueType::Float => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or("float"),
        _ => return Ok(Value::String(text)),
    };
    parsed.map_err(|expected| DefaultValueError::Coercion {
        var: var.to_string(),
        value: text,
        expected,
    })
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Effective default shared by all dialects: a static default wins over the
/// default function.
pub fn resolve_default(
    static_default: Option<&Value>,
    default_func: Option<&DefaultFunc>,
    value_type: ValueType,
) -> std::result::Result<Option<Value>, DefaultValueError> {
    if let Some(value) = static_default {
        return Ok(Some(value.clone()));
    }
    match default_func {
        Some(func) => func.evaluate(value_type),
        None => Ok(None),
    }
}

/// Reject input the generator cannot convert faithfully
///
/// Collections must carry an element reference and scalars must not. An
/// element that looks like a schema or resource but failed to deserialize as
/// one is also rejected instead of being passed through as unknown.
pub fn validate_provider(provider: &dyn ProviderDefinition) -> Result<()> {
    validate_attributes("provider", provider.schema())?;
    for (name, resource) in provider.resources() {
        validate_resource(&format!("resources.{}", name), resource)?;
    }
    for (name, data_source) in provider.data_sources() {
        validate_resource(&format!("data-sources.{}", name), data_source)?;
    }
    Ok(())
}

fn validate_resource(path: &str, resource: &dyn ResourceDefinition) -> Result<()> {
    validate_attributes(path, resource.attributes())
}

fn validate_attributes<'a>(
    path: &str,
    attributes: impl Iterator<Item = (&'a str, &'a dyn SchemaNode)>,
) -> Result<()> {
    for (name, node) in attributes {
        validate_node(&format!("{}.{}", path, name), node)?;
    }
    Ok(())
}

fn validate_node(path: &str, node: &dyn SchemaNode) -> Result<()> {
    let value_type = node.value_type();
    match (value_type.is_collection(), node.elem()) {
        (true, None) => Err(ExtractorError::Malformed(format!(
            "{}: {} requires an Elem",
            path, value_type
        ))),
        (false, Some(_)) => Err(ExtractorError::Malformed(format!(
            "{}: {} must not have an Elem",
            path, value_type
        ))),
        (_, Some(ElementRef::Resource(resource))) => validate_resource(path, resource),
        (_, Some(ElementRef::Schema(inner))) => validate_node(&format!("{}.Elem", path), inner),
        (_, Some(ElementRef::Other(value))) if looks_like_definition(value) => {
            Err(ExtractorError::Malformed(format!(
                "{}: Elem is neither a value type, a schema nor a resource",
                path
            )))
        }
        _ => Ok(()),
    }
}

fn looks_like_definition(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.contains_key("Schema") || object.contains_key("Type"))
}
