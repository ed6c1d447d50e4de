//! Common types and utilities for the Terraform schema extractor
//!
//! This crate contains the intermediate representation emitted by the
//! generator, the dialect-neutral traits that every dialect adaptor
//! implements, and the shared error type.

pub mod ir;
pub mod provider_info;
pub mod source;

pub use ir::{
    ImplicitMode, ResourceProviderSchema, ResourceSchema, SchemaDefinition, SchemaElement,
    SchemaInfo, PROVIDER_DOCUMENT_TYPE, SCHEMA_VERSION, TIMEOUTS_KEY,
};
pub use provider_info::ProviderInfo;
pub use source::{
    Attributes, DefaultValueError, ElementRef, ProviderDefinition, Resources, ResourceDefinition,
    SchemaNode,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while loading, converting or emitting a provider schema
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed schema: {0}")]
    Malformed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write {}: {source}", path.display())]
    Emit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for extractor operations
pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Host schema dialect that produced a provider definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    /// `terraform/helper/schema`, bundled with Terraform core
    #[serde(rename = "legacy")]
    Legacy,
    /// `terraform-plugin-sdk` v1
    #[serde(rename = "sdk")]
    Sdk,
    /// `terraform-plugin-sdk` v2
    #[serde(rename = "sdk-2")]
    Sdk2,
}

impl Dialect {
    /// Tag stamped into the `.sdk_type` field of the emitted document.
    ///
    /// Documents produced from the legacy dialect have always carried an
    /// empty tag, and downstream consumers rely on that.
    pub fn tag(self) -> &'static str {
        match self {
            Dialect::Legacy => "",
            Dialect::Sdk => "terraform-sdk",
            Dialect::Sdk2 => "terraform-sdk-2",
        }
    }

    /// Name used on the command line and in metadata files
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Legacy => "legacy",
            Dialect::Sdk => "sdk",
            Dialect::Sdk2 => "sdk-2",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ExtractorError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "legacy" | "terraform" => Ok(Dialect::Legacy),
            "sdk" | "sdk-1" | "terraform-sdk" => Ok(Dialect::Sdk),
            "sdk-2" | "sdk2" | "terraform-sdk-2" => Ok(Dialect::Sdk2),
            other => Err(ExtractorError::Parse(format!("Unknown dialect: {}", other))),
        }
    }
}

/// Kind of value a schema node holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    #[serde(rename = "TypeBool", alias = "Bool")]
    Bool,
    #[serde(rename = "TypeInt", alias = "Int")]
    Int,
    #[serde(rename = "TypeFloat", alias = "Float")]
    Float,
    #[serde(rename = "TypeString", alias = "String")]
    String,
    #[serde(rename = "TypeList", alias = "List")]
    List,
    #[serde(rename = "TypeMap", alias = "Map")]
    Map,
    #[serde(rename = "TypeSet", alias = "Set")]
    Set,
}

impl ValueType {
    /// Whether values of this type are collections that carry an element type
    pub fn is_collection(self) -> bool {
        matches!(self, ValueType::List | ValueType::Map | ValueType::Set)
    }
}

impl fmt::Display for ValueType {
    /// Renders the verbose host name, e.g. `TypeString`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "TypeBool",
            ValueType::Int => "TypeInt",
            ValueType::Float => "TypeFloat",
            ValueType::String => "TypeString",
            ValueType::List => "TypeList",
            ValueType::Map => "TypeMap",
            ValueType::Set => "TypeSet",
        };
        f.write_str(name)
    }
}

/// How a list or set attribute may be written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConfigMode {
    #[default]
    #[serde(rename = "SchemaConfigModeAuto", alias = "auto", alias = "Auto")]
    Auto,
    #[serde(rename = "SchemaConfigModeAttr", alias = "attr", alias = "Attr")]
    Attr,
    #[serde(rename = "SchemaConfigModeBlock", alias = "block", alias = "Block")]
    Block,
}

/// Operation for which a resource may declare a timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutKind {
    Create,
    Read,
    Update,
    Delete,
    Default,
}

impl TimeoutKind {
    /// Every timeout kind, in the order they are emitted
    pub const ALL: [TimeoutKind; 5] = [
        TimeoutKind::Create,
        TimeoutKind::Read,
        TimeoutKind::Update,
        TimeoutKind::Delete,
        TimeoutKind::Default,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeoutKind::Create => "create",
            TimeoutKind::Read => "read",
            TimeoutKind::Update => "update",
            TimeoutKind::Delete => "delete",
            TimeoutKind::Default => "default",
        }
    }
}

impl fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation timeouts declared on a resource
///
/// Values are kept as the duration strings found in the dump (e.g. `"20m"`).
/// Unknown operation names are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Timeouts {
    #[serde(default, alias = "create")]
    pub create: Option<String>,
    #[serde(default, alias = "read")]
    pub read: Option<String>,
    #[serde(default, alias = "update")]
    pub update: Option<String>,
    #[serde(default, alias = "delete")]
    pub delete: Option<String>,
    #[serde(default, alias = "default")]
    pub default: Option<String>,
}

impl Timeouts {
    /// Declared duration for a timeout kind
    pub fn get(&self, kind: TimeoutKind) -> Option<&str> {
        match kind {
            TimeoutKind::Create => self.create.as_deref(),
            TimeoutKind::Read => self.read.as_deref(),
            TimeoutKind::Update => self.update.as_deref(),
            TimeoutKind::Delete => self.delete.as_deref(),
            TimeoutKind::Default => self.default.as_deref(),
        }
    }

    /// A kind counts as declared when it carries a non-empty duration
    pub fn is_declared(&self, kind: TimeoutKind) -> bool {
        self.get(kind).is_some_and(|d| !d.trim().is_empty())
    }
}

/// Strip the `Type` prefix from a verbose type name
///
/// # Examples
/// ```
/// use tfschema_extractor_common::shorten_type;
///
/// assert_eq!(shorten_type("TypeString"), "String");
/// assert_eq!(shorten_type("String"), "String");
/// assert_eq!(shorten_type("Type"), "Type");
/// ```
pub fn shorten_type(value: &str) -> &str {
    match value.strip_prefix("Type") {
        Some(rest) if !rest.is_empty() => rest,
        _ => value,
    }
}
