//! Dialect-neutral view of a provider definition
//!
//! Each host schema dialect exposes the same information under slightly
//! different names. Dialect adaptors implement these traits so the generator
//! can be written once against them.

use crate::{ConfigMode, Dialect, Timeouts, ValueType};
use serde_json::Value;
use thiserror::Error;

/// Iterator over a schema map: attribute name and node
pub type Attributes<'a> = Box<dyn Iterator<Item = (&'a str, &'a dyn SchemaNode)> + 'a>;

/// Iterator over a resource map: type name and resource definition
pub type Resources<'a> = Box<dyn Iterator<Item = (&'a str, &'a dyn ResourceDefinition)> + 'a>;

/// Failure while computing a node's effective default value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefaultValueError {
    #[error("environment variable {var} = {value:?} is not a valid {expected}")]
    Coercion {
        var: String,
        value: String,
        expected: &'static str,
    },

    #[error("default function failed: {0}")]
    Function(String),
}

/// What a node's `Elem` refers to
#[derive(Clone, Copy)]
pub enum ElementRef<'a> {
    /// Another schema node; only its type is described
    Schema(&'a dyn SchemaNode),
    /// A nested resource, i.e. a block with its own attributes
    Resource(&'a dyn ResourceDefinition),
    /// A bare scalar type
    ValueType(ValueType),
    /// Anything the dialect could not classify
    Other(&'a Value),
}

/// One attribute or block in a schema map
pub trait SchemaNode {
    fn value_type(&self) -> ValueType;
    fn optional(&self) -> bool;
    fn required(&self) -> bool;
    fn computed(&self) -> bool;
    fn description(&self) -> &str;
    fn input_default(&self) -> &str;
    fn min_items(&self) -> usize;
    fn max_items(&self) -> usize;
    fn config_mode(&self) -> ConfigMode;
    fn conflicts_with(&self) -> &[String];
    fn deprecated(&self) -> &str;

    /// Not available in every dialect
    fn promote_single(&self) -> bool {
        false
    }

    fn computed_when(&self) -> &[String];

    /// Not available in every dialect
    fn removed(&self) -> &str {
        ""
    }

    fn elem(&self) -> Option<ElementRef<'_>>;

    /// Statically declared default
    fn static_default(&self) -> Option<&Value>;

    /// Effective default: the static default if declared, otherwise whatever
    /// the node's default function yields.
    fn default_value(&self) -> Result<Option<Value>, DefaultValueError>;
}

/// A resource, data source or nested block
pub trait ResourceDefinition {
    fn attributes(&self) -> Attributes<'_>;

    fn timeouts(&self) -> Option<&Timeouts> {
        None
    }
}

/// A provider: its own configuration schema plus resources and data sources
pub trait ProviderDefinition {
    /// Dialect the definition was read from
    fn dialect(&self) -> Dialect;
    fn schema(&self) -> Attributes<'_>;
    fn resources(&self) -> Resources<'_>;
    fn data_sources(&self) -> Resources<'_>;
}
