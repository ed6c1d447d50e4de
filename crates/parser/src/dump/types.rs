//! Dump type definitions
//!
//! Field names follow the host SDK's `schema.Schema` struct.

use crate::shared::{DefaultFunc, Elem};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tfschema_extractor_common::{ConfigMode, Timeouts, ValueType};

/// Provider dump root
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderDump {
    /// Provider configuration schema
    #[serde(default)]
    pub schema: BTreeMap<String, Schema>,

    /// Managed resources by type name
    #[serde(default)]
    pub resources_map: BTreeMap<String, Resource>,

    /// Data sources by type name
    #[serde(default)]
    pub data_sources_map: BTreeMap<String, Resource>,
}

/// Resource, data source or nested block
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    pub schema: BTreeMap<String, Schema>,

    #[serde(default)]
    pub timeouts: Option<Timeouts>,
}

/// One attribute or block
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Schema {
    #[serde(rename = "Type")]
    pub value_type: ValueType,

    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub computed: bool,

    #[serde(default)]
    pub description: String,

    /// Default as shown to users in `terraform console` and docs
    #[serde(default)]
    pub input_default: String,

    #[serde(default)]
    pub max_items: usize,
    #[serde(default)]
    pub min_items: usize,

    /// Accept a single value where a list is expected
    #[serde(default)]
    pub promote_single: bool,

    #[serde(default)]
    pub computed_when: Vec<String>,
    #[serde(default)]
    pub conflicts_with: Vec<String>,

    #[serde(default)]
    pub deprecated: String,
    #[serde(default)]
    pub removed: String,

    #[serde(default)]
    pub config_mode: ConfigMode,

    #[serde(default)]
    pub elem: Option<Elem<Schema, Resource>>,

    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub default_func: Option<DefaultFunc>,
}

impl ProviderDump {
    /// Clear the fields `terraform-plugin-sdk` v2 no longer has
    pub fn clear_v1_fields(&mut self) {
        self.schema.values_mut().for_each(Schema::clear_v1_fields);
        let resources = self
            .resources_map
            .values_mut()
            .chain(self.data_sources_map.values_mut());
        for resource in resources {
            resource.schema.values_mut().for_each(Schema::clear_v1_fields);
        }
    }
}

impl Schema {
    fn clear_v1_fields(&mut self) {
        self.promote_single = false;
        self.removed.clear();
        match &mut self.elem {
            Some(Elem::Resource(resource)) => {
                resource.schema.values_mut().for_each(Schema::clear_v1_fields)
            }
            Some(Elem::Schema(schema)) => schema.clear_v1_fields(),
            _ => {}
        }
    }
}
