//! Dialect-neutral view over provider dumps

use super::types::{ProviderDump, Resource, Schema};
use crate::shared::resolve_default;
use serde_json::Value;
use tfschema_extractor_common::{
    Attributes, ConfigMode, DefaultValueError, Dialect, ElementRef, ProviderDefinition,
    ResourceDefinition, Resources, SchemaNode, Timeouts, ValueType,
};

/// A validated dump together with the dialect it was read as
#[derive(Debug, Clone)]
pub struct DumpProvider {
    pub(super) dialect: Dialect,
    pub(super) dump: ProviderDump,
}

impl DumpProvider {
    pub fn dump(&self) -> &ProviderDump {
        &self.dump
    }
}

impl ProviderDefinition for DumpProvider {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn schema(&self) -> Attributes<'_> {
        Box::new(
            self.dump
                .schema
                .iter()
                .map(|(name, node)| (name.as_str(), node as &dyn SchemaNode)),
        )
    }

    fn resources(&self) -> Resources<'_> {
        Box::new(
            self.dump
                .resources_map
                .iter()
                .map(|(name, resource)| (name.as_str(), resource as &dyn ResourceDefinition)),
        )
    }

    fn data_sources(&self) -> Resources<'_> {
        Box::new(
            self.dump
                .data_sources_map
                .iter()
                .map(|(name, resource)| (name.as_str(), resource as &dyn ResourceDefinition)),
        )
    }
}

impl ResourceDefinition for Resource {
    fn attributes(&self) -> Attributes<'_> {
        Box::new(
            self.schema
                .iter()
                .map(|(name, node)| (name.as_str(), node as &dyn SchemaNode)),
        )
    }

    fn timeouts(&self) -> Option<&Timeouts> {
        self.timeouts.as_ref()
    }
}

impl SchemaNode for Schema {
    fn value_type(&self) -> ValueType {
        self.value_type
    }

    fn optional(&self) -> bool {
        self.optional
    }

    fn required(&self) -> bool {
        self.required
    }

    fn computed(&self) -> bool {
        self.computed
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_default(&self) -> &str {
        &self.input_default
    }

    fn min_items(&self) -> usize {
        self.min_items
    }

    fn max_items(&self) -> usize {
        self.max_items
    }

    fn config_mode(&self) -> ConfigMode {
        self.config_mode
    }

    fn conflicts_with(&self) -> &[String] {
        &self.conflicts_with
    }

    fn deprecated(&self) -> &str {
        &self.deprecated
    }

    fn promote_single(&self) -> bool {
        self.promote_single
    }

    fn computed_when(&self) -> &[String] {
        &self.computed_when
    }

    fn removed(&self) -> &str {
        &self.removed
    }

    fn elem(&self) -> Option<ElementRef<'_>> {
        self.elem.as_ref().map(|elem| elem.as_element_ref())
    }

    fn static_default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    fn default_value(&self) -> Result<Option<Value>, DefaultValueError> {
        resolve_default(
            self.default.as_ref(),
            self.default_func.as_ref(),
            self.value_type,
        )
    }
}
