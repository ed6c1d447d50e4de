//! Schema document generation for Terraform providers
//!
//! This crate turns a dialect-neutral provider definition into the versioned
//! schema document and writes it out in the canonical JSON layout.

pub mod convert;
pub mod emitter;

pub use convert::{
    classify_block, declared_timeouts, describe_element, describe_value, export_attributes,
    export_node, export_resource, export_resource_with_timeouts,
};
pub use emitter::{to_json_bytes, to_json_string, write_to_directory, HtmlSafeFormatter};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tfschema_extractor_common::{
    ProviderDefinition, ProviderInfo, ResourceProviderSchema, ResourceSchema, Resources, Result,
    PROVIDER_DOCUMENT_TYPE, SCHEMA_VERSION,
};

/// Schema extractor
///
/// Converts a provider definition into a [`ResourceProviderSchema`]:
/// - provider configuration schema
/// - every resource, with its declared timeouts
/// - every data source, with its declared timeouts
pub struct SchemaExtractor {
    info: ProviderInfo,
}

impl SchemaExtractor {
    /// Create a new extractor stamping documents with `info`
    pub fn new(info: ProviderInfo) -> Result<Self> {
        info.validate()?;
        Ok(Self { info })
    }

    pub fn info(&self) -> &ProviderInfo {
        &self.info
    }

    /// Convert a whole provider
    pub fn export(&self, provider: &dyn ProviderDefinition) -> ResourceProviderSchema {
        let dialect = provider.dialect();
        tracing::debug!(provider = %self.info.name, dialect = %dialect, "Exporting provider schema");

        ResourceProviderSchema {
            name: self.info.name.clone(),
            document_type: PROVIDER_DOCUMENT_TYPE.to_string(),
            version: self.info.revision.clone(),
            sdk_type: dialect.tag().to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            provider: export_attributes(provider.schema()),
            resources: export_resources("resource", provider.resources()),
            data_sources: export_resources("data source", provider.data_sources()),
        }
    }

    /// Convert a provider and write it to `<output_dir>/<name>.json`
    pub fn generate_to_directory(
        &self,
        provider: &dyn ProviderDefinition,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let document = self.export(provider);
        write_to_directory(&document, output_dir)
    }
}

fn export_resources(kind: &str, resources: Resources<'_>) -> BTreeMap<String, ResourceSchema> {
    resources
        .map(|(name, resource)| {
            let schema = export_resource_with_timeouts(resource);
            tracing::debug!(
                kind,
                name,
                attributes = schema.attributes.len(),
                timeouts = schema.timeouts.len(),
                "Exported schema"
            );
            (name.to_string(), schema)
        })
        .collect()
}
