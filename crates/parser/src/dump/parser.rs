//! Dump parser

use super::adaptor::DumpProvider;
use super::types::ProviderDump;
use crate::shared::validate_provider;
use serde_json::Value;
use std::path::Path;
use tfschema_extractor_common::{Dialect, ExtractorError, Result};

/// Reads provider dumps
pub struct DumpParser {
    /// Loaded dump
    dump: ProviderDump,

    /// Dialect the dump is read as
    dialect: Dialect,
}

impl DumpParser {
    /// Load a dump from a JSON or YAML file
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = DumpParser::from_file("dumps/google.json", Dialect::Sdk)?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Self> {
        let path = path.as_ref();
        let document = crate::read_document(path)?;
        Self::from_value(document, dialect).map_err(|e| match e {
            ExtractorError::Json(err) => ExtractorError::Parse(format!(
                "Failed to read {} dump {}: {}",
                dialect,
                path.display(),
                err
            )),
            other => other,
        })
    }

    /// Load a dump from a JSON string
    pub fn from_json(json: &str, dialect: Dialect) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?, dialect)
    }

    /// Load a dump from an already decoded document
    pub fn from_value(document: Value, dialect: Dialect) -> Result<Self> {
        let mut dump: ProviderDump = serde_json::from_value(document)?;
        if dialect == Dialect::Sdk2 {
            dump.clear_v1_fields();
        }
        Ok(Self { dump, dialect })
    }

    /// Validate the dump and expose it through the dialect-neutral traits
    pub fn parse(self) -> Result<DumpProvider> {
        let provider = DumpProvider {
            dialect: self.dialect,
            dump: self.dump,
        };
        validate_provider(&provider)?;
        Ok(provider)
    }

    /// Get reference to the underlying dump
    pub fn dump(&self) -> &ProviderDump {
        &self.dump
    }
}
