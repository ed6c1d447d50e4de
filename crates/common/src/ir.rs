//! Intermediate representation of an extracted provider schema
//!
//! These types are produced bottom-up by the generator and serialized as the
//! versioned JSON document. Field names and omission rules are part of the
//! document format and must not change without bumping [`SCHEMA_VERSION`].

use crate::TimeoutKind;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Format version stamped into every document
pub const SCHEMA_VERSION: &str = "2";

/// Value of the document's `type` field
pub const PROVIDER_DOCUMENT_TYPE: &str = "provider";

/// Reserved key holding a resource's declared timeouts
pub const TIMEOUTS_KEY: &str = "__timeouts__";

/// Attribute name to definition, for one resource, data source or block
pub type SchemaInfo = BTreeMap<String, SchemaDefinition>;

/// How a list or set attribute is written in configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImplicitMode {
    Attr,
    Block,
    ComputedBlock,
}

/// Description of an attribute's element or default value
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaElement {
    /// A bare scalar type, e.g. the element type of a list of strings
    Value(String),
    /// A nested scalar-typed schema node, carrying its short type name
    Elements(String),
    /// A nested block
    Info(SchemaInfo),
    /// Anything else, described by a type name and a textual rendering
    Unknown { type_name: String, value: String },
}

impl SchemaElement {
    /// Tag written to the element's `Type` field, if any
    pub fn type_tag(&self) -> Option<&str> {
        match self {
            SchemaElement::Value(_) => None,
            SchemaElement::Elements(_) => Some("SchemaElements"),
            SchemaElement::Info(_) => Some("SchemaInfo"),
            SchemaElement::Unknown { type_name, .. } => Some(type_name.as_str()),
        }
    }
}

impl Serialize for SchemaElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(tag) = self.type_tag().filter(|t| !t.is_empty()) {
            map.serialize_entry("Type", tag)?;
        }
        match self {
            SchemaElement::Value(value) | SchemaElement::Unknown { value, .. } => {
                if !value.is_empty() {
                    map.serialize_entry("Value", value)?;
                }
            }
            SchemaElement::Elements(elements_type) => {
                if !elements_type.is_empty() {
                    map.serialize_entry("ElementsType", elements_type)?;
                }
            }
            SchemaElement::Info(info) => {
                if !info.is_empty() {
                    map.serialize_entry("Info", info)?;
                }
            }
        }
        map.end()
    }
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One named configuration attribute or block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SchemaDefinition {
    #[serde(rename = "Type", skip_serializing_if = "String::is_empty")]
    pub value_type: String,
    #[serde(skip_serializing_if = "is_false")]
    pub optional: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub input_default: String,
    #[serde(skip_serializing_if = "is_false")]
    pub computed: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub max_items: usize,
    #[serde(skip_serializing_if = "is_zero")]
    pub min_items: usize,
    #[serde(skip_serializing_if = "is_false")]
    pub promote_single: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub is_block: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_implicit_mode: Option<ImplicitMode>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub computed_when: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conflicts_with: Vec<String>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub deprecated: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub removed: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<SchemaElement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elem: Option<SchemaElement>,
}

/// Attributes of a resource or data source, plus its declared timeouts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceSchema {
    pub attributes: SchemaInfo,
    /// Declared timeouts, in [`TimeoutKind::ALL`] order
    pub timeouts: Vec<TimeoutKind>,
}

impl Serialize for ResourceSchema {
    /// Writes attributes and the reserved timeouts key as a single object.
    ///
    /// Keys stay in bytewise order, so `__timeouts__` lands between
    /// upper-case and lower-case attribute names.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.attributes.len() + usize::from(!self.timeouts.is_empty());
        let mut map = serializer.serialize_map(Some(len))?;
        let mut timeouts_pending = !self.timeouts.is_empty();
        for (name, definition) in &self.attributes {
            if timeouts_pending && name.as_str() > TIMEOUTS_KEY {
                map.serialize_entry(TIMEOUTS_KEY, &self.timeouts)?;
                timeouts_pending = false;
            }
            map.serialize_entry(name, definition)?;
        }
        if timeouts_pending {
            map.serialize_entry(TIMEOUTS_KEY, &self.timeouts)?;
        }
        map.end()
    }
}

/// Root of the emitted document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceProviderSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub document_type: String,
    pub version: String,
    #[serde(rename = ".sdk_type")]
    pub sdk_type: String,
    #[serde(rename = ".schema_version")]
    pub schema_version: String,
    pub provider: SchemaInfo,
    pub resources: BTreeMap<String, ResourceSchema>,
    #[serde(rename = "data-sources")]
    pub data_sources: BTreeMap<String, ResourceSchema>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_definition_omits_empty_fields() {
        let definition = SchemaDefinition {
            value_type: "String".to_string(),
            required: true,
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&definition).unwrap(),
            json!({"Type": "String", "Required": true})
        );
    }

    #[test]
    fn test_definition_field_order() {
        let definition = SchemaDefinition {
            value_type: "List".to_string(),
            optional: true,
            max_items: 5,
            is_block: true,
            config_implicit_mode: Some(ImplicitMode::ComputedBlock),
            elem: Some(SchemaElement::Value("String".to_string())),
            ..Default::default()
        };
        let rendered = serde_json::to_string(&definition).unwrap();
        assert_eq!(
            rendered,
            r#"{"Type":"List","Optional":true,"MaxItems":5,"IsBlock":true,"ConfigImplicitMode":"ComputedBlock","Elem":{"Value":"String"}}"#
        );
    }

    #[test]
    fn test_element_variants() {
        assert_eq!(
            serde_json::to_value(SchemaElement::Elements("Int".to_string())).unwrap(),
            json!({"Type": "SchemaElements", "ElementsType": "Int"})
        );
        assert_eq!(
            serde_json::to_value(SchemaElement::Info(SchemaInfo::new())).unwrap(),
            json!({"Type": "SchemaInfo"})
        );
        assert_eq!(
            serde_json::to_value(SchemaElement::Unknown {
                type_name: "string".to_string(),
                value: "us-east-1".to_string(),
            })
            .unwrap(),
            json!({"Type": "string", "Value": "us-east-1"})
        );
    }

    #[test]
    fn test_resource_schema_timeouts_key_position() {
        let mut attributes = SchemaInfo::new();
        attributes.insert("Zone".to_string(), SchemaDefinition::default());
        attributes.insert("name".to_string(), SchemaDefinition::default());
        let resource = ResourceSchema {
            attributes,
            timeouts: vec![TimeoutKind::Create, TimeoutKind::Delete],
        };
        let rendered = serde_json::to_string(&resource).unwrap();
        assert_eq!(
            rendered,
            r#"{"Zone":{},"__timeouts__":["create","delete"],"name":{}}"#
        );
    }

    #[test]
    fn test_resource_schema_without_timeouts() {
        let mut attributes = SchemaInfo::new();
        attributes.insert("name".to_string(), SchemaDefinition::default());
        let resource = ResourceSchema {
            attributes,
            timeouts: vec![],
        };
        assert_eq!(serde_json::to_string(&resource).unwrap(), r#"{"name":{}}"#);
    }
}
