//! Schema to IR conversion
//!
//! Every function here is pure: it reads a dialect-neutral definition and
//! builds the matching IR value bottom-up. Nested blocks are walked eagerly.

use serde_json::Value;
use tfschema_extractor_common::{
    shorten_type, Attributes, ConfigMode, ElementRef, ImplicitMode, ResourceDefinition,
    ResourceSchema, SchemaDefinition, SchemaElement, SchemaInfo, SchemaNode, TimeoutKind,
    Timeouts, ValueType,
};

/// Convert a resource or data source, including its declared timeouts
pub fn export_resource_with_timeouts(resource: &dyn ResourceDefinition) -> ResourceSchema {
    ResourceSchema {
        attributes: export_resource(resource),
        timeouts: declared_timeouts(resource.timeouts()),
    }
}

/// Convert the attributes of a resource or nested block
pub fn export_resource(resource: &dyn ResourceDefinition) -> SchemaInfo {
    export_attributes(resource.attributes())
}

/// Convert a schema map, one definition per attribute
pub fn export_attributes(attributes: Attributes<'_>) -> SchemaInfo {
    attributes
        .map(|(name, node)| (name.to_string(), export_node(name, node)))
        .collect()
}

/// Timeout kinds with a declared duration, in [`TimeoutKind::ALL`] order
pub fn declared_timeouts(timeouts: Option<&Timeouts>) -> Vec<TimeoutKind> {
    let Some(timeouts) = timeouts else {
        return Vec::new();
    };
    TimeoutKind::ALL
        .into_iter()
        .filter(|kind| timeouts.is_declared(*kind))
        .collect()
}

/// Convert one named schema node
pub fn export_node(name: &str, node: &dyn SchemaNode) -> SchemaDefinition {
    let value_type = node.value_type();
    let (is_block, config_implicit_mode) =
        classify_block(value_type, node.config_mode(), node.computed());

    SchemaDefinition {
        value_type: shorten_type(&value_type.to_string()).to_string(),
        optional: node.optional(),
        required: node.required(),
        description: node.description().to_string(),
        input_default: node.input_default().to_string(),
        computed: node.computed(),
        max_items: node.max_items(),
        min_items: node.min_items(),
        promote_single: node.promote_single(),
        is_block,
        config_implicit_mode,
        computed_when: node.computed_when().to_vec(),
        conflicts_with: node.conflicts_with().to_vec(),
        deprecated: node.deprecated().to_string(),
        removed: node.removed().to_string(),
        elem: node.elem().map(describe_element),
        default: resolve_default(name, node),
    }
}

/// Block classification, only meaningful for lists and sets
///
/// `Auto` counts as a block: that is how the host SDK treats it for nested
/// resources, and it is the mode every list or set starts out with.
pub fn classify_block(
    value_type: ValueType,
    config_mode: ConfigMode,
    computed: bool,
) -> (bool, Option<ImplicitMode>) {
    if !matches!(value_type, ValueType::List | ValueType::Set) {
        return (false, None);
    }
    match config_mode {
        ConfigMode::Block | ConfigMode::Auto if computed => {
            (true, Some(ImplicitMode::ComputedBlock))
        }
        ConfigMode::Block | ConfigMode::Auto => (true, Some(ImplicitMode::Block)),
        ConfigMode::Attr => (false, Some(ImplicitMode::Attr)),
    }
}

/// Describe what an element reference points at
pub fn describe_element(elem: ElementRef<'_>) -> SchemaElement {
    match elem {
        ElementRef::Schema(node) => {
            SchemaElement::Elements(shorten_type(&node.value_type().to_string()).to_string())
        }
        ElementRef::Resource(resource) => SchemaElement::Info(export_resource(resource)),
        ElementRef::ValueType(value_type) => {
            SchemaElement::Value(shorten_type(&value_type.to_string()).to_string())
        }
        ElementRef::Other(value) => describe_value(value),
    }
}

/// Fallback description of a plain value: its kind and a textual rendering
pub fn describe_value(value: &Value) -> SchemaElement {
    let type_name = match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    };
    let rendered = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        compound => compound.to_string(),
    };
    SchemaElement::Unknown {
        type_name: type_name.to_string(),
        value: rendered,
    }
}

/// Describe the node's effective default when it differs from the static one
///
/// Static defaults are already carried by `InputDefault`; only a default that
/// comes from a default function is described here. A default function that
/// fails is logged and treated as absent.
fn resolve_default(name: &str, node: &dyn SchemaNode) -> Option<SchemaElement> {
    match node.default_value() {
        Ok(Some(value)) if !value.is_null() && node.static_default() != Some(&value) => {
            Some(describe_value(&value))
        }
        Ok(_) => None,
        Err(err) => {
            tracing::warn!(attribute = name, error = %err, "Ignoring unresolvable default value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tfschema_extractor_common::DefaultValueError;

    /// Minimal in-memory node
    struct Node {
        value_type: ValueType,
        computed: bool,
        config_mode: ConfigMode,
        computed_when: Vec<String>,
        elem: Option<ValueType>,
        static_default: Option<Value>,
        default_value: Result<Option<Value>, DefaultValueError>,
    }

    impl Node {
        fn new(value_type: ValueType) -> Self {
            Self {
                value_type,
                computed: false,
                config_mode: ConfigMode::Auto,
                computed_when: Vec::new(),
                elem: value_type.is_collection().then_some(ValueType::String),
                static_default: None,
                default_value: Ok(None),
            }
        }
    }

    impl SchemaNode for Node {
        fn value_type(&self) -> ValueType {
            self.value_type
        }
        fn optional(&self) -> bool {
            true
        }
        fn required(&self) -> bool {
            false
        }
        fn computed(&self) -> bool {
            self.computed
        }
        fn description(&self) -> &str {
            ""
        }
        fn input_default(&self) -> &str {
            ""
        }
        fn min_items(&self) -> usize {
            0
        }
        fn max_items(&self) -> usize {
            0
        }
        fn config_mode(&self) -> ConfigMode {
            self.config_mode
        }
        fn conflicts_with(&self) -> &[String] {
            &[]
        }
        fn deprecated(&self) -> &str {
            ""
        }
        fn computed_when(&self) -> &[String] {
            &self.computed_when
        }
        fn elem(&self) -> Option<ElementRef<'_>> {
            self.elem.map(ElementRef::ValueType)
        }
        fn static_default(&self) -> Option<&Value> {
            self.static_default.as_ref()
        }
        fn default_value(&self) -> Result<Option<Value>, DefaultValueError> {
            self.default_value.clone()
        }
    }

    #[test]
    fn test_classify_block_matrix() {
        assert_eq!(
            classify_block(ValueType::List, ConfigMode::Block, false),
            (true, Some(ImplicitMode::Block))
        );
        assert_eq!(
            classify_block(ValueType::Set, ConfigMode::Block, true),
            (true, Some(ImplicitMode::ComputedBlock))
        );
        assert_eq!(
            classify_block(ValueType::Set, ConfigMode::Auto, false),
            (true, Some(ImplicitMode::Block))
        );
        assert_eq!(
            classify_block(ValueType::List, ConfigMode::Attr, true),
            (false, Some(ImplicitMode::Attr))
        );
        for scalar in [ValueType::Bool, ValueType::Int, ValueType::Float, ValueType::String] {
            assert_eq!(classify_block(scalar, ConfigMode::Block, true), (false, None));
        }
        assert_eq!(classify_block(ValueType::Map, ConfigMode::Block, false), (false, None));
    }

    #[test]
    fn test_export_node_type_is_short() {
        let definition = export_node("port", &Node::new(ValueType::Int));
        assert_eq!(definition.value_type, "Int");
        assert!(definition.elem.is_none());
        assert!(definition.config_implicit_mode.is_none());
    }

    #[test]
    fn test_export_node_carries_computed_when() {
        let mut node = Node::new(ValueType::String);
        node.computed_when = vec!["zone".to_string(), "region".to_string()];
        assert_eq!(export_node("address", &node).computed_when, vec!["zone", "region"]);
        assert!(export_node("address", &Node::new(ValueType::String))
            .computed_when
            .is_empty());
    }

    #[test]
    fn test_export_node_elem_presence() {
        for value_type in [
            ValueType::Bool,
            ValueType::Int,
            ValueType::Float,
            ValueType::String,
            ValueType::List,
            ValueType::Map,
            ValueType::Set,
        ] {
            let definition = export_node("attr", &Node::new(value_type));
            assert_eq!(definition.elem.is_some(), value_type.is_collection());
        }
    }

    #[test]
    fn test_default_equal_to_static_is_suppressed() {
        let mut node = Node::new(ValueType::String);
        node.static_default = Some(json!("us-east-1"));
        node.default_value = Ok(Some(json!("us-east-1")));
        assert!(export_node("region", &node).default.is_none());
    }

    #[test]
    fn test_dynamic_default_is_described() {
        let mut node = Node::new(ValueType::String);
        node.default_value = Ok(Some(json!("eu-west-1")));
        assert_eq!(
            export_node("region", &node).default,
            Some(SchemaElement::Unknown {
                type_name: "string".to_string(),
                value: "eu-west-1".to_string(),
            })
        );
    }

    #[test]
    fn test_failed_default_is_absorbed() {
        let mut node = Node::new(ValueType::Int);
        node.default_value = Err(DefaultValueError::Function("boom".to_string()));
        let definition = export_node("retries", &node);
        assert!(definition.default.is_none());
        assert_eq!(definition.value_type, "Int");
    }

    #[test]
    fn test_null_default_is_ignored() {
        let mut node = Node::new(ValueType::String);
        node.default_value = Ok(Some(Value::Null));
        assert!(export_node("region", &node).default.is_none());
    }

    #[test]
    fn test_describe_value_renderings() {
        let cases = [
            (json!(true), "bool", "true"),
            (json!(3), "int", "3"),
            (json!(1.5), "float", "1.5"),
            (json!("x"), "string", "x"),
            (json!(["a", "b"]), "list", r#"["a","b"]"#),
            (json!({"k": 1}), "map", r#"{"k":1}"#),
        ];
        for (value, type_name, rendered) in cases {
            assert_eq!(
                describe_value(&value),
                SchemaElement::Unknown {
                    type_name: type_name.to_string(),
                    value: rendered.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_describe_element_variants() {
        assert_eq!(
            describe_element(ElementRef::ValueType(ValueType::Float)),
            SchemaElement::Value("Float".to_string())
        );
        let nested = Node::new(ValueType::Bool);
        assert_eq!(
            describe_element(ElementRef::Schema(&nested)),
            SchemaElement::Elements("Bool".to_string())
        );
    }

    #[test]
    fn test_declared_timeouts_use_fixed_order() {
        let timeouts = Timeouts {
            update: Some("30m".to_string()),
            create: Some("20m".to_string()),
            ..Default::default()
        };
        assert_eq!(
            declared_timeouts(Some(&timeouts)),
            vec![TimeoutKind::Create, TimeoutKind::Update]
        );
        assert!(declared_timeouts(None).is_empty());
        assert!(declared_timeouts(Some(&Timeouts::default())).is_empty());
    }
}
