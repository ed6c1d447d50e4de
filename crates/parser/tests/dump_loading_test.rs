//! Integration tests for loading provider dumps from disk

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tfschema_extractor_common::{
    ConfigMode, Dialect, ElementRef, ExtractorError, ProviderDefinition, TimeoutKind, ValueType,
};
use tfschema_extractor_parser::{load_provider, DumpParser};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_load_v1_json_dump() {
    let provider = load_provider(&fixture("widgets_sdk.json"), None).unwrap();
    assert_eq!(provider.dialect(), Dialect::Sdk);
    assert_eq!(provider.schema().count(), 2);
    assert_eq!(provider.resources().count(), 1);
    assert_eq!(provider.data_sources().count(), 1);

    let (name, widget) = provider.resources().next().unwrap();
    assert_eq!(name, "widgets_widget");

    let timeouts = widget.timeouts().unwrap();
    let declared: Vec<TimeoutKind> = TimeoutKind::ALL
        .into_iter()
        .filter(|kind| timeouts.is_declared(*kind))
        .collect();
    assert_eq!(declared, vec![TimeoutKind::Create, TimeoutKind::Delete]);

    let (_, zone) = widget.attributes().find(|(name, _)| *name == "zone").unwrap();
    assert_eq!(zone.removed(), "zone is no longer supported");
    assert_eq!(zone.deprecated(), "use location instead");

    let (_, part) = widget.attributes().find(|(name, _)| *name == "part").unwrap();
    assert!(part.promote_single());
    assert_eq!(part.value_type(), ValueType::List);
    assert_eq!(part.config_mode(), ConfigMode::Auto);
    assert!(matches!(part.elem(), Some(ElementRef::Resource(_))));
}

#[test]
fn test_load_v2_yaml_dump() {
    let provider = load_provider(&fixture("gadgets_sdk2.yaml"), None).unwrap();
    assert_eq!(provider.dialect(), Dialect::Sdk2);

    let (_, region) = provider.schema().next().unwrap();
    assert_eq!(region.static_default(), Some(&serde_json::json!("us-east-1")));

    let (_, gadget) = provider.resources().next().unwrap();
    assert!(gadget.timeouts().unwrap().is_declared(TimeoutKind::Update));

    let (_, labels) = gadget.attributes().find(|(name, _)| *name == "labels").unwrap();
    assert!(matches!(labels.elem(), Some(ElementRef::Schema(_))));
}

#[test]
fn test_explicit_dialect_overrides_detection() {
    let provider = load_provider(&fixture("widgets_sdk.json"), Some(Dialect::Legacy)).unwrap();
    assert_eq!(provider.dialect(), Dialect::Legacy);

    // sdk-2 drops the v1-only fields.
    let provider = load_provider(&fixture("widgets_sdk.json"), Some(Dialect::Sdk2)).unwrap();
    let (_, widget) = provider.resources().next().unwrap();
    let (_, zone) = widget.attributes().find(|(name, _)| *name == "zone").unwrap();
    assert_eq!(zone.removed(), "");
}

#[test]
fn test_parsers_from_file() {
    let provider = DumpParser::from_file(fixture("widgets_sdk.json"), Dialect::Sdk)
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(provider.dump().resources_map.len(), 1);

    let provider = DumpParser::from_file(fixture("gadgets_sdk2.yaml"), Dialect::Sdk2)
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(provider.dump().resources_map.len(), 1);
}

#[test]
fn test_missing_file() {
    let result = load_provider(&fixture("does_not_exist.json"), None);
    assert!(matches!(result, Err(ExtractorError::Parse(_))));
}

#[test]
fn test_invalid_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{\"Schema\": ").unwrap();

    let result = load_provider(&path, None);
    assert!(matches!(result, Err(ExtractorError::Parse(_))));
}

#[test]
fn test_malformed_dump_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("malformed.yaml");
    fs::write(
        &path,
        "ResourcesMap:\n  thing:\n    Schema:\n      items:\n        Type: TypeSet\n",
    )
    .unwrap();

    match load_provider(&path, None) {
        Err(ExtractorError::Malformed(message)) => {
            assert!(message.contains("resources.thing.items"), "{}", message)
        }
        other => panic!("expected a malformed dump error, got {:?}", other.map(|_| ())),
    }
}
