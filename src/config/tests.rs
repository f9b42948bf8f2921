use super::core::DEFAULT_CONFIG;
use super::*;
use figment::{
    Figment,
    providers::{Format, Json, Toml},
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn defaults() -> Figment {
    Figment::new().merge(Toml::string(DEFAULT_CONFIG))
}

#[test]
fn test_embedded_defaults() {
    let config = ManifestConfig::embedded().expect("Should load embedded defaults");

    assert_eq!(config.default_root, PathBuf::from("."));
    assert_eq!(config.output_file, PathBuf::from("directory_structure.json"));
    assert_eq!(config.ignore_file, ".gitignore");
    assert_eq!(config.flatten_separator, "__");
    assert_eq!(config.collision_policy, CollisionPolicy::Warn);
    assert!(config.default_ignores.iter().any(|name| name == ".git"));
    assert!(config.default_ignores.iter().any(|name| name == "__pycache__"));

    assert_eq!(config.source_list(), vec!["GitHub", "Gitee"]);
}

#[test]
fn test_backends_keep_declaration_order() {
    let config = ManifestConfig::embedded().unwrap();
    let keys: Vec<&str> = config.backends.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, vec!["github_raw_url", "gitee_raw_url", "cloud_url"]);
}

#[test]
fn test_override_replaces_backends() {
    let figment = defaults().merge(Toml::string(
        r#"
        output_file = "manifest.json"
        collision_policy = "error"

        [[backends]]
        name = "Drive"
        key = "drive_url"
        base_url = "https://drive/y"
        layout = "flat"
        "#,
    ));
    let config = ManifestConfig::from_figment(figment).unwrap();

    assert_eq!(config.output_file, PathBuf::from("manifest.json"));
    assert_eq!(config.collision_policy, CollisionPolicy::Error);
    assert_eq!(config.backends.len(), 1);
    assert_eq!(config.source_list(), vec!["Drive"]);
    assert_eq!(config.backends[0].layout, crate::backends::Layout::Flat);
    // untouched keys keep their defaults
    assert_eq!(config.ignore_file, ".gitignore");
}

#[test]
fn test_json_override() {
    let figment = defaults().merge(Json::string(r#"{"flatten_separator": "--"}"#));
    let config = ManifestConfig::from_figment(figment).unwrap();
    assert_eq!(config.flatten_separator, "--");
}

#[test]
fn test_rejects_duplicate_enabled_keys() {
    let figment = defaults().merge(Toml::string(
        r#"
        [[backends]]
        name = "A"
        key = "url"
        base_url = "https://a"

        [[backends]]
        name = "B"
        key = "url"
        base_url = "https://b"
        "#,
    ));
    let err = ManifestConfig::from_figment(figment).unwrap_err();
    assert!(err.to_string().contains("Duplicate backend key"));
}

#[test]
fn test_allows_duplicate_key_when_disabled() {
    let figment = defaults().merge(Toml::string(
        r#"
        [[backends]]
        name = "A"
        key = "url"
        base_url = "https://a"

        [[backends]]
        name = "B"
        key = "url"
        base_url = "https://b"
        enabled = false
        "#,
    ));
    let config = ManifestConfig::from_figment(figment).unwrap();
    assert_eq!(config.source_list(), vec!["A"]);
}

#[test]
fn test_rejects_reserved_key() {
    let mut config = ManifestConfig::embedded().unwrap();
    config.backends[0].key = "size".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("reserved key"));
}

#[test]
fn test_rejects_bad_separator() {
    let mut config = ManifestConfig::embedded().unwrap();
    config.flatten_separator = String::new();
    assert!(config.validate().is_err());

    config.flatten_separator = "/".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_empty_base_url() {
    let mut config = ManifestConfig::embedded().unwrap();
    config.backends[1].base_url = "  ".to_string();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("Gitee"));
}

#[test]
fn test_custom_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    fs::write(&path, "output_file = \"custom.json\"\n").unwrap();

    let config = ManifestConfig::load_with_custom_config(Some(&path)).unwrap();
    assert_eq!(config.output_file, PathBuf::from("custom.json"));
}

#[test]
fn test_custom_yaml_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.yml");
    fs::write(&path, "ignore_file: .ignorelist\n").unwrap();

    let config = ManifestConfig::load_with_custom_config(Some(&path)).unwrap();
    assert_eq!(config.ignore_file, ".ignorelist");
}

#[test]
fn test_missing_custom_config_is_an_error() {
    let result = ManifestConfig::load_with_custom_config(Some(Path::new("non_existent.toml")));
    assert!(result.is_err());
}
