use docgraph_core::config::{
    DEFAULT_BATCH_SIZE, DEFAULT_DATA_DIR, DEFAULT_EMBEDDING_MODEL, DEFAULT_INFER_HIERARCHY,
    DEFAULT_NODE_TABLE, DEFAULT_SERVE_PORT,
};
use docgraph_core::{Config, ConfigError};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.hierarchy.infer_hierarchy, DEFAULT_INFER_HIERARCHY);
    assert_eq!(config.store.data_dir, DEFAULT_DATA_DIR);
    assert_eq!(config.store.table, DEFAULT_NODE_TABLE);
    assert_eq!(config.store.batch_size, DEFAULT_BATCH_SIZE);
    assert!(!config.store.reset_on_start);
    assert_eq!(config.embedding.model, DEFAULT_EMBEDDING_MODEL);
    assert_eq!(config.visualization.port, DEFAULT_SERVE_PORT);
}

#[test]
fn test_config_to_toml() {
    let toml_str = Config::default_config_string();
    assert!(toml_str.contains("[hierarchy]"));
    assert!(toml_str.contains("[store]"));
    assert!(toml_str.contains("[embedding]"));
    assert!(toml_str.contains("[visualization]"));
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
[hierarchy]
infer_hierarchy = false

[store]
table = "pages"
reset_on_start = true
"#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert!(!config.hierarchy.infer_hierarchy);
    assert_eq!(config.store.table, "pages");
    assert!(config.store.reset_on_start);
    // Unset fields keep their defaults
    assert_eq!(config.store.batch_size, DEFAULT_BATCH_SIZE);
    assert_eq!(config.embedding.model, DEFAULT_EMBEDDING_MODEL);
}

#[test]
fn test_default_config_round_trips() {
    let parsed: Config = toml::from_str(&Config::default_config_string()).unwrap();
    assert_eq!(parsed, Config::default());
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docgraph.toml");
    std::fs::write(&path, "[store]\ntable = \"\"\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_from_file_missing() {
    let temp = TempDir::new().unwrap();
    let err = Config::from_file(temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}

#[test]
fn test_from_file_bad_syntax() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("docgraph.toml");
    std::fs::write(&path, "[store\n").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}
