use claimlens_common::LlmConfig;
use claimlens_config::AppConfigLoader;
use serial_test::serial;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// Helper to write a YAML file in a temp dir and return its path.
fn write_yaml(tmp: &TempDir, name: &str, yaml: &str) -> PathBuf {
    let p = tmp.path().join(name);
    fs::write(&p, yaml).expect("write yaml");
    p
}

#[test]
#[serial]
fn test_config_load() {
    let tmp = TempDir::new().unwrap();

    let file_yaml = r#"
version: "0.1"
search:
  api_key: "test-search-key"
  engine_id: "f705585dd92b34144"
  page_delay_ms: 250
llm:
  provider: gemini
  api_key: "test-llm-key"
  model: "gemini-1.5-flash"
scrape:
  timeout_secs: 12
  proxies:
    - "http://10.0.0.1:8080"
    - "http://10.0.0.2:8080"
results_dir: "out"
"#;
    let p = write_yaml(&tmp, "claimlens.yaml", file_yaml);

    let config = AppConfigLoader::new()
        .with_file(p)
        .load()
        .expect("load system config");

    assert_eq!(config.search.api_key.as_deref(), Some("test-search-key"));
    assert_eq!(config.search.page_delay_ms, 250);
    assert_eq!(config.scrape.timeout_secs, 12);
    assert_eq!(config.scrape.proxies.len(), 2);
    assert_eq!(config.results_dir, "out");
    match config.llm {
        Some(LlmConfig::Gemini { ref model, .. }) => assert_eq!(model, "gemini-1.5-flash"),
        ref other => panic!("expected gemini config, got {:?}", other),
    }
}

#[test]
#[serial]
fn missing_file_yields_defaults() {
    let config = AppConfigLoader::new()
        .with_file("/nonexistent/claimlens.yaml")
        .load()
        .expect("optional file");

    assert!(config.search.api_key.is_none());
    assert!(config.scrape.proxies.is_empty());
    assert_eq!(config.search.endpoint, "https://www.googleapis.com/");
}
