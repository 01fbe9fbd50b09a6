//! Loader for workspace configuration with YAML + environment overlays.
//!
//! A `claimlens.yaml` file is merged with `CLAIMLENS_`-prefixed environment
//! variables, `${VAR}` placeholders are expanded recursively (depth-capped),
//! and the result is deserialized into [`AppConfig`]. Search credentials and
//! the proxy pool are optional: when absent the pipeline degrades (empty
//! search results, direct fetching) instead of refusing to start.
use claimlens_common::LlmConfig;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level application configuration.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub version: Option<String>,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub llm: Option<LlmConfig>,
    #[serde(default)]
    pub scrape: ScrapeSection,
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

/// Keyed, paged web-search API credentials and paging knobs.
#[derive(Debug, Deserialize)]
pub struct SearchSection {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub engine_id: Option<String>,
    #[serde(default = "default_search_endpoint")]
    pub endpoint: String,
    /// Fixed delay between paged search requests, applied to both recency
    /// variants.
    #[serde(default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            api_key: None,
            engine_id: None,
            endpoint: default_search_endpoint(),
            page_delay_ms: default_page_delay_ms(),
        }
    }
}

/// Scrape-engine knobs: egress proxies and the per-request timeout.
#[derive(Debug, Deserialize)]
pub struct ScrapeSection {
    #[serde(default)]
    pub proxies: Vec<String>,
    #[serde(default = "default_scrape_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScrapeSection {
    fn default() -> Self {
        Self {
            proxies: Vec::new(),
            timeout_secs: default_scrape_timeout_secs(),
        }
    }
}

fn default_search_endpoint() -> String {
    "https://www.googleapis.com/".into()
}
fn default_page_delay_ms() -> u64 {
    1000
}
fn default_scrape_timeout_secs() -> u64 {
    10
}
fn default_results_dir() -> String {
    "results".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct AppConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for AppConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfigLoader {
    /// Start with the defaults: `CLAIMLENS_` env overrides, `__` separator.
    ///
    /// ```
    /// use claimlens_config::AppConfigLoader;
    ///
    /// let config = AppConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(config.search.api_key.is_none());
    /// assert_eq!(config.results_dir, "results");
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("CLAIMLENS").separator("__"));
        Self { builder }
    }

    /// Attach a config file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// ```
    /// use claimlens_config::AppConfigLoader;
    ///
    /// unsafe { std::env::set_var("CSE_KEY", "injected-from-env"); }
    ///
    /// let config = AppConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// search:
    ///   api_key: "${CSE_KEY}"
    ///   engine_id: "f705585dd92b34144"
    /// scrape:
    ///   proxies:
    ///     - "http://10.0.0.1:8080"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.search.api_key.as_deref(), Some("injected-from-env"));
    /// assert_eq!(config.scrape.proxies.len(), 1);
    /// assert_eq!(config.scrape.timeout_secs, 10);
    ///
    /// unsafe { std::env::remove_var("CSE_KEY"); }
    /// ```
    pub fn load(self) -> Result<AppConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first, expand `${VAR}` recursively,
        // then materialise the strongly-typed config.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: AppConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
