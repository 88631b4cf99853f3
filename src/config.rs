//! Configuration loader: merges env vars, .env file, and clearing.toml.

use clearing::ClearingConfig;
use common::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_SETTINGS_PATH: &str = "clearing.toml";

/// Top-level driver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog JSON (sites and bidders).
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Auction batch JSON; `None` or `-` reads stdin.
    #[serde(default)]
    pub input_path: Option<String>,

    /// Result JSON; `None` writes stdout.
    #[serde(default)]
    pub output_path: Option<String>,

    /// Pretty-print the result JSON.
    #[serde(default)]
    pub pretty: bool,

    /// JSON-lines run report to append to.
    #[serde(default)]
    pub report_path: Option<String>,

    /// Engine options.
    #[serde(default)]
    pub clearing: ClearingConfig,
}

fn default_catalog_path() -> String {
    "config.json".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            input_path: None,
            output_path: None,
            pretty: false,
            report_path: None,
            clearing: ClearingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(input: &str) -> Result<Self, Error> {
        toml::from_str(input).map_err(|e| Error::Settings(format!("Failed to parse settings: {}", e)))
    }

    /// Apply `CLEARING_*` overrides from `lookup` (normally the process env).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CLEARING_CATALOG") {
            self.catalog_path = path;
        }
        if let Some(path) = lookup("CLEARING_INPUT") {
            self.input_path = Some(path);
        }
        if let Some(path) = lookup("CLEARING_OUTPUT") {
            self.output_path = Some(path);
        }
        if let Some(flag) = lookup("CLEARING_INCLUDE_ADJUSTED") {
            self.clearing.include_adjusted_value = flag != "0" && flag.to_lowercase() != "false";
        }
    }

    /// Stdin is used when no input path is set or the path is `-`.
    pub fn reads_stdin(&self) -> bool {
        matches!(self.input_path.as_deref(), None | Some("-"))
    }
}

// ── Config loader ─────────────────────────────────────────────────────

/// Load driver configuration from environment and an optional settings file.
///
/// An explicitly named settings file must exist; the default one is optional.
pub fn load_config(settings_path: Option<&Path>) -> Result<AppConfig, Error> {
    // 1. Load .env file from the working directory or its parents.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = AppConfig::default();

    // 3. Settings file.
    let (path, required) = match settings_path {
        Some(p) => (p, true),
        None => (Path::new(DEFAULT_SETTINGS_PATH), false),
    };
    if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Settings(format!("Failed to read {}: {}", path.display(), e))
        })?;
        config = AppConfig::from_toml(&contents)?;
        tracing::debug!("Loaded settings from {}", path.display());
    } else if required {
        return Err(Error::Settings(format!(
            "Settings file not found: {}",
            path.display()
        )));
    }

    // 4. Environment overrides.
    config.apply_env(|key| std::env::var(key).ok());

    Ok(config)
}
