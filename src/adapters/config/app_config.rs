use std::collections::HashMap;

use config::{Config, Environment, File};
use error_stack::{report, ResultExt};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::sheets::layout::{DEFAULT_FIRST_ROW, DEFAULT_MAX_ROW, DEFAULT_SHEET_TITLE};

use super::{
    automation_config::{AutomationConfig, DEFAULT_MAKE_BASE},
    server_config::ServerConfig,
    sheets_config::{SpreadsheetConfig, DEFAULT_SPREADSHEET_ID},
};

pub const DEFAULT_CONFIG_FILE: &str = "Config";
pub const ENV_PREFIX: &str = "CONTACT_SHEET";

/// Flat variables used by existing deployments, and the key each one sets.
const LEGACY_VARIABLES: [(&str, &str); 5] = [
    ("GOOGLE_CREDS_B64", "sheets.credentials.b64"),
    ("GOOGLE_CREDENTIALS", "sheets.credentials.json"),
    ("MAKE_BASE", "automation.base_url"),
    ("MAKE_TOKEN", "automation.token"),
    ("SCENARIO_ID", "automation.scenario_id"),
];

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub sheets: SpreadsheetConfig,
    pub automation: AutomationConfig,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to build configuration")]
    Build,
    #[error("Invalid configuration value at '{0}'")]
    InvalidField(String),
    #[error("Invalid contact sheet layout")]
    Layout,
}

impl AppConfig {
    /// Loads the configuration from the process environment.
    pub fn load(config_path: Option<&str>) -> error_stack::Result<Self, ConfigError> {
        Self::load_from(config_path, std::env::vars().collect())
    }

    /// Layers, lowest priority first: built-in defaults, the config file,
    /// `CONTACT_SHEET__<SECTION>__<KEY>` variables, then the legacy flat
    /// variables. An explicit `config_path` (or `CONFIG_PATH`) must exist.
    pub fn load_from(
        config_path: Option<&str>,
        env: HashMap<String, String>,
    ) -> error_stack::Result<Self, ConfigError> {
        let (file_name, required) = match (config_path, env.get("CONFIG_PATH")) {
            (Some(path), _) => (path.to_string(), true),
            (None, Some(path)) => (path.clone(), true),
            (None, None) => (DEFAULT_CONFIG_FILE.to_string(), false),
        };

        let mut builder = Config::builder()
            .set_default("server.bind", "127.0.0.1:3000")
            .and_then(|b| b.set_default("server.log_file", "contact_sheet.log"))
            .and_then(|b| b.set_default("sheets.spreadsheet_id", DEFAULT_SPREADSHEET_ID))
            .and_then(|b| b.set_default("sheets.sheet_title", DEFAULT_SHEET_TITLE))
            .and_then(|b| b.set_default("sheets.first_row", DEFAULT_FIRST_ROW as i64))
            .and_then(|b| b.set_default("sheets.max_row", DEFAULT_MAX_ROW as i64))
            .and_then(|b| b.set_default("automation.base_url", DEFAULT_MAKE_BASE))
            .change_context(ConfigError::Build)?
            .add_source(File::with_name(&file_name).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(Some(env.clone())),
            );

        for (variable, key) in LEGACY_VARIABLES {
            let value = env.get(variable).filter(|value| !value.is_empty()).cloned();
            builder = builder
                .set_override_option(key, value)
                .change_context(ConfigError::Build)?;
        }

        let config = builder
            .build()
            .change_context(ConfigError::Build)
            .attach_printable_lazy(|| format!("Error reading config file '{}'", file_name))?;

        let app_config: AppConfig = serde_path_to_error::deserialize(config).map_err(|error| {
            let path = error.path().to_string();
            report!(ConfigError::InvalidField(path)).attach_printable(error.into_inner().to_string())
        })?;

        app_config
            .sheets
            .layout()
            .change_context(ConfigError::Layout)?;

        Ok(app_config)
    }
}
