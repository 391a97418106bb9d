use std::path::PathBuf;

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    /// Static files served next to the API, typically the editor UI build.
    pub ui_dir: Option<PathBuf>,
    pub log_file: PathBuf,
}
