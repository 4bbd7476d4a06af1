use serde::{Deserialize, Serialize};
use sitecraft_editor::plugins::template::TemplateOptions;
use sitecraft_editor::EditorConfig;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "sitecraft.config.json";

/// Sitecraft configuration file format
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Editor event names
    #[serde(default)]
    pub editor: EditorConfig,

    /// Template plugin options
    #[serde(default)]
    pub template: TemplateOptions,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }
}
