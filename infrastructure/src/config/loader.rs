//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "streamchat";
const PROJECT_FILES: [&str; 2] = ["streamchat.toml", ".streamchat.toml"];
const ENV_PREFIX: &str = "STREAMCHAT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `STREAMCHAT_*` environment variables (`__` separates sections,
    ///    e.g. `STREAMCHAT_SERVER__BASE_URL`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./streamchat.toml` or `./.streamchat.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/streamchat/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/streamchat/config.toml if set,
    /// otherwise falls back to ~/.config/streamchat/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Default REPL history location
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR).join("history.txt"))
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources(explicit: Option<&Path>) -> String {
        let mut out = String::from("Configuration sources (in priority order):\n");
        out.push_str(&format!("  [ENV  ] {}*\n", ENV_PREFIX));

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            out.push_str(&format!("  [{}] Explicit: {}\n", mark, path.display()));
        }

        match Self::project_config_path() {
            Some(path) => out.push_str(&format!("  [FOUND] Project: {}\n", path.display())),
            None => out.push_str("  [     ] Project: ./streamchat.toml or ./.streamchat.toml\n"),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            out.push_str(&format!("  [{}] Global:  {}\n", mark, path.display()));
        }

        out.push_str("  [     ] Default: built-in defaults\n");
        out
    }
}
