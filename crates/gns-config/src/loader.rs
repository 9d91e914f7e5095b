use std::path::{Path, PathBuf};

use gns_common::{Error, Result};
use tracing::{debug, info};

use crate::model::GnsConfig;

pub const ENV_API_URL: &str = "GNS_API_URL";
pub const ENV_API_TOKEN: &str = "GNS_API_TOKEN";
pub const ENV_TASK_ID: &str = "GNS_TASK_ID";
pub const ENV_TIMEOUT_SECS: &str = "GNS_TIMEOUT_SECS";
pub const ENV_CONFIG_DIR: &str = "GNS_CONFIG_DIR";

pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
        }
    }

    pub fn default_config_dir() -> PathBuf {
        if let Some(dir) = non_empty_var(ENV_CONFIG_DIR) {
            return PathBuf::from(dir);
        }

        let home_config = dirs::home_dir().map(|h| h.join(".gns"));
        let xdg_config = dirs::config_dir().map(|c| c.join("gns"));

        match (xdg_config, home_config) {
            (Some(xdg), Some(home)) => {
                if !xdg.exists() && home.exists() {
                    home
                } else {
                    xdg
                }
            }
            (Some(xdg), None) => xdg,
            (None, Some(home)) => home,
            (None, None) => PathBuf::from(".gns"),
        }
    }

    pub fn with_dir(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Read `config.yml` (preferred) or `config.toml` from the config dir.
    /// Missing files are not an error.
    pub fn load(&self) -> Result<GnsConfig> {
        let yaml_path = self.config_dir.join("config.yml");
        let toml_path = self.config_dir.join("config.toml");

        if yaml_path.exists() {
            info!("loading config from {}", yaml_path.display());
            let contents = std::fs::read_to_string(&yaml_path)?;
            let config: GnsConfig = serde_yaml::from_str(&contents)
                .map_err(|e| Error::Config(format!("failed to parse YAML config: {e}")))?;
            check_timeout(config.timeout_secs, "timeout_secs")?;
            Ok(config)
        } else if toml_path.exists() {
            info!("loading config from {}", toml_path.display());
            let contents = std::fs::read_to_string(&toml_path)?;
            let config: GnsConfig = toml::from_str(&contents)
                .map_err(|e| Error::Config(format!("failed to parse TOML config: {e}")))?;
            check_timeout(config.timeout_secs, "timeout_secs")?;
            Ok(config)
        } else {
            debug!("no config file in {}, using defaults", self.config_dir.display());
            Ok(GnsConfig::default())
        }
    }

    /// File config overlaid with `GNS_*` environment variables.
    pub fn load_with_env(&self) -> Result<GnsConfig> {
        let mut config = self.load()?;
        apply_vars(&mut config, non_empty_var)?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay values from `lookup` onto `config`. Unset keys leave the existing
/// value in place.
pub fn apply_vars<F>(config: &mut GnsConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL) {
        config.api_url = url;
    }
    if let Some(token) = lookup(ENV_API_TOKEN) {
        config.api_token = Some(token);
    }
    if let Some(task_id) = lookup(ENV_TASK_ID) {
        config.task_id = Some(task_id);
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        let secs = raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("invalid {ENV_TIMEOUT_SECS} '{raw}': {e}")))?;
        check_timeout(secs, ENV_TIMEOUT_SECS)?;
        config.timeout_secs = secs;
    }
    Ok(())
}

// A zero timeout makes every request fail before it is sent.
fn check_timeout(secs: u64, source: &str) -> Result<()> {
    if secs == 0 {
        return Err(Error::Config(format!("{source} must be at least 1 second")));
    }
    Ok(())
}

// An empty variable counts as unset.
fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
