use super::{AppConfig, Credentials};
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, ENV_KEY, ENV_URL};
use crate::errors::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Durable store for the backend credentials.
///
/// Values live in a TOML file. When env overrides are enabled, a complete
/// pair of `STAFFBOARD_URL` / `STAFFBOARD_KEY` wins over the file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    env_override: bool,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore {
            path: path.into(),
            env_override: false,
        }
    }

    /// Store located at `<config_dir>/staffboard/config.toml`
    pub fn default_location() -> Result<Self> {
        let dir = dirs::config_dir().ok_or(Error::NoConfigDir)?;
        Ok(Self::new(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    pub fn with_env_override(mut self, enabled: bool) -> Self {
        self.env_override = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole configuration file; a missing file is an empty config
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            debug!("No config file at {}", self.path.display());
            return Ok(AppConfig::default());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Current credentials, or `None` when either value is absent
    pub fn get(&self) -> Result<Option<Credentials>> {
        if self.env_override {
            if let Some(credentials) = credentials_from_env() {
                debug!("Using credentials from environment");
                return Ok(Some(credentials));
            }
        }
        Ok(self.load()?.credentials())
    }

    /// Persists both credentials, keeping the other settings of the file
    pub fn set(&self, url: &str, key: &str) -> Result<Credentials> {
        let url = url.trim();
        let key = key.trim();
        if url.is_empty() || key.is_empty() {
            return Err(Error::Validation(
                "Please enter both URL and API key".to_string(),
            ));
        }

        let mut config = self.load()?;
        config.supabase_url = Some(url.to_string());
        config.supabase_key = Some(key.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, toml::to_string_pretty(&config)?)?;
        info!("Saved configuration to {}", self.path.display());

        Ok(Credentials {
            url: url.to_string(),
            key: key.to_string(),
        })
    }
}

fn credentials_from_env() -> Option<Credentials> {
    let url = std::env::var(ENV_URL).ok()?;
    let key = std::env::var(ENV_KEY).ok()?;
    AppConfig {
        supabase_url: Some(url),
        supabase_key: Some(key),
        ..AppConfig::default()
    }
    .credentials()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicateCheck;

    #[test]
    fn missing_file_means_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("config.toml"));
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips_trimmed_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested").join("config.toml"));
        store.set("  https://x.example.co ", " anon-key ").unwrap();

        let credentials = store.get().unwrap().unwrap();
        assert_eq!(credentials.url, "https://x.example.co");
        assert_eq!(credentials.key, "anon-key");
    }

    #[test]
    fn blank_values_are_rejected_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let store = ConfigStore::new(&path);

        assert!(matches!(store.set("", "key"), Err(Error::Validation(_))));
        assert!(matches!(store.set("url", "   "), Err(Error::Validation(_))));
        assert!(!path.exists());
    }

    #[test]
    fn set_preserves_workflow_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[workflow]\nduplicate_check = \"fail_closed\"\n").unwrap();

        let store = ConfigStore::new(&path);
        store.set("https://x.example.co", "k").unwrap();

        let config = store.load().unwrap();
        assert_eq!(config.workflow.duplicate_check, DuplicateCheck::FailClosed);
        assert_eq!(config.supabase_key.as_deref(), Some("k"));
    }

    #[test]
    fn half_configured_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "supabase_url = \"https://x.example.co\"\n").unwrap();
        assert_eq!(ConfigStore::new(&path).get().unwrap(), None);
    }
}
