use super::Config;
use crate::error::ConfigError;
use directories::UserDirs;
use std::fs;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load `~/.idk/config.toml`, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or(ConfigError::HomeDir)?;
        let mut config = Self::load_from(&home.join(".idk").join("config.toml"))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load the file at `path`, writing a default one if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let mut config: Config =
                toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?;
            config.config_path = path.to_path_buf();
            debug!(path = %path.display(), "loaded config");
            Ok(config)
        } else {
            let config = Self {
                config_path: path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            debug!(path = %path.display(), "wrote default config");
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let toml_str =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(self.backend_url()).map_err(|e| {
            ConfigError::Validation(format!("backend_url '{}': {e}", self.backend_url()))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "backend_url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        Ok(())
    }
}
