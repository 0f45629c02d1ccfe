use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Session token issued by the backend after login.
    #[serde(default)]
    pub session_token: Option<String>,

    #[serde(default)]
    pub login: LoginConfig,

    /// Saved commands and scripts, keyed by alias.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Values taken from the environment; they win over the file and are
    /// never written back.
    #[serde(skip)]
    pub(crate) overrides: EnvOverrides,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EnvOverrides {
    pub(super) backend_url: Option<String>,
    pub(super) session_token: Option<String>,
    pub(super) callback_port: Option<u16>,
}

pub(super) fn default_backend_url() -> String {
    "http://127.0.0.1:8080".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Port of the one-shot OAuth callback listener; `0` means paste the code.
    #[serde(default = "default_callback_port")]
    pub callback_port: u16,
    #[serde(default = "default_true")]
    pub open_browser: bool,
}

fn default_callback_port() -> u16 {
    8765
}

fn default_true() -> bool {
    true
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            callback_port: default_callback_port(),
            open_browser: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            backend_url: default_backend_url(),
            session_token: None,
            login: LoginConfig::default(),
            aliases: BTreeMap::new(),
            overrides: EnvOverrides::default(),
        }
    }
}

impl Config {
    /// Backend base URL without a trailing slash.
    pub fn backend_url(&self) -> &str {
        self.overrides
            .backend_url
            .as_deref()
            .unwrap_or(&self.backend_url)
            .trim_end_matches('/')
    }

    /// Session token to attach to authenticated calls, if logged in.
    pub fn session_token(&self) -> Option<&str> {
        self.overrides
            .session_token
            .as_deref()
            .or(self.session_token.as_deref())
            .filter(|token| !token.trim().is_empty())
    }

    /// Port for the login callback listener; `0` means paste the code.
    pub fn callback_port(&self) -> u16 {
        self.overrides
            .callback_port
            .unwrap_or(self.login.callback_port)
    }

    pub fn set_session_token(&mut self, token: String) {
        self.session_token = Some(token);
    }

    pub fn clear_session_token(&mut self) {
        self.session_token = None;
        self.overrides.session_token = None;
    }

    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn set_alias(&mut self, name: &str, body: &str) {
        self.aliases.insert(name.to_string(), body.to_string());
    }
}
