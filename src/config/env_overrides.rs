use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("IDK_BACKEND_URL")
            && !url.is_empty()
        {
            self.overrides.backend_url = Some(url);
        }

        if let Some(token) = lookup("IDK_SESSION_TOKEN")
            && !token.is_empty()
        {
            self.overrides.session_token = Some(token);
        }

        if let Some(port_str) = lookup("IDK_CALLBACK_PORT")
            && let Ok(port) = port_str.parse::<u16>()
        {
            self.overrides.callback_port = Some(port);
        }
    }
}
