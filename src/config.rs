// src/config.rs
use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PANE_HEIGHT: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the chat service, without the `/chat` or `/upload/` path.
    pub api_url: String,
    /// Number of transcript lines kept on screen.
    pub pane_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            pane_height: DEFAULT_PANE_HEIGHT,
        }
    }
}

impl Config {
    /// Load from the process environment, after `.env` if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup("CHATBOT_API_URL") {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Invalid { key: "CHATBOT_API_URL", value: url.to_string() });
            }
            config.api_url = url.trim_end_matches('/').to_string();
        }

        if let Some(height) = lookup("CHATBOT_PANE_HEIGHT") {
            config.pane_height = match height.trim().parse::<usize>() {
                Ok(h) if h > 0 => h,
                _ => return Err(ConfigError::Invalid { key: "CHATBOT_PANE_HEIGHT", value: height }),
            };
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(Config::from_lookup(lookup(&[])).unwrap(), Config::default());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("CHATBOT_API_URL", "https://chat.example.com/"),
            ("CHATBOT_PANE_HEIGHT", "8"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://chat.example.com");
        assert_eq!(config.pane_height, 8);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            Config::from_lookup(lookup(&[("CHATBOT_API_URL", "localhost:8000")])),
            Err(ConfigError::Invalid { key: "CHATBOT_API_URL", value: "localhost:8000".into() })
        );
        assert!(Config::from_lookup(lookup(&[("CHATBOT_PANE_HEIGHT", "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[("CHATBOT_PANE_HEIGHT", "tall")])).is_err());
    }
}
