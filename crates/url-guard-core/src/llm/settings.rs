use std::collections::HashMap;

use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the chat-completion gateway.
///
/// The API key is optional here; the client checks it on every call so a
/// missing credential surfaces as a per-request configuration error.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewaySettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Optional overrides read from a config file `[gateway]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewayOverrides {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl GatewaySettings {
    pub const API_KEY_ENV: &'static str = "URL_GUARD_API_KEY";
    const ENDPOINT_ENV: &'static str = "URL_GUARD_ENDPOINT";
    const MODEL_ENV: &'static str = "URL_GUARD_MODEL";
    const TEMPERATURE_ENV: &'static str = "URL_GUARD_TEMPERATURE";
    const TIMEOUT_ENV: &'static str = "URL_GUARD_TIMEOUT_SECS";

    /// Defaults overlaid with environment variables.
    ///
    /// * `URL_GUARD_API_KEY`  — bearer credential (checked per request).
    /// * `URL_GUARD_ENDPOINT` — gateway base URL.
    /// * `URL_GUARD_MODEL`    — model identifier.
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    pub fn with_env(self) -> Self {
        self.with_vars(&std::env::vars().collect())
    }

    pub fn with_overrides(mut self, overrides: &GatewayOverrides) -> Self {
        if let Some(endpoint) = non_blank(overrides.endpoint.as_ref()) {
            self.endpoint = endpoint;
        }
        if let Some(model) = non_blank(overrides.model.as_ref()) {
            self.model = model;
        }
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
        self
    }

    fn with_vars(mut self, vars: &HashMap<String, String>) -> Self {
        if let Some(key) = non_blank(vars.get(Self::API_KEY_ENV)) {
            self.api_key = Some(key);
        }
        if let Some(endpoint) = non_blank(vars.get(Self::ENDPOINT_ENV)) {
            self.endpoint = endpoint;
        }
        if let Some(model) = non_blank(vars.get(Self::MODEL_ENV)) {
            self.model = model;
        }
        if let Some(temperature) = vars
            .get(Self::TEMPERATURE_ENV)
            .and_then(|v| v.trim().parse::<f32>().ok())
        {
            self.temperature = temperature;
        }
        if let Some(timeout) = vars
            .get(Self::TIMEOUT_ENV)
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            self.timeout_secs = timeout;
        }
        self
    }

    /// Full chat-completions URL derived from the endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint.trim_end_matches('/'))
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_without_environment() {
        let settings = GatewaySettings::default().with_vars(&HashMap::new());
        assert!(settings.api_key.is_none());
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.timeout_secs, 60);
        assert!((settings.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = GatewaySettings::default().with_vars(&vars(&[
            ("URL_GUARD_API_KEY", "secret"),
            ("URL_GUARD_ENDPOINT", "http://localhost:9000/"),
            ("URL_GUARD_MODEL", "test-model"),
            ("URL_GUARD_TIMEOUT_SECS", " 5 "),
            ("URL_GUARD_TEMPERATURE", "0.2"),
        ]));
        assert_eq!(settings.api_key.as_deref(), Some("secret"));
        assert_eq!(settings.model, "test-model");
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(
            settings.completions_url(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn blank_key_and_bad_numbers_are_ignored() {
        let settings = GatewaySettings::default().with_vars(&vars(&[
            ("URL_GUARD_API_KEY", "   "),
            ("URL_GUARD_TIMEOUT_SECS", "soon"),
        ]));
        assert!(settings.api_key.is_none());
        assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn environment_wins_over_file_overrides() {
        let overrides = GatewayOverrides {
            model: Some("file-model".into()),
            timeout_secs: Some(10),
            ..Default::default()
        };
        let settings = GatewaySettings::default()
            .with_overrides(&overrides)
            .with_vars(&vars(&[("URL_GUARD_MODEL", "env-model")]));
        assert_eq!(settings.model, "env-model");
        assert_eq!(settings.timeout_secs, 10);
    }
}
