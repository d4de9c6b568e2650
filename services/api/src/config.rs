//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;
use video_summarizer_core::SummaryPersona;

const DEFAULT_MODELS: &str = "gpt-3.5-turbo,gpt-4";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Optional HTTP/HTTPS proxies for the transcript fetch. Absent means a direct connection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
}

impl ProxySettings {
    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub openai_api_key: String,
    pub openai_base_url: Option<String>,
    pub transcript_proxy: ProxySettings,
    pub transcript_languages: Vec<String>,
    /// Never empty; the first entry is the default model.
    pub allowed_models: Vec<String>,
    pub summary_persona: SummaryPersona,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // blank values count as unset
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // --- Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- LLM Settings ---
        let openai_api_key = var("OPENAI_API_KEY")
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))?;
        let openai_base_url = var("OPENAI_BASE_URL");

        let allowed_models = split_list(&var("ALLOWED_MODELS").unwrap_or_else(|| DEFAULT_MODELS.to_string()));
        if allowed_models.is_empty() {
            return Err(ConfigError::InvalidValue(
                "ALLOWED_MODELS".to_string(),
                "at least one model name is required".to_string(),
            ));
        }

        let summary_persona = match var("SUMMARY_PERSONA") {
            Some(raw) => raw
                .parse::<SummaryPersona>()
                .map_err(|e| ConfigError::InvalidValue("SUMMARY_PERSONA".to_string(), e))?,
            None => SummaryPersona::default(),
        };

        // --- Transcript Settings ---
        let transcript_proxy = ProxySettings {
            http: var("HTTP_PROXY"),
            https: var("HTTPS_PROXY"),
        };

        let mut transcript_languages =
            split_list(&var("TRANSCRIPT_LANGUAGES").unwrap_or_else(|| "en".to_string()));
        if transcript_languages.is_empty() {
            transcript_languages.push("en".to_string());
        }

        Ok(Self {
            bind_address,
            log_level,
            openai_api_key,
            openai_base_url,
            transcript_proxy,
            transcript_languages,
            allowed_models,
            summary_persona,
        })
    }

    pub fn default_model(&self) -> &str {
        &self.allowed_models[0]
    }

    pub fn is_allowed_model(&self, model: &str) -> bool {
        self.allowed_models.iter().any(|m| m == model)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ref v) if v == "OPENAI_API_KEY"));

        let err = load(&[("OPENAI_API_KEY", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(_)));
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config = load(&[("OPENAI_API_KEY", "sk-test")]).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.allowed_models, ["gpt-3.5-turbo", "gpt-4"]);
        assert_eq!(config.default_model(), "gpt-3.5-turbo");
        assert_eq!(config.summary_persona, SummaryPersona::Concise);
        assert_eq!(config.transcript_languages, ["en"]);
        assert!(config.transcript_proxy.is_empty());
        assert!(config.openai_base_url.is_none());
    }

    #[test]
    fn proxies_models_and_persona_are_read() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("HTTP_PROXY", "http://proxy.local:8080"),
            ("HTTPS_PROXY", ""),
            ("ALLOWED_MODELS", " gpt-4 , gpt-4o-mini ,"),
            ("SUMMARY_PERSONA", "structured"),
            ("TRANSCRIPT_LANGUAGES", "en,es"),
        ])
        .unwrap();

        assert_eq!(config.transcript_proxy.http.as_deref(), Some("http://proxy.local:8080"));
        assert_eq!(config.transcript_proxy.https, None);
        assert_eq!(config.allowed_models, ["gpt-4", "gpt-4o-mini"]);
        assert!(config.is_allowed_model("gpt-4o-mini"));
        assert!(!config.is_allowed_model("gpt-3.5-turbo"));
        assert_eq!(config.summary_persona, SummaryPersona::Structured);
        assert_eq!(config.transcript_languages, ["en", "es"]);
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = load(&[("OPENAI_API_KEY", "k"), ("BIND_ADDRESS", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "BIND_ADDRESS"));

        let err = load(&[("OPENAI_API_KEY", "k"), ("SUMMARY_PERSONA", "poetic")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "SUMMARY_PERSONA"));

        let err = load(&[("OPENAI_API_KEY", "k"), ("ALLOWED_MODELS", " , ")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "ALLOWED_MODELS"));
    }
}
