use std::env;
use std::fmt;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub gemini: GeminiConfig,
}

#[derive(Clone)]
pub struct GeminiConfig {
    /// Injected credential, never logged
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8000),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(Vec::new),
            gemini: GeminiConfig {
                api_key: var("GEMINI_API_KEY"),
                api_base: var("GEMINI_API_BASE")
                    .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string()),
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8000);
        assert!(config.cors_allowed_origins.is_empty());
        assert_eq!(config.gemini.api_key, None);
        assert_eq!(config.gemini.api_base, DEFAULT_GEMINI_API_BASE);
        assert_eq!(config.gemini.model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9123"),
            ("CORS_ALLOWED_ORIGINS", "http://a.test, http://b.test"),
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_API_BASE", "http://127.0.0.1:1"),
            ("GEMINI_MODEL", "gemini-pro"),
        ]);
        assert_eq!(config.port, 9123);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini.api_base, "http://127.0.0.1:1");
        assert_eq!(config.gemini.model, "gemini-pro");
    }

    #[test]
    fn test_blank_or_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("GEMINI_API_KEY", "  ")]);
        assert_eq!(config.port, 8000);
        assert_eq!(config.gemini.api_key, None);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = config_from(&[("GEMINI_API_KEY", "super-secret")]);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
