use crate::ui::Language;

/// Environment variable naming an explicitly configured public API origin.
pub const ENV_API_URL: &str = "COMMITCAST_API_URL";
/// Fallback environment variable naming the backend origin.
pub const ENV_BACKEND_URL: &str = "COMMITCAST_BACKEND_URL";
/// Environment variable selecting the default post language.
pub const ENV_LANG: &str = "COMMITCAST_LANG";

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Runtime configuration, resolved once at startup and never re-evaluated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base origin of the backend API, without a trailing slash.
    pub api_base_url: String,
    /// Default language for generated posts.
    pub language: Language,
}

impl Config {
    /// Resolve configuration from CLI overrides and the process environment.
    ///
    /// Origin precedence: explicit override (`--api-url`), else
    /// `COMMITCAST_API_URL`, else `COMMITCAST_BACKEND_URL`, else the
    /// localhost default.
    pub fn resolve(api_url_override: Option<String>, language_override: Option<Language>) -> Self {
        let api_base_url = api_url_override
            .or_else(|| env_non_empty(ENV_API_URL))
            .or_else(|| env_non_empty(ENV_BACKEND_URL))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let language = language_override
            .or_else(|| env_non_empty(ENV_LANG).and_then(|v| v.parse().ok()))
            .unwrap_or_default();

        Self {
            api_base_url: normalize_origin(&api_base_url),
            language,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            language: Language::default(),
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// Strip trailing slashes so path joining stays predictable.
fn normalize_origin(origin: &str) -> String {
    origin.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_origin() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.language, Language::Ja);
    }

    #[test]
    fn test_override_wins() {
        let config = Config::resolve(
            Some("https://api.example.com/".to_string()),
            Some(Language::En),
        );
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.language, Language::En);
    }

    #[test]
    fn test_normalize_origin() {
        assert_eq!(normalize_origin("http://x:8000///"), "http://x:8000");
        assert_eq!(normalize_origin("http://x:8000"), "http://x:8000");
    }
}
