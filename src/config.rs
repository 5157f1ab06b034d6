use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub gemini_api_key: SecretString,
    pub gemini_model: String,
    pub catalog_path: String,
    /// Courtesy delay before each page fetch, in milliseconds.
    pub scrape_delay_ms: u64,
    /// Per-request timeout for page fetches, in seconds.
    pub scrape_timeout_secs: u64,
    /// Upper bound on extracted page text handed to the model.
    pub page_text_limit: usize,
    /// When set, country filtering compares the country segment of
    /// "City, Country" exactly instead of substring containment.
    pub strict_country_match: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            gemini_api_key: SecretString::from(
                env::var("GEMINI_API_KEY").unwrap_or_else(|_| "".to_string()),
            ),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
            catalog_path: env::var("CATALOG_PATH")
                .unwrap_or_else(|_| "data/universities.json".to_string()),
            scrape_delay_ms: env::var("SCRAPE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            scrape_timeout_secs: env::var("SCRAPE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            page_text_limit: env::var("PAGE_TEXT_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            strict_country_match: env::var("STRICT_COUNTRY_MATCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Warn loudly when the model key is missing; the server still starts,
    /// searches just degrade to catalog-only results.
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.gemini_api_key.expose_secret().is_empty() {
            log::warn!(
                "GEMINI_API_KEY is not set; candidate generation and page extraction will return no results"
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 5000,
            gemini_api_key: SecretString::from("test_api_key".to_string()),
            gemini_model: "gemini-pro".to_string(),
            catalog_path: "data/universities.json".to_string(),
            scrape_delay_ms: 0,
            scrape_timeout_secs: 1,
            page_text_limit: 8000,
            strict_country_match: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.web_server_host.is_empty());
        assert!(!config.gemini_model.is_empty());
        assert!(config.page_text_limit > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.catalog_path, "data/universities.json");
        assert_eq!(config.scrape_delay_ms, 0);
        assert!(!config.strict_country_match);
    }
}
