//! Environment-driven configuration

use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_millis(2000);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the response generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    /// Gateway base URL (e.g., `http://169.254.169.254/gateway/llm`)
    pub gateway: Option<String>,
    pub model: String,
    /// HTTP client timeout for one generation call
    pub request_timeout: Duration,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            gateway: None,
            model: DEFAULT_MODEL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub generator: GeneratorConfig,
    /// Simulated analysis latency for the triage wizard
    pub analysis_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            generator: GeneratorConfig::default(),
            analysis_delay: DEFAULT_ANALYSIS_DELAY,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unparseable values fall back
    /// to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("HEALTHPAL_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let analysis_delay = lookup("HEALTHPAL_ANALYSIS_DELAY_MS")
            .and_then(|ms| ms.parse().ok())
            .map_or(defaults.analysis_delay, Duration::from_millis);

        let request_timeout = lookup("HEALTHPAL_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map_or(defaults.generator.request_timeout, Duration::from_secs);

        Self {
            port,
            generator: GeneratorConfig {
                api_key: lookup("OPENAI_API_KEY").filter(|k| !k.is_empty()),
                gateway: lookup("LLM_GATEWAY").filter(|g| !g.is_empty()),
                model: lookup("HEALTHPAL_MODEL")
                    .filter(|m| !m.is_empty())
                    .unwrap_or(defaults.generator.model),
                request_timeout,
            },
            analysis_delay,
        }
    }
}
