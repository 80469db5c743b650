use regex::Regex;
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HEADER_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TLS_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_REDIRECTS: usize = 10;
const DEFAULT_TLS_PORT: u16 = 443;

const DEFAULT_ALLOWED_ORIGINS: [&str; 3] = [
    "http://localhost:3000",
    "https://breachless.app",
    "https://www.breachless.app",
];
const DEFAULT_ALLOWED_ORIGIN_REGEX: &str = r"https://.*\.vercel\.app";

pub struct Config {
    pub port: u16,
    pub scan: ScanSettings,
    pub cors: CorsSettings,
}

/// Limits and targets handed to every inspection.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    /// Ceiling for the whole header fetch, redirects included.
    pub header_timeout: Duration,
    /// Ceiling for the TCP connect, and again for the TLS handshake.
    pub tls_timeout: Duration,
    pub max_redirects: usize,
    pub tls_port: u16,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            header_timeout: Duration::from_secs(DEFAULT_HEADER_TIMEOUT_SECS),
            tls_timeout: Duration::from_secs(DEFAULT_TLS_TIMEOUT_SECS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            tls_port: DEFAULT_TLS_PORT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    /// Must match the whole origin, not a substring of it.
    pub allowed_origin_regex: Option<Regex>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            allowed_origin_regex: anchored(DEFAULT_ALLOWED_ORIGIN_REGEX).ok(),
        }
    }
}

impl CorsSettings {
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|o| o == origin)
            || self
                .allowed_origin_regex
                .as_ref()
                .is_some_and(|re| re.is_match(origin))
    }
}

fn anchored(pattern: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", pattern))
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = ScanSettings::default();
        let scan = ScanSettings {
            header_timeout: env_parsed("HEADER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.header_timeout),
            tls_timeout: env_parsed("TLS_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.tls_timeout),
            max_redirects: env_parsed("MAX_REDIRECTS").unwrap_or(defaults.max_redirects),
            tls_port: defaults.tls_port,
        };

        let mut cors = CorsSettings::default();
        if let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") {
            cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(pattern) = env::var("CORS_ALLOWED_ORIGIN_REGEX") {
            match anchored(&pattern) {
                Ok(re) => cors.allowed_origin_regex = Some(re),
                Err(e) => tracing::warn!(
                    pattern = %pattern,
                    error = %e,
                    "Ignoring invalid CORS_ALLOWED_ORIGIN_REGEX, keeping default"
                ),
            }
        }

        Self {
            port: env_parsed("PORT").unwrap_or(DEFAULT_PORT),
            scan,
            cors,
        }
    }
}
