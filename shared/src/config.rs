//! Runtime configuration
//!
//! The browser has no process environment, so overrides are captured at build
//! time (`SYNERGIA_API_URL=... trunk build`). Anything missing or unparseable
//! falls back to the defaults below.

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIMEOUT_MS: u32 = 10_000;
pub const DEFAULT_LOCATIONS_PER_PAGE: usize = 6;
pub const DEFAULT_TOOLS_PER_PAGE: usize = 10;
pub const DEFAULT_APPLICATIONS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL, without trailing slash.
    pub api_base_url: String,
    /// Per-request timeout applied by the HTTP transport.
    pub request_timeout_ms: u32,
    pub locations_per_page: usize,
    pub tools_per_page: usize,
    pub applications_per_page: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            locations_per_page: DEFAULT_LOCATIONS_PER_PAGE,
            tools_per_page: DEFAULT_TOOLS_PER_PAGE,
            applications_per_page: DEFAULT_APPLICATIONS_PER_PAGE,
        }
    }
}

impl AppConfig {
    /// Reads `SYNERGIA_API_URL` and `SYNERGIA_TIMEOUT_MS` as captured by the compiler.
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("SYNERGIA_API_URL"),
            option_env!("SYNERGIA_TIMEOUT_MS"),
        )
    }

    pub fn from_vars(api_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let defaults = Self::default();

        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let request_timeout_ms = timeout_ms
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.request_timeout_ms);

        Self {
            api_base_url,
            request_timeout_ms,
            ..defaults
        }
    }
}
