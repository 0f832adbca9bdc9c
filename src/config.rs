//! Stage and service configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use url::Url;

use crate::{
    foundation::error::{DrapeError, DrapeResult},
    placement::PlacementMode,
    request::client::HttpMockupService,
    request::options::RenderOptions,
    viewport::scaler::ViewportPolicy,
};

/// Default compositing-service base.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/api/";
/// Default mockup endpoint below the base.
pub const DEFAULT_ENDPOINT: &str = "mockup";
/// Viewport width assumed before the first resize event.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 932;
/// Overrides `api_base`.
pub const ENV_API_BASE: &str = "DRAPE_API_BASE";
/// Overrides `request_timeout_secs`; `0` or empty disables the timeout.
pub const ENV_TIMEOUT_SECS: &str = "DRAPE_TIMEOUT_SECS";

/// Stage configuration, loadable from JSON. Every field has a default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Service base URL; result paths resolve below it.
    pub api_base: String,
    /// Mockup endpoint relative to `api_base`.
    pub endpoint: String,
    /// Display sizing policy.
    pub viewport: ViewportPolicy,
    /// Viewport width used until the first resize.
    pub viewport_width: u32,
    /// Placement variant.
    pub mode: PlacementMode,
    /// Initial render options.
    pub options: RenderOptions,
    /// Request timeout; `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            viewport: ViewportPolicy::default(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            mode: PlacementMode::default(),
            options: RenderOptions::default(),
            request_timeout_secs: None,
        }
    }
}

impl StageConfig {
    /// Parse a JSON document.
    pub fn from_json_str(s: &str) -> DrapeResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| DrapeError::validation(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON file.
    pub fn from_path(path: &Path) -> DrapeResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Apply [`ENV_API_BASE`] and [`ENV_TIMEOUT_SECS`] from the process environment.
    pub fn with_env_overrides(self) -> DrapeResult<Self> {
        self.with_overrides_from(|k| std::env::var(k).ok())
    }

    /// Apply overrides from an arbitrary lookup.
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> DrapeResult<Self> {
        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let raw = raw.trim();
            self.request_timeout_secs = match raw {
                "" | "0" => None,
                v => Some(v.parse().map_err(|_| {
                    DrapeError::validation(format!(
                        "{ENV_TIMEOUT_SECS} must be an integer, got '{v}'"
                    ))
                })?),
            };
        }
        self.validate()?;
        Ok(self)
    }

    /// Reject configurations the stage cannot run with.
    pub fn validate(&self) -> DrapeResult<()> {
        let url = self.api_base_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DrapeError::validation(format!(
                "api_base must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.endpoint.trim_matches('/').is_empty() {
            return Err(DrapeError::validation("endpoint must not be empty"));
        }
        if self.viewport.max_width == 0 {
            return Err(DrapeError::validation("viewport.max_width must be > 0"));
        }
        Ok(())
    }

    /// Parsed `api_base`.
    pub fn api_base_url(&self) -> DrapeResult<Url> {
        Url::parse(&self.api_base).map_err(|e| {
            DrapeError::validation(format!("invalid api_base '{}': {e}", self.api_base))
        })
    }

    /// Request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// HTTP client for this configuration.
    pub fn service(&self) -> DrapeResult<HttpMockupService> {
        HttpMockupService::new(self.api_base_url()?, &self.endpoint, self.timeout())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
