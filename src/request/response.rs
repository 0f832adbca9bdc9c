use url::Url;

use crate::foundation::error::{DrapeError, DrapeResult};

/// Reason surfaced when the service fails without saying why.
pub const GENERIC_FAILURE: &str = "mockup generation failed";

/// Body returned by the compositing service.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
pub struct MockupResponse {
    /// Result path relative to the service base, on success.
    #[serde(default)]
    pub result_url: Option<String>,
    /// Failure reason.
    #[serde(default)]
    pub error: Option<String>,
}

impl MockupResponse {
    /// Success iff `result_url` is present and non-empty; otherwise the service's reason.
    pub fn into_result(self) -> DrapeResult<String> {
        match self.result_url {
            Some(url) if !url.trim().is_empty() => Ok(url),
            _ => Err(DrapeError::service(
                self.error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
            )),
        }
    }
}

/// Interpret a raw response body. The HTTP status is informational only: a body carrying
/// `result_url` is a success even on a non-2xx status, and a body without it is a failure.
pub fn interpret_response(status: u16, body: &str) -> DrapeResult<String> {
    let parsed: MockupResponse = serde_json::from_str(body).map_err(|e| {
        DrapeError::transport(format!("unparseable response (status {status}): {e}"))
    })?;
    parsed.into_result()
}

/// A displayed mockup result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedMockup {
    /// Path exactly as the service returned it.
    pub result_path: String,
    /// Cache-defeating token appended to `url`.
    pub cache_token: String,
    /// Fully resolved URL to fetch the image from.
    pub url: Url,
}

impl RenderedMockup {
    /// Resolve `result_path` against `api_base` with a fresh cache token.
    pub fn resolve(api_base: &Url, result_path: &str) -> DrapeResult<Self> {
        let cache_token = uuid::Uuid::new_v4().simple().to_string();
        let url = resolve_result_url(api_base, result_path, &cache_token)?;
        Ok(Self {
            result_path: result_path.to_string(),
            cache_token,
            url,
        })
    }
}

/// Resolve a service-relative result path under the service base path (not the host root),
/// then append `t=<cache_token>`. Absolute URLs are kept as-is apart from the token.
pub fn resolve_result_url(
    api_base: &Url,
    result_path: &str,
    cache_token: &str,
) -> DrapeResult<Url> {
    let mut url = match Url::parse(result_path) {
        Ok(abs) => abs,
        Err(_) => with_trailing_slash(api_base)
            .join(result_path.trim_start_matches('/'))
            .map_err(|e| DrapeError::validation(format!("bad result path '{result_path}': {e}")))?,
    };
    url.query_pairs_mut().append_pair("t", cache_token);
    Ok(url)
}

/// `base` with a trailing `/` so relative joins stay below its path.
pub fn with_trailing_slash(base: &Url) -> Url {
    let mut out = base.clone();
    if !out.path().ends_with('/') {
        let path = format!("{}/", out.path());
        out.set_path(&path);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/request/response.rs"]
mod tests;
