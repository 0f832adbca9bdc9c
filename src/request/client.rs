//! Compositing-service client.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::{
    foundation::error::{DrapeError, DrapeResult},
    request::form::MockupRequest,
    request::response::{interpret_response, with_trailing_slash},
};

/// Backend that turns a [`MockupRequest`] into a result path.
///
/// Returns the service-relative result path on success, [`DrapeError::Service`] when the
/// service reports an error, and [`DrapeError::Transport`] on network or parse failures.
pub trait MockupService {
    /// Issue one request. Blocks until the service answers.
    fn submit(&self, request: &MockupRequest) -> DrapeResult<String>;

    /// Base that result paths are resolved against.
    fn api_base(&self) -> &Url;
}

/// HTTP implementation of [`MockupService`].
#[derive(Clone, Debug)]
pub struct HttpMockupService {
    client: Client,
    api_base: Url,
    endpoint: String,
}

impl HttpMockupService {
    /// Client posting to `{api_base}/{endpoint}`. `timeout: None` waits indefinitely.
    pub fn new(api_base: Url, endpoint: &str, timeout: Option<Duration>) -> DrapeResult<Self> {
        let user_agent = format!("drape/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| DrapeError::transport(format!("create HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_base: with_trailing_slash(&api_base),
            endpoint: endpoint.trim_matches('/').to_string(),
        })
    }

    /// Full URL of the mockup endpoint.
    pub fn endpoint_url(&self) -> DrapeResult<Url> {
        self.api_base
            .join(&self.endpoint)
            .map_err(|e| DrapeError::validation(format!("bad endpoint '{}': {e}", self.endpoint)))
    }

    /// Probe `{api_base}/health`; true when the service answers `{"ok": true}`.
    #[tracing::instrument(skip(self), fields(base = %self.api_base))]
    pub fn health(&self) -> DrapeResult<bool> {
        #[derive(serde::Deserialize)]
        struct Health {
            #[serde(default)]
            ok: bool,
        }

        let url = self
            .api_base
            .join("health")
            .map_err(|e| DrapeError::validation(e.to_string()))?;
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DrapeError::transport(format!("health probe: {e}")))?;
        let health: Health = resp
            .json()
            .map_err(|e| DrapeError::transport(format!("parse health response: {e}")))?;
        Ok(health.ok)
    }

    /// Download a resolved result image.
    #[tracing::instrument(skip(self), fields(url = %url))]
    pub fn fetch_result(&self, url: &Url) -> DrapeResult<Vec<u8>> {
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| DrapeError::transport(format!("fetch result: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DrapeError::transport(format!(
                "fetch result failed with status {status}"
            )));
        }
        let bytes = resp
            .bytes()
            .map_err(|e| DrapeError::transport(format!("read result body: {e}")))?;
        Ok(bytes.to_vec())
    }
}

impl MockupService for HttpMockupService {
    #[tracing::instrument(skip(self, request), fields(points = %request.quad()))]
    fn submit(&self, request: &MockupRequest) -> DrapeResult<String> {
        let url = self.endpoint_url()?;
        let form = request.to_multipart()?;
        let resp = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .map_err(|e| DrapeError::transport(format!("send mockup request: {e}")))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| DrapeError::transport(format!("read mockup response: {e}")))?;
        tracing::debug!(status, len = body.len(), "mockup response received");
        interpret_response(status, &body)
    }

    fn api_base(&self) -> &Url {
        &self.api_base
    }
}
