//! Thin wrapper over `reqwest` for artifact and checksum requests.

use log::debug;
use reqwest::{Client, header};
use url::Url;

use crate::error::FetchError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the one or two GETs a fetch performs.
///
/// Failures are never retried here; the caller treats every error as fatal.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client wrapping the given reqwest Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Performs a GET request, failing on any non-success status.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        debug!("GET {}...", url);

        let response = self
            .client
            .get(url.clone())
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| FetchError::download(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::download(
                url,
                format!("server responded with {status}"),
            ));
        }

        Ok(response)
    }

    /// Performs a GET request and returns the response body as text.
    #[tracing::instrument(skip(self))]
    pub async fn get_text(&self, url: &Url) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        response
            .text()
            .await
            .map_err(|e| FetchError::download(url, e))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(Client::new())
    }
}
