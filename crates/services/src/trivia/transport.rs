use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::TransportError;

/// Raw HTTP outcome handed back to the client for interpretation.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// GET-only HTTP seam used by `TriviaClient`.
#[async_trait]
pub trait TriviaTransport: Send + Sync {
    /// Issue a GET to `url` with the given query pairs.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when no response could be obtained.
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<TransportResponse, TransportError>;
}

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns `TransportError::Http` if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TriviaTransport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(&'static str, String)],
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(classify)?;
        let status = response.status();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

/// Unreachable hosts and timeouts become `Connection`; everything else stays `Http`.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_connect() || err.is_timeout() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Http(err)
    }
}
