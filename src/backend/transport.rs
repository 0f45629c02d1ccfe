use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

/// Status and body of a completed HTTP exchange, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// A single JSON POST to the backend.
///
/// Implementations return `Ok` whenever a response with a readable body came
/// back, whatever its status. Status interpretation belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
        authorization: Option<&str>,
    ) -> Result<RawResponse, ClientError>;
}

/// Build the HTTP client used for backend calls.
///
/// No request or connect timeout is set, and idle connections are not kept:
/// every operation is one independent round trip.
pub fn build_backend_client() -> Client {
    Client::builder()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: build_backend_client(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn transport_error(url: &str, err: &reqwest::Error) -> ClientError {
    ClientError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: Vec<u8>,
        authorization: Option<&str>,
    ) -> Result<RawResponse, ClientError> {
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);

        // The backend expects the raw token, without a `Bearer` scheme.
        if let Some(token) = authorization {
            request = request.header(AUTHORIZATION, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(url, &e))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(url, &e))?;

        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}
