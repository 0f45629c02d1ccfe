//! Client for the idk backend.
//!
//! Five JSON-over-POST operations, each one network round trip with no retry.
//! The base URL is fixed at construction and the session token is passed to
//! every authenticated call, so the client holds no mutable state.

mod auth;
mod debug;
mod decode;
mod project;
mod prompt;
pub mod transport;
pub mod types;

pub use transport::{HttpTransport, RawResponse, Transport, build_backend_client};
pub use types::{
    DebugResult, ExecutionContext, PlanCommand, ProjectInitPlan, PromptResult, Reply,
};

use crate::error::ClientError;
use serde::Serialize;
use tracing::debug;

pub const GOOGLE_AUTH_URL_PATH: &str = "/googleAuthUrl";
pub const TOKEN_PATH: &str = "/token";
pub const PROMPT_PATH: &str = "/prompt";
pub const DEBUG_COMMAND_PATH: &str = "/debug/command";
pub const PROJECT_INIT_PATH: &str = "/run/init";

pub struct BackendClient<T = HttpTransport> {
    base_url: String,
    transport: T,
}

impl BackendClient<HttpTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, HttpTransport::new())
    }
}

impl<T: Transport> BackendClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Serialize `body` and send it to `path`.
    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &'static str,
        body: &B,
        session_token: Option<&str>,
    ) -> Result<RawResponse, ClientError> {
        let url = self.endpoint_url(path);
        let payload = serde_json::to_vec(body).map_err(|e| ClientError::Transport {
            url: url.clone(),
            message: format!("failed to serialize request: {e}"),
        })?;

        debug!(
            endpoint = path,
            authenticated = session_token.is_some(),
            bytes = payload.len(),
            "sending backend request"
        );
        let raw = self
            .transport
            .post_json(&url, payload, session_token)
            .await?;
        debug!(
            endpoint = path,
            status = raw.status,
            bytes = raw.body.len(),
            "backend responded"
        );

        Ok(raw)
    }
}
