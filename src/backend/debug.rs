use super::decode::decode_body;
use super::{BackendClient, DEBUG_COMMAND_PATH, DebugResult, Reply, Transport};
use crate::error::ClientError;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct DebugCommandRequest<'a> {
    command: &'a str,
    os: &'a str,
    error: String,
}

impl<T: Transport> BackendClient<T> {
    /// Ask for remediation of a command that failed locally.
    pub async fn process_debug_command(
        &self,
        command: &str,
        os: &str,
        cause: &(dyn std::error::Error + Send + Sync),
        session_token: &str,
    ) -> Result<Reply<DebugResult>, ClientError> {
        let request = DebugCommandRequest {
            command,
            os,
            error: cause.to_string(),
        };
        let raw = self
            .post(DEBUG_COMMAND_PATH, &request, Some(session_token))
            .await?;
        decode_body(DEBUG_COMMAND_PATH, &raw)
    }
}
