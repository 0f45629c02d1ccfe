use super::decode::decode_body;
use super::{BackendClient, ExecutionContext, PROMPT_PATH, PromptResult, Reply, Transport};
use crate::error::ClientError;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PromptRequest<'a> {
    prompt: &'a str,
    os: &'a str,
    existing_script: &'a str,
    readme_data: &'a str,
    pwd: &'a str,
}

impl<'a> From<&'a ExecutionContext> for PromptRequest<'a> {
    fn from(ctx: &'a ExecutionContext) -> Self {
        Self {
            prompt: &ctx.prompt,
            os: &ctx.os,
            existing_script: ctx.existing_script.as_deref().unwrap_or_default(),
            readme_data: ctx.readme_data.as_deref().unwrap_or_default(),
            pwd: &ctx.pwd,
        }
    }
}

impl<T: Transport> BackendClient<T> {
    /// Send a natural-language prompt with its local context.
    pub async fn process_prompt(
        &self,
        ctx: &ExecutionContext,
        session_token: &str,
    ) -> Result<Reply<PromptResult>, ClientError> {
        let raw = self
            .post(PROMPT_PATH, &PromptRequest::from(ctx), Some(session_token))
            .await?;
        decode_body(PROMPT_PATH, &raw)
    }
}
