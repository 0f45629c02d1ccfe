use super::decode::{decode_body, require_non_empty};
use super::{BackendClient, GOOGLE_AUTH_URL_PATH, Reply, TOKEN_PATH, Transport};
use crate::error::ClientError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct AuthUrlRequest<'a> {
    state: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUrlResponse {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TokenRequest<'a> {
    google_auth_code: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    #[serde(default)]
    jwt_token: Option<String>,
}

impl<T: Transport> BackendClient<T> {
    /// Ask the backend for a Google consent URL bound to `state`.
    pub async fn get_authorization_url(&self, state: &str) -> Result<Reply<String>, ClientError> {
        let raw = self
            .post(GOOGLE_AUTH_URL_PATH, &AuthUrlRequest { state }, None)
            .await?;
        let reply = decode_body::<AuthUrlResponse>(GOOGLE_AUTH_URL_PATH, &raw)?;
        let url = require_non_empty(GOOGLE_AUTH_URL_PATH, reply.status, "url", reply.value.url)?;

        Ok(Reply {
            status: reply.status,
            value: url,
        })
    }

    /// Trade a one-time Google authorization code for a session token.
    pub async fn exchange_code_for_token(
        &self,
        google_auth_code: &str,
    ) -> Result<Reply<String>, ClientError> {
        let raw = self
            .post(TOKEN_PATH, &TokenRequest { google_auth_code }, None)
            .await?;
        let reply = decode_body::<TokenResponse>(TOKEN_PATH, &raw)?;
        let token = require_non_empty(TOKEN_PATH, reply.status, "jwtToken", reply.value.jwt_token)?;

        Ok(Reply {
            status: reply.status,
            value: token,
        })
    }
}
