use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `idk`.
///
/// The backend client and the config layer each define their own error type.
/// Library callers can match on these to decide what to tell the user;
/// handler code continues to use `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum IdkError {
    // ── Backend protocol ────────────────────────────────────────────────
    #[error("backend: {0}")]
    Client(#[from] ClientError),

    // ── Config ──────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Backend client errors ───────────────────────────────────────────────────

/// Failure of a single backend round trip.
///
/// The four kinds are kept apart because the caller reacts differently to
/// each: a dead connection, a refusal by the backend, a payload that is not
/// the expected shape, and a payload that is well-formed but lacks a value.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a readable response.
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The backend answered with something other than 200.
    #[error("{endpoint} returned status {status}")]
    RemoteStatus { endpoint: &'static str, status: u16 },

    /// The 200 body is not valid JSON for the expected shape.
    #[error("{endpoint} returned a malformed body: {source}")]
    Decode {
        endpoint: &'static str,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// A required value is absent, null or empty.
    #[error("{endpoint} response is missing `{field}`")]
    MissingField {
        endpoint: &'static str,
        status: u16,
        field: &'static str,
    },
}

impl ClientError {
    /// HTTP status actually observed, `0` when no response arrived.
    pub fn status(&self) -> u16 {
        match self {
            Self::Transport { .. } => 0,
            Self::RemoteStatus { status, .. }
            | Self::Decode { status, .. }
            | Self::MissingField { status, .. } => *status,
        }
    }

    /// True when the backend rejected the session token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::RemoteStatus {
                status: 401 | 403,
                ..
            }
        )
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not find home directory")]
    HomeDir,

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("failed to serialize config: {0}")]
    Serialize(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, IdkError>;
