/// Reasoning-backend and verdict-parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum InterpretationError {
    #[error("reasoning backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    #[error("reasoning backend timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("reasoning backend rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed backend response: {reason}")]
    MalformedResponse { reason: String },

    #[error("no verdict found in response: {excerpt}")]
    UnparseableVerdict { excerpt: String },

    #[error("no evidence retrieved; refusing to guess a verdict")]
    NoEvidence,
}
