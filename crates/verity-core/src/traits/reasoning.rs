use crate::errors::VerityResult;
use crate::models::ReasoningRequest;

/// A language-model completion service.
pub trait IReasoningBackend: Send + Sync {
    /// Send one request and return the raw completion text.
    ///
    /// Implementations bound the wait with a timeout and report it as
    /// `InterpretationError::Timeout`.
    fn complete(&self, request: &ReasoningRequest) -> VerityResult<String>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
