//! Errors raised by model-call collaborators.

use echo_core::EchoError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    /// No credential, or an unusable one.
    #[error("Agent configuration error: {0}")]
    Configuration(String),

    /// The provider answered with a non-success status.
    #[error("Agent HTTP error {status}: {message}")]
    Http {
        status: u16,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// The request never produced a response.
    #[error("Agent network error: {0}")]
    Network(String),

    /// The provider answered but carried no text.
    #[error("Agent returned no text")]
    EmptyResponse,

    #[error("Failed to parse agent response: {0}")]
    Parse(String),
}

impl AgentError {
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentError::Http { is_retryable, .. } => *is_retryable,
            AgentError::Network(_) => true,
            _ => false,
        }
    }
}

impl From<AgentError> for EchoError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Configuration(message) => EchoError::Configuration(message),
            AgentError::Http { status, message, .. } => EchoError::upstream(Some(status), message),
            AgentError::Network(message) => EchoError::Network(message),
            AgentError::EmptyResponse => EchoError::upstream(None, "empty model response"),
            AgentError::Parse(message) => EchoError::upstream(None, message),
        }
    }
}
