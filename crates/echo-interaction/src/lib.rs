//! Model-call collaborators for the EchoWhisper companion.

pub mod agent;
pub mod error;
pub mod gemini_api_agent;

pub use agent::{ChatTurnRequest, CompanionAgent, ModelReply};
pub use error::AgentError;
pub use gemini_api_agent::GeminiApiAgent;
