//! The model-call collaborator seam.

use async_trait::async_trait;
use echo_core::config::ModelConfig;
use echo_core::prompt::{ComposedPrompt, PriorTurn};
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Outbound chat turn: the composed prompt plus the last-N prior turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnRequest {
    pub prompt: String,
    pub prior_turns: Vec<PriorTurn>,
    #[serde(skip)]
    pub generation: ModelConfig,
}

impl ChatTurnRequest {
    pub fn new(composed: ComposedPrompt, generation: ModelConfig) -> Self {
        Self {
            prompt: composed.prompt,
            prior_turns: composed.prior_turns,
            generation,
        }
    }
}

/// Free-text reply from the model, with optional analysis fields.
///
/// `summary` and `insights` feed the conversation summary trigger; providers
/// that do not produce them leave both empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_mood: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub insights: Vec<String>,
}

impl ModelReply {
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Default::default()
        }
    }

    pub fn has_insights(&self) -> bool {
        !self.insights.is_empty()
    }
}

/// A provider able to answer one chat turn.
#[async_trait]
pub trait CompanionAgent: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    async fn reply(&self, request: ChatTurnRequest) -> Result<ModelReply, AgentError>;
}
