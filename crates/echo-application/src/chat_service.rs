//! Chat endpoint surface.
//!
//! One stateless turn: validate → safety gate → sanitize → throttle →
//! credential → compose → model call. Crisis turns short-circuit before the
//! throttle and never reach the model.

use echo_core::EchoError;
use echo_core::clock::Clock;
use echo_core::config::CompanionConfig;
use echo_core::conversation::{Message, Sender};
use echo_core::error::Result;
use echo_core::persona::{PersonalityCatalog, TraitVector};
use echo_core::prompt::{PriorTurn, PromptComposer};
use echo_core::safety::{CRISIS_TAGS, SafetyGate};
use echo_core::throttle::RequestThrottle;
use echo_core::validation::{sanitize_message, validate_message};
use echo_interaction::{AgentError, ChatTurnRequest, CompanionAgent};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::fallback::{FALLBACK_TAGS, pick_fallback};

/// Mood reported for ordinary replies when the model does not detect one.
const NEUTRAL_MOOD: u8 = 3;
const CRISIS_MOOD: u8 = 1;

/// Incoming chat turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<PriorTurn>,
    /// Active profile; the default profile when absent.
    #[serde(default)]
    pub personality_id: Option<String>,
    /// Session trait overrides; the profile's base traits when absent.
    #[serde(default)]
    pub traits: Option<TraitVector>,
    /// Caller identity for the throttle.
    #[serde(default)]
    pub token: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            token: token.into(),
            ..Default::default()
        }
    }
}

/// Outgoing chat reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub detected_mood: u8,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub requires_follow_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<String>,
}

impl ChatReply {
    pub fn crisis(response: String) -> Self {
        Self {
            response,
            detected_mood: CRISIS_MOOD,
            tags: CRISIS_TAGS.iter().map(|t| t.to_string()).collect(),
            requires_follow_up: true,
            summary: None,
            insights: Vec::new(),
        }
    }

    pub fn fallback() -> Self {
        Self {
            response: pick_fallback().to_string(),
            detected_mood: NEUTRAL_MOOD,
            tags: FALLBACK_TAGS.iter().map(|t| t.to_string()).collect(),
            requires_follow_up: false,
            summary: None,
            insights: Vec::new(),
        }
    }

    pub fn is_crisis(&self) -> bool {
        self.requires_follow_up
    }
}

pub struct ChatService {
    catalog: Arc<PersonalityCatalog>,
    gate: SafetyGate,
    throttle: RequestThrottle,
    composer: PromptComposer,
    agent: Option<Arc<dyn CompanionAgent>>,
    config: CompanionConfig,
    clock: Arc<dyn Clock>,
}

impl ChatService {
    /// `agent` is `None` when no upstream credential is configured; every
    /// non-crisis turn then fails with a configuration error.
    pub fn new(
        catalog: Arc<PersonalityCatalog>,
        agent: Option<Arc<dyn CompanionAgent>>,
        config: CompanionConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            gate: SafetyGate::new(),
            throttle: RequestThrottle::from_config(&config.throttle, clock.clone()),
            composer: PromptComposer::new(config.history_window),
            agent,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PersonalityCatalog {
        &self.catalog
    }

    pub async fn handle(&self, request: ChatRequest) -> Result<ChatReply> {
        validate_message(&request.message, self.config.max_message_chars)?;

        let verdict = self.gate.evaluate(&request.message);
        if let Some(resource_response) = verdict.resource_response {
            return Ok(ChatReply::crisis(resource_response));
        }

        let text = sanitize_message(&request.message);

        let limit = self.config.throttle.limit;
        let decision = self.throttle.check(limit, &request.token);
        if !decision.success {
            tracing::warn!("[ChatService] Request throttled (limit {})", limit);
            return Err(EchoError::RateLimited {
                token: request.token,
                limit,
            });
        }

        let Some(agent) = self.agent.as_ref() else {
            tracing::error!("[ChatService] No model credential configured");
            return Err(EchoError::configuration("model credential is not configured"));
        };

        let profile = match request.personality_id.as_deref() {
            Some(id) => self.catalog.select(id)?,
            None => self.catalog.default_profile()?,
        };
        let traits = request.traits.unwrap_or(profile.traits);
        let history = self.history_messages(&request.conversation_history, &profile.id);
        let composed = self.composer.compose(profile, &traits, &history, &text);

        let turn = ChatTurnRequest::new(composed, self.config.model.clone());
        match agent.reply(turn).await {
            Ok(reply) => {
                tracing::debug!(
                    "[ChatService] {} replied ({} chars)",
                    agent.name(),
                    reply.response.len()
                );
                Ok(ChatReply {
                    response: reply.response,
                    detected_mood: reply.detected_mood.unwrap_or(NEUTRAL_MOOD),
                    tags: reply.tags,
                    requires_follow_up: false,
                    summary: reply.summary,
                    insights: reply.insights,
                })
            }
            Err(AgentError::EmptyResponse) => {
                tracing::warn!("[ChatService] {} returned no text, using fallback", agent.name());
                Ok(ChatReply::fallback())
            }
            Err(e) => {
                tracing::error!("[ChatService] {} call failed: {}", agent.name(), e);
                Err(e.into())
            }
        }
    }

    fn history_messages(&self, turns: &[PriorTurn], personality_id: &str) -> Vec<Message> {
        let now = self.clock.now();
        turns
            .iter()
            .map(|turn| match turn.sender {
                Sender::User => Message::user(turn.text.clone(), now),
                Sender::Companion => Message::companion(turn.text.clone(), personality_id, now),
            })
            .collect()
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("has_agent", &self.agent.is_some())
            .field("config", &self.config)
            .finish()
    }
}
