//! Crisis gate.
//!
//! A literal, case-insensitive substring test against a fixed phrase list.
//! Over-triggering is acceptable; under-triggering is not, so there is no
//! fuzzy matching and no negation handling.

use serde::{Deserialize, Serialize};

/// Phrases that flag a message as a crisis.
pub const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "not worth living",
    "better off dead",
    "hurt myself",
    "self harm",
    "cutting",
    "overdose",
    "jump off",
];

/// Fixed reply returned instead of a model response for flagged turns.
pub const CRISIS_RESPONSE: &str = "I'm really concerned about what you're sharing with me. Your life has value, and there are people who want to help. Please consider reaching out to a crisis helpline: Call 988 (Suicide & Crisis Lifeline) or text HOME to 741741 (Crisis Text Line). If you're in immediate danger, please call 911. Would you like me to help you find local mental health resources?";

/// Tags attached to a crisis reply.
pub const CRISIS_TAGS: &[&str] = &["crisis", "urgent"];

/// Outcome of evaluating one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyVerdict {
    pub flagged: bool,
    /// Present exactly when `flagged` is true. The model call must be skipped.
    pub resource_response: Option<String>,
}

impl SafetyVerdict {
    fn clear() -> Self {
        Self {
            flagged: false,
            resource_response: None,
        }
    }

    fn crisis() -> Self {
        Self {
            flagged: true,
            resource_response: Some(CRISIS_RESPONSE.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SafetyGate {
    phrases: Vec<String>,
}

impl Default for SafetyGate {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyGate {
    pub fn new() -> Self {
        Self {
            phrases: CRISIS_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Scans outgoing user text for crisis indicators.
    pub fn evaluate(&self, text: &str) -> SafetyVerdict {
        let lowered = text.to_lowercase();
        match self.phrases.iter().find(|phrase| lowered.contains(phrase.as_str())) {
            Some(_) => {
                // Never log the user text.
                tracing::warn!("[SafetyGate] Crisis indicator detected; skipping model call");
                SafetyVerdict::crisis()
            }
            None => SafetyVerdict::clear(),
        }
    }
}
