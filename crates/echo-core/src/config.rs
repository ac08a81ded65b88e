//! Companion configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so a missing file or a partial file is valid.

use serde::{Deserialize, Serialize};

/// Default maximum characters accepted for a single user message.
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 2000;
/// Default number of prior turns handed to the composer.
pub const DEFAULT_HISTORY_WINDOW: usize = 5;
/// Message count a session must exceed before it is summarized.
pub const DEFAULT_SUMMARY_THRESHOLD: usize = 10;
/// Length of the Pro trial.
pub const DEFAULT_TRIAL_DURATION_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    pub max_message_chars: usize,
    pub history_window: usize,
    pub summary_threshold: usize,
    pub trial_duration_days: i64,
    pub throttle: ThrottleConfig,
    pub model: ModelConfig,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
            history_window: DEFAULT_HISTORY_WINDOW,
            summary_threshold: DEFAULT_SUMMARY_THRESHOLD,
            trial_duration_days: DEFAULT_TRIAL_DURATION_DAYS,
            throttle: ThrottleConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

/// Request throttle settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottleConfig {
    /// Maximum operations per token per window.
    pub limit: u32,
    /// Window length; `None` keeps counters until restart.
    pub interval_secs: Option<u64>,
    /// Upper bound on distinct tokens held in memory.
    pub max_tracked_tokens: usize,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            interval_secs: None,
            max_tracked_tokens: 500,
        }
    }
}

/// Generation settings forwarded to the model collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash".to_string(),
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: CompanionConfig = toml::from_str(
            r#"
history_window = 3

[throttle]
limit = 5
interval_secs = 60
"#,
        )
        .unwrap();

        assert_eq!(config.history_window, 3);
        assert_eq!(config.max_message_chars, 2000);
        assert_eq!(config.throttle.limit, 5);
        assert_eq!(config.throttle.interval_secs, Some(60));
        assert_eq!(config.throttle.max_tracked_tokens, 500);
        assert_eq!(config.model.name, "gemini-2.0-flash");
    }
}
