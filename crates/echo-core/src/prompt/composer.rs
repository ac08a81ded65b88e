//! Prompt composer.
//!
//! Merges the companion's base instructions, the active profile's system
//! prompt, the banded trait vector, the trimmed history window and the user
//! text into one outbound prompt.

use crate::config::DEFAULT_HISTORY_WINDOW;
use crate::conversation::{Message, Sender};
use crate::persona::{PersonalityProfile, Trait, TraitVector, band_label};
use serde::{Deserialize, Serialize};

/// Instructions shared by every profile.
pub const BASE_INSTRUCTIONS: &str = "You are EchoWhisper, a compassionate AI companion focused on emotional support and mental wellness. You provide a safe, non-judgmental space for users to express their thoughts and feelings.

Your approach:
- Listen actively and validate emotions
- Offer gentle support and encouragement
- Help users process their feelings
- Suggest healthy coping strategies when appropriate
- Recognize signs of distress and provide appropriate resources
- Maintain hope and focus on resilience

Always prioritize the user's emotional safety and well-being.";

/// One history entry forwarded alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorTurn {
    pub sender: Sender,
    pub text: String,
}

/// The composed request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedPrompt {
    pub prompt: String,
    pub prior_turns: Vec<PriorTurn>,
}

/// Renders the "Personality adjustments:" block.
pub fn render_traits(traits: &TraitVector) -> String {
    let mut out = String::from("Personality adjustments:");
    for (t, value) in traits.iter() {
        let label = match t {
            Trait::Empathy | Trait::Energy => {
                format!("{} level", t.display_name())
            }
            _ => t.display_name().to_string(),
        };
        out.push_str(&format!("\n- {}: {}% ({})", label, value, band_label(t, value)));
    }
    out
}

#[derive(Debug, Clone, Copy)]
pub struct PromptComposer {
    history_window: usize,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_WINDOW)
    }
}

impl PromptComposer {
    pub fn new(history_window: usize) -> Self {
        Self { history_window }
    }

    pub fn history_window(&self) -> usize {
        self.history_window
    }

    /// Builds the prompt for one turn.
    ///
    /// `history` is the session log in send order, excluding the current
    /// user text. Only its last `history_window` entries are used, oldest
    /// first; shorter histories are used whole.
    pub fn compose(
        &self,
        profile: &PersonalityProfile,
        traits: &TraitVector,
        history: &[Message],
        user_text: &str,
    ) -> ComposedPrompt {
        let start = history.len().saturating_sub(self.history_window);
        let prior_turns: Vec<PriorTurn> = history[start..]
            .iter()
            .map(|m| PriorTurn {
                sender: m.sender,
                text: m.text.clone(),
            })
            .collect();

        let mut sections = vec![
            BASE_INSTRUCTIONS.to_string(),
            profile.system_prompt.clone(),
            render_traits(traits),
        ];

        if !prior_turns.is_empty() {
            let lines: Vec<String> = prior_turns
                .iter()
                .map(|turn| format!("{}: {}", turn.sender, turn.text))
                .collect();
            sections.push(format!("Recent conversation context:\n{}", lines.join("\n")));
        }

        sections.push(format!("User: {}", user_text));

        ComposedPrompt {
            prompt: sections.join("\n\n"),
            prior_turns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::PersonalityCatalog;
    use chrono::Utc;

    fn history(n: usize) -> Vec<Message> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("u{}", i), Utc::now())
                } else {
                    Message::companion(format!("c{}", i), "sarah", Utc::now())
                }
            })
            .collect()
    }

    #[test]
    fn test_render_traits_block() {
        let traits = TraitVector::new(95, 60, 30, 40, 25);
        let block = render_traits(&traits);
        assert_eq!(
            block,
            "Personality adjustments:\n\
             - Empathy level: 95% (very empathetic)\n\
             - Energy level: 60% (moderate energy)\n\
             - Formality: 30% (casual)\n\
             - Humor: 40% (serious)\n\
             - Directness: 25% (gentle and indirect)"
        );
    }

    #[test]
    fn test_window_keeps_last_five_oldest_first() {
        let catalog = PersonalityCatalog::default();
        let sarah = catalog.select("sarah").unwrap();
        let composed = PromptComposer::default().compose(sarah, &sarah.traits, &history(8), "now");

        let texts: Vec<&str> = composed.prior_turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["c3", "u4", "c5", "u6", "c7"]);
        assert!(composed.prompt.contains("Recent conversation context:\ncompanion: c3\nuser: u4"));
        assert!(!composed.prompt.contains("u2"));
    }

    #[test]
    fn test_short_history_used_whole() {
        let catalog = PersonalityCatalog::default();
        let zen = catalog.select("zen").unwrap();
        let composed = PromptComposer::default().compose(zen, &zen.traits, &history(2), "hi");
        assert_eq!(composed.prior_turns.len(), 2);
    }

    #[test]
    fn test_empty_history_omits_context_block() {
        let catalog = PersonalityCatalog::default();
        let zen = catalog.select("zen").unwrap();
        let composed = PromptComposer::default().compose(zen, &zen.traits, &[], "hello there");

        assert!(!composed.prompt.contains("Recent conversation context"));
        assert!(composed.prompt.starts_with(BASE_INSTRUCTIONS));
        assert!(composed.prompt.contains(&zen.system_prompt));
        assert!(composed.prompt.ends_with("User: hello there"));
    }

    #[test]
    fn test_session_overrides_are_rendered() {
        let catalog = PersonalityCatalog::default();
        let sarah = catalog.select("sarah").unwrap();
        let mut traits = sarah.traits;
        traits.set(Trait::Humor, 85);

        let composed = PromptComposer::default().compose(sarah, &traits, &[], "joke?");
        assert!(composed.prompt.contains("- Humor: 85% (playful and humorous)"));
    }
}
