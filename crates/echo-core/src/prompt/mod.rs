//! Prompt composition.

mod composer;

pub use composer::{BASE_INSTRUCTIONS, ComposedPrompt, PriorTurn, PromptComposer, render_traits};
