//! Canned empathetic replies used when the model gives nothing usable.

use rand::seq::SliceRandom;

pub const FALLBACK_RESPONSES: [&str; 3] = [
    "I hear you, and I want you to know that your feelings are valid. Sometimes just expressing what we're going through can be the first step toward feeling better. What's most important to you right now?",
    "Thank you for sharing with me. It takes courage to open up about what you're experiencing. I'm here to listen and support you through this. How can I best help you today?",
    "I can sense that you're going through something. Please know that you're not alone in this. Your feelings matter, and it's okay to take things one moment at a time.",
];

/// Tags attached to a fallback reply.
pub const FALLBACK_TAGS: &[&str] = &["general"];

/// Picks one of the canned replies at random.
pub fn pick_fallback() -> &'static str {
    FALLBACK_RESPONSES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(FALLBACK_RESPONSES[0])
}
