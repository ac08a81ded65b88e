//! Use cases of the EchoWhisper companion.

pub mod bootstrap;
pub mod chat_service;
pub mod companion_session;
pub mod fallback;
pub mod trial_service;
pub mod wellness_service;

pub use bootstrap::AppContext;
pub use chat_service::{ChatReply, ChatRequest, ChatService};
pub use companion_session::{CompanionSession, Turn};
pub use trial_service::TrialService;
pub use wellness_service::{RECENT_ENTRY_COUNT, WellnessService};
