//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: A single exchanged message and its reactions
//! - `session`: The active session bound to one profile and trait vector
//! - `record`: Persisted conversation records, summaries and the context view
//! - `repository`: Persistence interface for the conversations list
//! - `store`: Bounded, newest-first conversation log

mod message;
mod record;
mod repository;
mod session;
mod store;

pub use message::{Message, REACTIONS, Sender};
pub use record::{
    ConversationArchive, ConversationContext, ConversationRecord, ConversationSummary,
    MAX_CONVERSATIONS,
};
pub use repository::ConversationRepository;
pub use session::ConversationSession;
pub use store::ConversationStore;
