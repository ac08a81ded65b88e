//! File-backed persistence for the EchoWhisper companion.
//!
//! Implements the repository traits from `echo-core` on top of versioned JSON
//! documents, and loads `config.toml`.

pub mod config_service;
pub mod conversation_repository;
pub mod dto;
pub mod mood_repository;
pub mod paths;
pub mod storage;
pub mod trial_repository;

pub use config_service::ConfigService;
pub use conversation_repository::FileConversationRepository;
pub use mood_repository::{FileMoodRepository, FileWellnessRepository};
pub use paths::{EchoPaths, PathError};
pub use trial_repository::FileTrialRepository;
