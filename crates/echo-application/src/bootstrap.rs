//! Application wiring.

use anyhow::{Context, Result};
use echo_core::clock::Clock;
use echo_core::config::CompanionConfig;
use echo_core::conversation::{ConversationRepository, ConversationStore};
use echo_core::entitlement::EntitlementClock;
use echo_core::mood::MoodJournal;
use echo_core::persona::PersonalityCatalog;
use echo_infrastructure::{
    ConfigService, EchoPaths, FileConversationRepository, FileMoodRepository, FileTrialRepository,
    FileWellnessRepository,
};
use echo_interaction::{CompanionAgent, GeminiApiAgent};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chat_service::ChatService;
use crate::companion_session::CompanionSession;
use crate::trial_service::TrialService;
use crate::wellness_service::WellnessService;

/// Everything a front end needs, loaded from one data directory.
pub struct AppContext {
    paths: EchoPaths,
    config: CompanionConfig,
    chat: Arc<ChatService>,
    journal: Arc<Mutex<MoodJournal>>,
    entitlement: Arc<Mutex<EntitlementClock>>,
    conversations: Arc<dyn ConversationRepository>,
    clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Loads configuration and every persisted collection under `paths`.
    ///
    /// Unreadable collections are reset to empty; a malformed config file is
    /// an error.
    pub async fn bootstrap(
        paths: EchoPaths,
        agent: Option<Arc<dyn CompanionAgent>>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let config = ConfigService::new(&paths)
            .get_config()
            .with_context(|| format!("Failed to load {:?}", paths.config_file()))?;

        let journal = MoodJournal::load(
            Arc::new(FileMoodRepository::new(&paths)),
            Arc::new(FileWellnessRepository::new(&paths)),
            clock.clone(),
        )
        .await;
        let entitlement =
            EntitlementClock::load(Arc::new(FileTrialRepository::new(&paths)), clock.clone())
                .await
                .with_trial_days(config.trial_duration_days);
        let conversations: Arc<dyn ConversationRepository> =
            Arc::new(FileConversationRepository::new(&paths));

        let chat = Arc::new(ChatService::new(
            Arc::new(PersonalityCatalog::default()),
            agent,
            config.clone(),
            clock.clone(),
        ));

        tracing::info!("[AppContext] Loaded data from {:?}", paths.root());
        Ok(Self {
            paths,
            config,
            chat,
            journal: Arc::new(Mutex::new(journal)),
            entitlement: Arc::new(Mutex::new(entitlement)),
            conversations,
            clock,
        })
    }

    /// The Gemini agent if `GEMINI_API_KEY` is set.
    pub fn agent_from_env() -> Option<Arc<dyn CompanionAgent>> {
        match GeminiApiAgent::try_from_env() {
            Ok(agent) => Some(Arc::new(agent)),
            Err(e) => {
                tracing::warn!("[AppContext] Model agent unavailable: {}", e);
                None
            }
        }
    }

    pub fn paths(&self) -> &EchoPaths {
        &self.paths
    }

    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    pub fn chat(&self) -> Arc<ChatService> {
        self.chat.clone()
    }

    pub fn catalog(&self) -> &PersonalityCatalog {
        self.chat.catalog()
    }

    pub fn wellness(&self) -> WellnessService {
        WellnessService::new(self.journal.clone(), self.clock.clone())
    }

    pub fn trial(&self) -> TrialService {
        TrialService::new(self.entitlement.clone())
    }

    /// Opens a new conversation with `personality_id` (default profile when `None`).
    pub async fn start_session(
        &self,
        personality_id: Option<&str>,
        token: impl Into<String>,
    ) -> echo_core::Result<CompanionSession> {
        let store = ConversationStore::load(self.conversations.clone()).await;
        CompanionSession::start(
            self.chat.clone(),
            store,
            self.journal.clone(),
            self.entitlement.clone(),
            self.clock.clone(),
            personality_id,
            token,
        )
        .await
    }
}
