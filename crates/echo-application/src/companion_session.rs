//! Companion session orchestration.
//!
//! Wires the chat endpoint to the conversation store, mood journal and
//! entitlement clock for one active conversation.

use echo_core::EchoError;
use echo_core::clock::Clock;
use echo_core::conversation::{
    ConversationContext, ConversationSession, ConversationStore, ConversationSummary, Message,
};
use echo_core::entitlement::EntitlementClock;
use echo_core::error::Result;
use echo_core::mood::MoodJournal;
use echo_core::persona::{PersonalityProfile, Trait, TraitVector};
use echo_core::prompt::PriorTurn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::chat_service::{ChatReply, ChatRequest, ChatService};

/// Result of one `send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub user_message: Message,
    pub reply: Message,
    /// The safety gate answered instead of the model.
    pub crisis: bool,
    /// The model call failed and a canned reply was used.
    pub fallback: bool,
    /// The session was summarized after this turn.
    pub summarized: bool,
}

struct SessionState {
    session: ConversationSession,
    store: ConversationStore,
}

/// Clears the in-flight flag when a send finishes, however it finishes.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| EchoError::SendInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct CompanionSession {
    chat: Arc<ChatService>,
    journal: Arc<Mutex<MoodJournal>>,
    entitlement: Arc<Mutex<EntitlementClock>>,
    clock: Arc<dyn Clock>,
    token: String,
    state: Mutex<SessionState>,
    /// At most one model call is outstanding per session.
    pending: AtomicBool,
}

impl CompanionSession {
    /// Opens a session with `personality_id` (the default profile when `None`).
    ///
    /// Fails with `Entitlement` for a premium profile without Pro access.
    pub async fn start(
        chat: Arc<ChatService>,
        mut store: ConversationStore,
        journal: Arc<Mutex<MoodJournal>>,
        entitlement: Arc<Mutex<EntitlementClock>>,
        clock: Arc<dyn Clock>,
        personality_id: Option<&str>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let profile = match personality_id {
            Some(id) => chat.catalog().select(id)?.clone(),
            None => chat.catalog().default_profile()?.clone(),
        };
        ensure_access(&entitlement, &profile).await?;

        let session = ConversationSession::new(&profile, clock.now());
        store.persist(&session, None).await?;
        tracing::info!(
            "[CompanionSession] Started session {} with {}",
            session.id(),
            profile.id
        );

        Ok(Self {
            chat,
            journal,
            entitlement,
            clock,
            token: token.into(),
            state: Mutex::new(SessionState { session, store }),
            pending: AtomicBool::new(false),
        })
    }

    /// Sends one user message and records the exchange.
    ///
    /// A second send while one is outstanding fails with `SendInFlight`.
    /// Rejected input (validation, throttle, missing credential, network)
    /// leaves the log untouched. An upstream failure is answered with a
    /// canned reply. The user message and reply are saved together; if that
    /// save fails neither is kept. A failed summary write is logged and the
    /// turn still succeeds.
    pub async fn send(&self, text: &str) -> Result<Turn> {
        let _guard = PendingGuard::acquire(&self.pending)?;

        let (request, personality_id) = {
            let state = self.state.lock().await;
            let window = self.chat.config().history_window;
            let history = state
                .session
                .recent(window)
                .iter()
                .map(|m| PriorTurn {
                    sender: m.sender,
                    text: m.text.clone(),
                })
                .collect();
            let request = ChatRequest {
                message: text.to_string(),
                conversation_history: history,
                personality_id: Some(state.session.profile_id().to_string()),
                traits: Some(*state.session.traits()),
                token: self.token.clone(),
            };
            (request, state.session.profile_id().to_string())
        };

        let (reply, fallback) = match self.chat.handle(request).await {
            Ok(reply) => (reply, false),
            Err(e @ EchoError::Upstream { .. }) => {
                tracing::warn!("[CompanionSession] Upstream failure, using fallback: {}", e);
                (ChatReply::fallback(), true)
            }
            Err(e) => return Err(e),
        };

        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let SessionState { session, store } = &mut *state;

        let user_message = Message::user(text.trim(), now);
        let reply_message = Message::companion(reply.response.clone(), personality_id, now)
            .with_mood(reply.detected_mood)
            .with_tags(reply.tags.clone());
        store
            .append_turn(session, user_message.clone(), reply_message.clone())
            .await?;

        let threshold = self.chat.config().summary_threshold;
        let summarized = if session.len() > threshold && !reply.insights.is_empty() {
            let summary = ConversationSummary {
                summary: reply
                    .summary
                    .clone()
                    .unwrap_or_else(|| format!("Conversation of {} messages", session.len())),
                mood: reply.detected_mood,
                insights: reply.insights.clone(),
                timestamp: now,
            };
            match self.record_summary(store, session, summary).await {
                Ok(()) => {
                    tracing::info!("[CompanionSession] Summarized session {}", session.id());
                    true
                }
                Err(e) => {
                    tracing::warn!("[CompanionSession] Failed to record summary: {}", e);
                    false
                }
            }
        } else {
            false
        };

        Ok(Turn {
            user_message,
            reply: reply_message,
            crisis: reply.is_crisis(),
            fallback,
            summarized,
        })
    }

    /// Switches the active profile, resetting traits and appending the
    /// transition message.
    pub async fn select_personality(&self, id: &str) -> Result<Message> {
        let profile = self.chat.catalog().select(id)?.clone();
        ensure_access(&self.entitlement, &profile).await?;

        let now = self.clock.now();
        let mut state = self.state.lock().await;
        let SessionState { session, store } = &mut *state;
        let message = session.switch_profile(&profile, now).clone();
        store.persist(session, None).await?;

        tracing::info!("[CompanionSession] Switched to {}", profile.id);
        Ok(message)
    }

    /// Sets one trait, clamped to [0, 100]; returns the stored value.
    pub async fn set_trait(&self, t: Trait, value: i32) -> u8 {
        self.state.lock().await.session.set_trait(t, value)
    }

    pub async fn adjust_trait(&self, t: Trait, delta: i32) -> u8 {
        self.state.lock().await.session.adjust_trait(t, delta)
    }

    pub async fn react(&self, message_id: &str, reaction: &str) -> Result<u32> {
        let mut state = self.state.lock().await;
        let SessionState { session, store } = &mut *state;
        let count = session.react(message_id, reaction)?;
        store.persist(session, None).await?;
        Ok(count)
    }

    pub async fn search(&self, query: &str) -> Vec<Message> {
        let state = self.state.lock().await;
        state.session.search(query).into_iter().cloned().collect()
    }

    pub async fn export_transcript(&self) -> String {
        self.state.lock().await.session.export_transcript()
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.state.lock().await.session.messages().to_vec()
    }

    pub async fn profile_id(&self) -> String {
        self.state.lock().await.session.profile_id().to_string()
    }

    pub async fn traits(&self) -> TraitVector {
        *self.state.lock().await.session.traits()
    }

    /// Last mood, archived conversation count and recent summaries.
    pub async fn context(&self) -> ConversationContext {
        let last_mood = self.journal.lock().await.last_mood();
        self.state.lock().await.store.context(last_mood)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    async fn record_summary(
        &self,
        store: &mut ConversationStore,
        session: &ConversationSession,
        summary: ConversationSummary,
    ) -> Result<()> {
        store.persist(session, Some(summary.summary.clone())).await?;
        self.journal.lock().await.add_summary(summary).await
    }
}

async fn ensure_access(
    entitlement: &Mutex<EntitlementClock>,
    profile: &PersonalityProfile,
) -> Result<()> {
    if profile.is_premium() && !entitlement.lock().await.can_access_pro().await {
        tracing::info!("[CompanionSession] {} requires Pro access", profile.id);
        return Err(EchoError::Entitlement(format!(
            "{} is available with Pro",
            profile.name
        )));
    }
    Ok(())
}
