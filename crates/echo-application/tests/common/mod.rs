#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use echo_application::AppContext;
use echo_core::clock::ManualClock;
use echo_infrastructure::EchoPaths;
use echo_interaction::{AgentError, ChatTurnRequest, CompanionAgent, ModelReply};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use tokio::sync::Notify;

pub enum Script {
    Reply(ModelReply),
    Empty,
    HttpError(u16),
    NetworkError,
}

/// Agent that answers every call from a fixed script and records requests.
pub struct StubAgent {
    script: Script,
    pub requests: Mutex<Vec<ChatTurnRequest>>,
    gate: Option<Arc<Notify>>,
}

impl StubAgent {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(ModelReply::text(text)))
    }

    /// Blocks each call until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompanionAgent for StubAgent {
    fn name(&self) -> &str {
        "stub"
    }

    async fn reply(&self, request: ChatTurnRequest) -> Result<ModelReply, AgentError> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.script {
            Script::Reply(reply) => Ok(reply.clone()),
            Script::Empty => Err(AgentError::EmptyResponse),
            Script::HttpError(status) => Err(AgentError::Http {
                status: *status,
                message: "upstream said no".to_string(),
                is_retryable: *status >= 500,
                retry_after: None,
            }),
            Script::NetworkError => Err(AgentError::Network("connection refused".to_string())),
        }
    }
}

pub struct Harness {
    pub temp_dir: TempDir,
    pub clock: Arc<ManualClock>,
    pub context: AppContext,
}

pub fn start_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

pub async fn harness(agent: Option<Arc<StubAgent>>) -> Harness {
    harness_with_config(agent, None).await
}

pub async fn harness_with_config(agent: Option<Arc<StubAgent>>, config: Option<&str>) -> Harness {
    let temp_dir = TempDir::new().unwrap();
    let paths = EchoPaths::with_root(temp_dir.path());
    if let Some(config) = config {
        std::fs::write(paths.config_file(), config).unwrap();
    }
    let clock = Arc::new(ManualClock::new(start_time()));
    let agent = agent.map(|a| a as Arc<dyn CompanionAgent>);
    let context = AppContext::bootstrap(paths, agent, clock.clone())
        .await
        .unwrap();
    Harness {
        temp_dir,
        clock,
        context,
    }
}
