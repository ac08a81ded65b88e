mod common;

use common::{Script, StubAgent, harness};
use echo_core::EchoError;
use echo_core::conversation::Sender;
use echo_core::persona::Trait;
use echo_core::safety::CRISIS_RESPONSE;
use echo_core::wellness::TimeWindow;
use echo_interaction::ModelReply;
use std::sync::Arc;
use tokio::sync::Notify;

#[tokio::test]
async fn test_session_opens_with_greeting() {
    let h = harness(Some(Arc::new(StubAgent::replying("hi")))).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let messages = session.messages().await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::Companion);
    assert_eq!(session.profile_id().await, "sarah");
}

#[tokio::test]
async fn test_ordinary_turn_appends_pair_and_forwards_prompt() {
    let agent = Arc::new(StubAgent::replying("That sounds like a lot."));
    let h = harness(Some(agent.clone())).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let turn = session.send("Work was <b>heavy</b> today").await.unwrap();
    assert_eq!(turn.reply.text, "That sounds like a lot.");
    assert!(!turn.crisis && !turn.fallback);
    assert_eq!(session.messages().await.len(), 3);

    let requests = agent.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].prompt.ends_with("User: Work was bheavy/b today"));
    // Only the greeting preceded this turn.
    assert_eq!(requests[0].prior_turns.len(), 1);
}

#[tokio::test]
async fn test_crisis_turn_never_reaches_the_model() {
    let agent = Arc::new(StubAgent::replying("should not be used"));
    let h = harness(Some(agent.clone())).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let turn = session.send("I want to kill myself").await.unwrap();

    assert_eq!(agent.call_count(), 0);
    assert!(turn.crisis);
    assert_eq!(turn.reply.text, CRISIS_RESPONSE);
    assert_eq!(turn.reply.mood, Some(1));
    assert_eq!(turn.reply.tags, vec!["crisis".to_string(), "urgent".to_string()]);
    assert_eq!(session.messages().await.len(), 3);
}

#[tokio::test]
async fn test_oversized_message_has_no_side_effects() {
    let agent = Arc::new(StubAgent::replying("hi"));
    let h = harness(Some(agent.clone())).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let err = session.send(&"a".repeat(2001)).await.unwrap_err();
    assert!(err.is_validation());
    assert_eq!(err.status_code(), 400);
    assert_eq!(agent.call_count(), 0);
    assert_eq!(session.messages().await.len(), 1);
}

#[tokio::test]
async fn test_upstream_failure_falls_back_to_canned_reply() {
    let agent = Arc::new(StubAgent::new(Script::HttpError(500)));
    let h = harness(Some(agent)).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let turn = session.send("hello").await.unwrap();
    assert!(turn.fallback);
    assert!(echo_application::fallback::FALLBACK_RESPONSES.contains(&turn.reply.text.as_str()));
    assert_eq!(turn.reply.tags, vec!["general".to_string()]);
}

#[tokio::test]
async fn test_network_failure_is_retryable_and_leaves_log_untouched() {
    let agent = Arc::new(StubAgent::new(Script::NetworkError));
    let h = harness(Some(agent)).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let err = session.send("hello").await.unwrap_err();
    assert!(matches!(err, EchoError::Network(_)));
    assert!(err.is_retryable());
    assert_eq!(session.messages().await.len(), 1);
    assert!(!session.is_pending());
}

#[tokio::test]
async fn test_missing_agent_is_service_unavailable() {
    let h = harness(None).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let err = session.send("hello").await.unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(err.status_code(), 503);
    assert_eq!(err.user_message(), "AI service is temporarily unavailable");
}

#[tokio::test]
async fn test_second_send_while_pending_is_rejected() {
    let gate = Arc::new(Notify::new());
    let agent = Arc::new(StubAgent::replying("done").gated(gate.clone()));
    let h = harness(Some(agent)).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let (first, second) = tokio::join!(session.send("first"), async {
        tokio::task::yield_now().await;
        let second = session.send("second").await;
        gate.notify_one();
        second
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(EchoError::SendInFlight)));
    assert_eq!(session.messages().await.len(), 3);
}

#[tokio::test]
async fn test_premium_profile_requires_trial() {
    let h = harness(Some(Arc::new(StubAgent::replying("hi")))).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    let err = session.select_personality("alex").await.unwrap_err();
    assert_eq!(err.status_code(), 403);
    assert_eq!(session.profile_id().await, "sarah");

    h.context.trial().start_trial().await.unwrap();
    session.set_trait(Trait::Empathy, 10).await;

    let transition = session.select_personality("alex").await.unwrap();
    assert!(transition.text.starts_with("I'm now Energetic Alex!"));
    assert_eq!(transition.personality_id.as_deref(), Some("alex"));
    assert_eq!(session.traits().await.get(Trait::Empathy), 70);
    assert_eq!(session.messages().await.len(), 2);
}

#[tokio::test]
async fn test_unknown_profile_is_not_found() {
    let h = harness(Some(Arc::new(StubAgent::replying("hi")))).await;
    let session = h.context.start_session(None, "local").await.unwrap();
    let err = session.select_personality("nobody").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_substantial_session_is_summarized() {
    let reply = ModelReply {
        response: "I hear you.".to_string(),
        detected_mood: Some(4),
        summary: Some("Talked through a stressful week".to_string()),
        insights: vec!["work stress".to_string(), "sleep".to_string()],
        ..Default::default()
    };
    let h = harness(Some(Arc::new(StubAgent::new(Script::Reply(reply))))).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    // Greeting + 4 pairs = 9 messages; the fifth pair crosses 10.
    for i in 0..4 {
        let turn = session.send(&format!("message {}", i)).await.unwrap();
        assert!(!turn.summarized);
    }
    let turn = session.send("message 4").await.unwrap();
    assert!(turn.summarized);

    let insights = h.context.wellness().insights(TimeWindow::Week).await;
    assert_eq!(insights.conversation_count, 1);
    assert_eq!(insights.total_insights, 2);

    let context = session.context().await;
    assert_eq!(context.conversation_count, 1);
    assert_eq!(
        context.recent_summaries,
        vec!["Talked through a stressful week".to_string()]
    );
}

#[tokio::test]
async fn test_reactions_search_and_export() {
    let h = harness(Some(Arc::new(StubAgent::replying("Rest sounds good.")))).await;
    let session = h.context.start_session(None, "local").await.unwrap();
    let turn = session.send("I need rest").await.unwrap();

    assert_eq!(session.react(&turn.reply.id, "heart").await.unwrap(), 1);
    assert_eq!(session.react(&turn.reply.id, "heart").await.unwrap(), 2);
    assert!(session.react("missing", "heart").await.unwrap_err().is_not_found());

    let hits = session.search("REST").await;
    assert_eq!(hits.len(), 2);

    let transcript = session.export_transcript().await;
    assert!(transcript.contains("USER: I need rest"));
    assert!(transcript.contains("COMPANION: Rest sounds good."));
}

#[tokio::test]
async fn test_failed_turn_save_keeps_log_unchanged() {
    let h = harness(Some(Arc::new(StubAgent::replying("hi")))).await;
    let session = h.context.start_session(None, "local").await.unwrap();

    // A directory in place of the conversations file makes the next write fail.
    let path = h.context.paths().conversations_file();
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    assert!(session.send("hello").await.is_err());
    assert_eq!(session.messages().await.len(), 1);
    assert!(!session.is_pending());
}
