mod common;

use chrono::Duration;
use common::harness;
use echo_application::RECENT_ENTRY_COUNT;
use echo_core::mood::MoodSubmission;
use echo_core::wellness::{TimeWindow, TrendDirection};

#[tokio::test]
async fn test_grateful_check_in_scenario() {
    let h = harness(None).await;
    let wellness = h.context.wellness();

    let submission = MoodSubmission {
        mood: 5,
        energy: Some(4),
        anxiety: Some(1),
        sleep: Some(5),
        note: None,
        tags: vec!["grateful".to_string()],
    };
    let entry = wellness.submit_mood(submission).await.unwrap();

    let recent = wellness.recent_entries(RECENT_ENTRY_COUNT).await;
    assert_eq!(recent[0], entry);

    let insights = wellness.insights(TimeWindow::Week).await;
    assert_eq!(insights.average_mood, 5.0);
    assert_eq!(insights.check_in_streak, 1);
}

#[tokio::test]
async fn test_invalid_score_writes_nothing() {
    let h = harness(None).await;
    let wellness = h.context.wellness();

    let mut submission = MoodSubmission::new(4);
    submission.sleep = Some(9);
    assert!(wellness.submit_mood(submission).await.unwrap_err().is_validation());
    assert!(wellness.recent_entries(7).await.is_empty());
    assert!(!h.context.paths().mood_entries_file().exists());
}

#[tokio::test]
async fn test_empty_window_reports_no_data() {
    let h = harness(None).await;
    let insights = h.context.wellness().insights(TimeWindow::Month).await;
    assert_eq!(insights.average_mood, 0.0);
    assert!(!insights.has_mood_data());
    assert_eq!(insights.recommendations.len(), 3);
}

#[tokio::test]
async fn test_falling_mood_is_declining() {
    let h = harness(None).await;
    let wellness = h.context.wellness();

    wellness.submit_mood(MoodSubmission::new(5)).await.unwrap();
    h.clock.advance(Duration::days(1));
    wellness.submit_mood(MoodSubmission::new(2)).await.unwrap();

    let insights = wellness.insights(TimeWindow::Week).await;
    assert_eq!(insights.mood_trend, 3);
    assert_eq!(insights.trend_direction, TrendDirection::Declining);
    assert_eq!(insights.check_in_streak, 2);
}

#[tokio::test]
async fn test_trial_lifecycle() {
    let h = harness(None).await;
    let trial = h.context.trial();

    assert!(!trial.can_access_pro().await);
    let started = trial.start_trial().await.unwrap();
    assert_eq!(started.days_remaining, 30);

    h.clock.advance(Duration::days(10));
    let again = trial.start_trial().await.unwrap();
    assert_eq!(again.trial_end, started.trial_end);
    assert_eq!(again.days_remaining, 20);

    h.clock.advance(Duration::days(21));
    assert!(!trial.can_access_pro().await);
    assert!(trial.status().await.has_used_trial);
}
