//! Insight computation.
//!
//! Pure functions over mood points and conversation summaries; `now` is
//! passed in so windows are deterministic under test.

use super::model::{
    Achievement, Insights, Recommendation, RecommendationKind, TimeWindow, TrendDirection,
};
use crate::conversation::ConversationSummary;
use crate::mood::{MoodPoint, mood_label};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeSet;

const CHECK_IN_TARGET: u32 = 7;
const CONVERSATION_TARGET: u32 = 5;
const INSIGHT_TARGET: u32 = 10;

/// Computes insights for entries with `timestamp >= now - window`.
pub fn compute_insights(
    points: &[MoodPoint],
    summaries: &[ConversationSummary],
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Insights {
    let cutoff = now - Duration::days(window.days());

    let moods: Vec<&MoodPoint> = points.iter().filter(|p| p.timestamp >= cutoff).collect();
    let conversations: Vec<&ConversationSummary> =
        summaries.iter().filter(|s| s.timestamp >= cutoff).collect();

    let average_mood = if moods.is_empty() {
        0.0
    } else {
        let sum: u32 = moods.iter().map(|p| p.mood as u32).sum();
        let mean = sum as f64 / moods.len() as f64;
        (mean * 10.0).round() / 10.0
    };

    let mood_trend = if moods.len() >= 2 {
        let earliest = moods.iter().min_by_key(|p| p.timestamp);
        let latest = moods.iter().max_by_key(|p| p.timestamp);
        match (earliest, latest) {
            (Some(earliest), Some(latest)) => earliest.mood as i32 - latest.mood as i32,
            _ => 0,
        }
    } else {
        0
    };

    let conversation_count = conversations.len();
    let total_insights: usize = conversations.iter().map(|s| s.insights.len()).sum();
    let mood_entry_count = moods.len();

    let achievements = vec![
        Achievement::new(
            "consistent-check-ins",
            "Consistent Check-ins",
            "Logged mood for 7 days in a row",
            mood_entry_count as u32,
            CHECK_IN_TARGET,
        ),
        Achievement::new(
            "self-reflection",
            "Self-Reflection",
            "Had meaningful conversations",
            conversation_count as u32,
            CONVERSATION_TARGET,
        ),
        Achievement::new(
            "wellness-journey",
            "Wellness Journey",
            "Gained personal insights",
            total_insights as u32,
            INSIGHT_TARGET,
        ),
    ];

    let mut recommendations = Vec::new();
    if average_mood < 3.0 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::SelfCare,
            title: "Focus on Self-Care".to_string(),
            body: "Your recent mood entries suggest you might benefit from extra self-care. Consider trying our guided breathing exercises or reaching out to a friend.".to_string(),
        });
    }
    if conversation_count < 2 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Expression,
            title: "Express Yourself".to_string(),
            body: "Regular conversations can help process emotions and gain insights. Try sharing what's on your mind in our chat feature.".to_string(),
        });
    }
    if mood_entry_count < 3 {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Tracking,
            title: "Track Your Journey".to_string(),
            body: "Regular mood tracking helps identify patterns and progress. Try logging your mood daily for better insights.".to_string(),
        });
    }

    Insights {
        window,
        average_mood,
        mood_label: (!moods.is_empty()).then(|| mood_label(average_mood).to_string()),
        mood_trend,
        trend_direction: TrendDirection::from_trend(mood_trend),
        mood_entry_count,
        conversation_count,
        total_insights,
        check_in_streak: check_in_streak(points, now),
        achievements,
        recommendations,
    }
}

/// Consecutive calendar days (UTC) with at least one entry, ending today or
/// yesterday.
pub fn check_in_streak(points: &[MoodPoint], now: DateTime<Utc>) -> u32 {
    let days: BTreeSet<NaiveDate> = points.iter().map(|p| p.timestamp.date_naive()).collect();

    let today = now.date_naive();
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 15, 18, 0, 0).unwrap()
    }

    fn point(mood: u8, days_ago: i64) -> MoodPoint {
        MoodPoint {
            mood,
            timestamp: now() - Duration::days(days_ago),
            note: None,
        }
    }

    fn summary(insights: usize, days_ago: i64) -> ConversationSummary {
        ConversationSummary {
            summary: "talked".to_string(),
            mood: 3,
            insights: (0..insights).map(|i| format!("insight {}", i)).collect(),
            timestamp: now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_no_data_yields_zero_average() {
        let insights = compute_insights(&[], &[], TimeWindow::Week, now());
        assert_eq!(insights.average_mood, 0.0);
        assert_eq!(insights.mood_label, None);
        assert_eq!(insights.mood_trend, 0);
        assert_eq!(insights.recommendations.len(), 3);
    }

    #[test]
    fn test_single_excellent_entry() {
        let insights = compute_insights(&[point(5, 0)], &[], TimeWindow::Week, now());
        assert_eq!(insights.average_mood, 5.0);
        assert_eq!(insights.mood_label.as_deref(), Some("Excellent"));
        assert_eq!(insights.trend_direction, TrendDirection::Stable);
    }

    #[test]
    fn test_window_filters_old_entries() {
        let points = vec![point(4, 1), point(1, 20)];
        let week = compute_insights(&points, &[], TimeWindow::Week, now());
        let month = compute_insights(&points, &[], TimeWindow::Month, now());

        assert_eq!(week.mood_entry_count, 1);
        assert_eq!(week.average_mood, 4.0);
        assert_eq!(month.mood_entry_count, 2);
        assert_eq!(month.average_mood, 2.5);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let points = vec![point(4, 0), point(4, 1), point(5, 2)];
        let insights = compute_insights(&points, &[], TimeWindow::Week, now());
        assert_eq!(insights.average_mood, 4.3);
    }

    #[test]
    fn test_trend_is_earlier_minus_later() {
        // newest first, as stored
        let rising = vec![point(5, 0), point(3, 2), point(2, 4)];
        let insights = compute_insights(&rising, &[], TimeWindow::Week, now());
        assert_eq!(insights.mood_trend, -3);
        assert_eq!(insights.trend_direction, TrendDirection::Improving);

        let falling = vec![point(1, 0), point(4, 3)];
        let insights = compute_insights(&falling, &[], TimeWindow::Week, now());
        assert_eq!(insights.mood_trend, 3);
        assert_eq!(insights.trend_direction, TrendDirection::Declining);
    }

    #[test]
    fn test_conversation_and_insight_totals() {
        let summaries = vec![summary(4, 1), summary(7, 2), summary(3, 40)];
        let insights = compute_insights(&[], &summaries, TimeWindow::Week, now());

        assert_eq!(insights.conversation_count, 2);
        assert_eq!(insights.total_insights, 11);

        let journey = &insights.achievements[2];
        assert_eq!(journey.progress, 11);
        assert!(journey.completed);
        assert!(journey.fraction > 1.0);
        assert_eq!(journey.display_fraction, 1.0);
    }

    #[test]
    fn test_recommendations_fire_independently() {
        let points = vec![point(4, 0), point(4, 1), point(5, 2)];
        let summaries = vec![summary(1, 0), summary(1, 1)];
        let insights = compute_insights(&points, &summaries, TimeWindow::Week, now());
        assert!(insights.recommendations.is_empty());

        let low = vec![point(1, 0), point(2, 1), point(2, 2)];
        let insights = compute_insights(&low, &summaries, TimeWindow::Week, now());
        let kinds: Vec<RecommendationKind> =
            insights.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![RecommendationKind::SelfCare]);
    }

    #[test]
    fn test_streak_counts_consecutive_days() {
        let points = vec![point(3, 0), point(3, 1), point(4, 1), point(2, 2), point(5, 4)];
        assert_eq!(check_in_streak(&points, now()), 3);

        let from_yesterday = vec![point(3, 1), point(3, 2)];
        assert_eq!(check_in_streak(&from_yesterday, now()), 2);

        let stale = vec![point(3, 2)];
        assert_eq!(check_in_streak(&stale, now()), 0);
    }
}
