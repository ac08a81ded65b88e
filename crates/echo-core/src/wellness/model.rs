//! Wellness insight model.

use crate::error::{EchoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Look-back window for insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    Week,
    Month,
    Quarter,
}

impl TimeWindow {
    pub fn days(&self) -> i64 {
        match self {
            TimeWindow::Week => 7,
            TimeWindow::Month => 30,
            TimeWindow::Quarter => 90,
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Quarter => "quarter",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeWindow {
    type Err = EchoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" | "7" => Ok(TimeWindow::Week),
            "month" | "30" => Ok(TimeWindow::Month),
            "quarter" | "90" => Ok(TimeWindow::Quarter),
            other => Err(EchoError::validation(format!(
                "Unknown time window '{}' (expected week, month or quarter)",
                other
            ))),
        }
    }
}

/// Direction of the in-window mood trend.
///
/// The trend value is earlier minus later, so a positive value means mood
/// went down over the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

impl TrendDirection {
    pub fn from_trend(trend: i32) -> Self {
        match trend {
            t if t > 0 => TrendDirection::Declining,
            t if t < 0 => TrendDirection::Improving,
            _ => TrendDirection::Stable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub progress: u32,
    pub target: u32,
    /// progress / target, not clamped
    pub fraction: f64,
    /// `fraction` clamped to 1.0 for progress bars
    pub display_fraction: f64,
    pub completed: bool,
}

impl Achievement {
    pub(crate) fn new(id: &str, title: &str, description: &str, progress: u32, target: u32) -> Self {
        let fraction = if target == 0 {
            1.0
        } else {
            progress as f64 / target as f64
        };
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            progress,
            target,
            fraction,
            display_fraction: fraction.min(1.0),
            completed: progress >= target,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    SelfCare,
    Expression,
    Tracking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub body: String,
}

/// Aggregated wellness view over one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    pub window: TimeWindow,
    /// Mean in-window mood rounded to one decimal; 0.0 means no data
    pub average_mood: f64,
    pub mood_label: Option<String>,
    pub mood_trend: i32,
    pub trend_direction: TrendDirection,
    pub mood_entry_count: usize,
    pub conversation_count: usize,
    pub total_insights: usize,
    pub check_in_streak: u32,
    pub achievements: Vec<Achievement>,
    pub recommendations: Vec<Recommendation>,
}

impl Insights {
    pub fn has_mood_data(&self) -> bool {
        self.mood_entry_count > 0
    }
}
