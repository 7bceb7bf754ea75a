//! Dashboard domain models.

use serde::{Deserialize, Serialize};

/// Direction of a card's change against the previous period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// One statistics card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub title: String,
    /// Pre-formatted display value (e.g. "$42,853")
    pub value: String,
    /// Change against the previous period, in percent
    pub change_percent: f64,
}

impl StatCard {
    pub fn new(title: &str, value: &str, change_percent: f64) -> Self {
        Self {
            title: title.to_string(),
            value: value.to_string(),
            change_percent,
        }
    }

    pub fn trend(&self) -> Trend {
        if self.change_percent > 0.0 {
            Trend::Up
        } else if self.change_percent < 0.0 {
            Trend::Down
        } else {
            Trend::Flat
        }
    }

    /// Signed change with one decimal, e.g. "+12.3%" or "-2.5%".
    pub fn change_label(&self) -> String {
        format!("{:+.1}%", self.change_percent)
    }
}

/// Chart time window.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TimeFrame {
    #[default]
    Week,
    Month,
    Year,
}

/// One labelled point of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u32,
}

/// One slice of the product distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductShare {
    pub name: String,
    /// Share of total, in percent
    pub percent: u32,
}

/// Kind of entry in the recent-activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityKind {
    Task,
    User,
    Sale,
    Alert,
}

/// Outcome of a task entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActivityStatus {
    Completed,
    Failed,
}

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    /// Relative time, pre-formatted (e.g. "2h ago")
    pub time: String,
    /// Only task entries carry a status
    pub status: Option<ActivityStatus>,
}

/// Headline figures shown under the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub total_revenue: String,
    pub growth_rate: String,
}
