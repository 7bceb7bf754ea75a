//! Mocked dashboard values.

use super::model::{
    Activity, ActivityKind, ActivityStatus, ChartSummary, ProductShare, SeriesPoint, StatCard,
    TimeFrame,
};

/// The four headline cards, in display order.
pub fn stat_cards() -> Vec<StatCard> {
    vec![
        StatCard::new("Users", "12,592", 12.3),
        StatCard::new("Revenue", "$42,853", 8.1),
        StatCard::new("Tasks", "248", -2.5),
        StatCard::new("Completed", "86%", 4.6),
    ]
}

const WEEK_LABELS: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const WEEK_VALUES: &[u32] = &[20, 45, 28, 80, 99, 43, 50];
const MONTH_LABELS: &[&str] = &["Wk 1", "Wk 2", "Wk 3", "Wk 4"];
const MONTH_VALUES: &[u32] = &[150, 220, 280, 320];
const YEAR_LABELS: &[&str] = &["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
const YEAR_VALUES: &[u32] = &[300, 450, 620, 580, 670, 720];

/// Activity series shared by the line and bar charts.
pub fn activity_series(time_frame: TimeFrame) -> Vec<SeriesPoint> {
    match time_frame {
        TimeFrame::Week => series(WEEK_LABELS, WEEK_VALUES),
        TimeFrame::Month => series(MONTH_LABELS, MONTH_VALUES),
        TimeFrame::Year => series(YEAR_LABELS, YEAR_VALUES),
    }
}

const TREND_VALUES: &[u32] = &[20, 45, 28, 80, 99, 43];

/// Revenue over the last six months (Jan to Jun).
pub fn revenue_trend() -> Vec<SeriesPoint> {
    series(YEAR_LABELS, TREND_VALUES)
}

fn series(labels: &[&str], values: &[u32]) -> Vec<SeriesPoint> {
    labels
        .iter()
        .zip(values)
        .map(|(label, value)| SeriesPoint {
            label: label.to_string(),
            value: *value,
        })
        .collect()
}

/// The five most recent events, newest first.
pub fn recent_activity() -> Vec<Activity> {
    [
        ("1", ActivityKind::Task, "Site Redesign", "Homepage design finished", "2h ago", Some(ActivityStatus::Completed)),
        ("2", ActivityKind::User, "New User", "John Silva joined", "3h ago", None),
        ("3", ActivityKind::Sale, "New Sale", "Premium plan purchased", "5h ago", None),
        ("4", ActivityKind::Task, "API Integration", "Failed to connect to the server", "1 day ago", Some(ActivityStatus::Failed)),
        ("5", ActivityKind::Alert, "System Alert", "Storage 85% full", "1 day ago", None),
    ]
    .into_iter()
    .map(|(id, kind, title, description, time, status)| Activity {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: description.to_string(),
        time: time.to_string(),
        status,
    })
    .collect()
}

/// Totals shown under the charts; the same for every time frame.
pub fn chart_summary() -> ChartSummary {
    ChartSummary {
        total_revenue: "$12,586".to_string(),
        growth_rate: "+23.5%".to_string(),
    }
}

/// Key insights for the selected time frame.
pub fn insights(time_frame: TimeFrame) -> Vec<String> {
    vec![
        format!("Sales increased 18% compared to last {}", time_frame),
        "Product B shows the highest growth rate at 32%".to_string(),
        format!("Customer retention improved to 78% this {}", time_frame),
    ]
}

/// Product distribution for the pie chart.
pub fn product_share() -> Vec<ProductShare> {
    [("Product A", 45), ("Product B", 28), ("Product C", 17), ("Product D", 10)]
        .into_iter()
        .map(|(name, percent)| ProductShare {
            name: name.to_string(),
            percent,
        })
        .collect()
}
