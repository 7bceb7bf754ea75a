//! Dashboard figures.
//!
//! The application has no analytics backend; these are the fixed figures the
//! dashboard cards and charts display, and that the assistant quotes.
//!
//! # Module Structure
//!
//! - `model`: card, series and share types
//! - `figures`: the mocked values
//! - `greeting`: time-of-day header

mod figures;
mod greeting;
mod model;

pub use figures::{
    activity_series, chart_summary, insights, product_share, recent_activity, revenue_trend,
    stat_cards,
};
pub use greeting::{FALLBACK_NAME, greeting, greeting_line};
pub use model::{
    Activity, ActivityKind, ActivityStatus, ChartSummary, ProductShare, SeriesPoint, StatCard,
    TimeFrame, Trend,
};
