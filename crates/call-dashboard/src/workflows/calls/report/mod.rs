mod presenter;
mod summary;
pub mod views;

pub use presenter::{present_dashboard, DashboardPresenter, AUTOMATIONS_HEADING, DASHBOARD_TITLE};
pub use summary::{
    CallAverages, CallQualityBreakdown, CallReport, DayConnectionRate, FollowUpTotals,
};
pub use views::{BarChartView, BarEntry, CallReportSummary, MetricTile};
