use super::super::playbook::AutomationPlaybook;
use super::views::{BarEntry, CallReportSummary};
use std::io;

pub const DASHBOARD_TITLE: &str = "Real Estate Call Performance Dashboard";
pub const AUTOMATIONS_HEADING: &str = "Suggested Automations";

/// Rendering surface for the dashboard. Implementations decide the medium;
/// the adapter only decides what is shown and in which order.
pub trait DashboardPresenter {
    fn page_title(&mut self, title: &str) -> io::Result<()>;
    fn metric(&mut self, label: &str, value: &str) -> io::Result<()>;
    fn bar_chart(&mut self, title: &str, bars: &[BarEntry]) -> io::Result<()>;
    fn static_text(&mut self, heading: &str, markdown: &str) -> io::Result<()>;
}

pub fn present_dashboard<P>(
    summary: &CallReportSummary,
    playbook: &AutomationPlaybook,
    presenter: &mut P,
) -> io::Result<()>
where
    P: DashboardPresenter + ?Sized,
{
    presenter.page_title(DASHBOARD_TITLE)?;

    for tile in &summary.key_metrics {
        presenter.metric(tile.label, &tile.display)?;
    }

    for chart in summary.charts() {
        presenter.bar_chart(chart.title, &chart.bars)?;
    }

    presenter.static_text(AUTOMATIONS_HEADING, &playbook.to_markdown())
}
