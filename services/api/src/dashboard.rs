use crate::cli::{ReportArgs, ReportFormat};
use crate::infra::load_playbook;
use call_dashboard::config::AppConfig;
use call_dashboard::error::AppError;
use call_dashboard::telemetry;
use call_dashboard::workflows::calls::report::{present_dashboard, BarEntry, DashboardPresenter};
use call_dashboard::workflows::calls::{
    AutomationPlaybook, CallLogSession, CallReport, CallReportSummary,
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

const BAR_WIDTH: usize = 30;

/// JSON body shared by `report --format json` and the HTTP dashboard routes.
#[derive(Debug, Serialize)]
pub(crate) struct DashboardPayload<'a> {
    pub(crate) source: DashboardSourceKind,
    pub(crate) summary: CallReportSummary,
    pub(crate) automations: &'a AutomationPlaybook,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DashboardSourceKind {
    File,
    Upload,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        data,
        playbook,
        format,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let data_path = data.unwrap_or(config.dashboard.data_path);
    let playbook_path = playbook.or(config.dashboard.playbook_path);
    let playbook = load_playbook(playbook_path.as_deref())?;

    let summary = summarize_file(&data_path)?;
    info!(path = %data_path.display(), records = summary.record_count, "call log summarized");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        ReportFormat::Text => {
            let mut presenter = TerminalPresenter::new(&mut out);
            present_dashboard(&summary, &playbook, &mut presenter)?;
        }
        ReportFormat::Json => {
            let payload = DashboardPayload {
                source: DashboardSourceKind::File,
                summary,
                automations: &playbook,
            };
            serde_json::to_writer_pretty(&mut out, &payload).map_err(io::Error::from)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn summarize_file(path: &Path) -> Result<CallReportSummary, AppError> {
    let mut session = CallLogSession::new();
    let records = session.load(path)?;
    Ok(CallReport::from_records(&records).summary())
}

/// Plain-text dashboard with `#` bar charts.
pub(crate) struct TerminalPresenter<W: Write> {
    out: W,
    metrics_started: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            metrics_started: false,
        }
    }
}

impl<W: Write> DashboardPresenter for TerminalPresenter<W> {
    fn page_title(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))
    }

    fn metric(&mut self, label: &str, value: &str) -> io::Result<()> {
        if !self.metrics_started {
            self.metrics_started = true;
            writeln!(self.out, "\nKey metrics")?;
        }
        writeln!(self.out, "- {label}: {value}")
    }

    fn bar_chart(&mut self, title: &str, bars: &[BarEntry]) -> io::Result<()> {
        writeln!(self.out, "\n{title}")?;
        if bars.is_empty() {
            return writeln!(self.out, "  (no data)");
        }

        let label_width = bars.iter().map(|bar| bar.label.len()).max().unwrap_or(0);
        let peak = bars
            .iter()
            .filter_map(|bar| bar.value)
            .fold(0.0_f64, f64::max);

        for bar in bars {
            match bar.value {
                Some(value) => {
                    let length = if peak > 0.0 {
                        ((value / peak) * BAR_WIDTH as f64).round() as usize
                    } else {
                        0
                    };
                    writeln!(
                        self.out,
                        "  {:<label_width$} | {:<BAR_WIDTH$} {value:.2}",
                        bar.label,
                        "#".repeat(length),
                    )?;
                }
                None => writeln!(
                    self.out,
                    "  {:<label_width$} | {:<BAR_WIDTH$} n/a",
                    bar.label, ""
                )?,
            }
        }
        Ok(())
    }

    fn static_text(&mut self, heading: &str, markdown: &str) -> io::Result<()> {
        writeln!(self.out, "\n{heading}")?;
        write!(self.out, "{markdown}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(summary: &CallReportSummary) -> String {
        let mut buffer = Vec::new();
        let mut presenter = TerminalPresenter::new(&mut buffer);
        present_dashboard(summary, &AutomationPlaybook::standard(), &mut presenter)
            .expect("render to buffer");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn bar_chart_scales_to_the_largest_value() {
        let mut buffer = Vec::new();
        let mut presenter = TerminalPresenter::new(&mut buffer);
        presenter
            .bar_chart(
                "Follow-Up Call Totals",
                &[
                    BarEntry {
                        label: "Correct Follow Up 1",
                        value: Some(20.0),
                    },
                    BarEntry {
                        label: "Correct Follow Up 2",
                        value: Some(10.0),
                    },
                    BarEntry {
                        label: "Correct Follow Up 3",
                        value: None,
                    },
                ],
            )
            .expect("render");
        let output = String::from_utf8(buffer).expect("utf-8");
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[1], "Follow-Up Call Totals");
        assert!(lines[2].contains(&"#".repeat(30)));
        assert!(lines[2].ends_with("20.00"));
        assert!(lines[3].contains(&format!("| {} ", "#".repeat(15))));
        assert!(lines[4].ends_with("n/a"));
    }

    #[test]
    fn empty_log_renders_placeholders() {
        let output = render(&CallReport::from_records(&[]).summary());

        assert!(output.starts_with("Real Estate Call Performance Dashboard\n"));
        assert!(output.contains("- Avg. Conversations: n/a\n"));
        assert!(output.contains("- Offer Efficiency: 0.00%\n"));
        assert!(output.contains("Connection Rate by Day\n  (no data)\n"));
        assert!(output.contains("\nSuggested Automations\n- **Follow-Up Triggers**:"));
    }

    #[test]
    fn report_lists_weekdays_in_descending_order() {
        let csv = "Date,Total Dials,Conversations,Offer Made\n\
2024-03-04,100,10,1\n\
2024-03-05,100,30,3\n";
        let records = call_dashboard::workflows::calls::CallLogImporter::from_reader(csv.as_bytes())
            .expect("import");
        let output = render(&CallReport::from_records(&records).summary());

        let tuesday = output.find("  Tuesday").expect("tuesday bar");
        let monday = output.find("  Monday").expect("monday bar");
        assert!(tuesday < monday);
        assert!(output.contains("- Offer Efficiency: 10.00%\n"));
    }
}
