use call_dashboard::workflows::calls::report::{
    present_dashboard, BarEntry, CallReport, DashboardPresenter,
};
use call_dashboard::workflows::calls::{AutomationPlaybook, CallLogImporter, CallRecord};
use std::io;

fn fixture_records() -> Vec<CallRecord> {
    let data = include_bytes!("fixtures/daily_calls.csv");
    CallLogImporter::from_reader(&data[..]).expect("fixture imports")
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value present");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn fixture_averages_ignore_missing_cells() {
    let report = CallReport::from_records(&fixture_records());

    assert_eq!(report.record_count, 6);
    assert_close(report.averages.dials, 98.0);
    assert_close(report.averages.conversations, 13.6);
    assert_close(report.averages.leads, 2.4);
    assert_close(report.averages.offers, 2.8);
    assert_close(report.averages.correct_numbers, 32.8);
    assert_close(Some(report.offer_efficiency), 0.2125);
}

#[test]
fn fixture_quality_and_follow_up_totals() {
    let report = CallReport::from_records(&fixture_records());

    assert_close(report.call_quality.wrong_number, 16.2);
    assert_close(report.call_quality.dead_number, 12.6);
    assert_close(report.call_quality.correct_numbers, 32.8);

    assert_eq!(report.follow_up_totals.follow_up_1, 20.0);
    assert_eq!(report.follow_up_totals.follow_up_2, 10.0);
    assert_eq!(report.follow_up_totals.follow_up_3, 4.0);
}

#[test]
fn fixture_connection_rate_by_day_is_sorted_and_skips_undated_rows() {
    let report = CallReport::from_records(&fixture_records());
    let days: Vec<&str> = report
        .connection_rate_by_day
        .iter()
        .map(|entry| entry.day_label)
        .collect();

    assert_eq!(days, ["Wednesday", "Monday", "Tuesday", "Friday"]);
    assert_close(report.connection_rate_by_day[0].mean, 0.2);
    assert_close(report.connection_rate_by_day[1].mean, 0.15);
    assert_close(report.connection_rate_by_day[2].mean, 0.0);
    assert_eq!(report.connection_rate_by_day[3].mean, None);

    let grouped: usize = report
        .connection_rate_by_day
        .iter()
        .map(|entry| entry.records)
        .sum();
    assert_eq!(grouped, 5, "the undated row belongs to no weekday");
}

#[test]
fn reference_scenario_guards_offer_efficiency_but_not_connection_rate() {
    let csv = "Date,Total Dials,Conversations,Offer Made\n\
2024-03-04,100,20,5\n\
2024-03-05,50,0,0\n";
    let records = CallLogImporter::from_reader(csv.as_bytes()).expect("import");

    let efficiency: Vec<Option<f64>> = records
        .iter()
        .map(|record| record.offers_per_conversation)
        .collect();
    assert_eq!(efficiency, vec![Some(0.25), None]);

    let rates: Vec<Option<f64>> = records.iter().map(|record| record.connection_rate).collect();
    assert_eq!(rates, vec![Some(0.2), Some(0.0)]);

    let report = CallReport::from_records(&records);
    assert_eq!(report.offer_efficiency, 0.25);
}

#[test]
fn offer_efficiency_falls_back_to_zero_when_undefined_everywhere() {
    let csv = "Date,Total Dials,Conversations,Offer Made\n\
2024-03-04,100,0,0\n\
2024-03-05,50,,3\n\
2024-03-06,40,abc,1\n";
    let records = CallLogImporter::from_reader(csv.as_bytes()).expect("import");
    assert!(records
        .iter()
        .all(|record| record.offers_per_conversation.is_none()));

    let report = CallReport::from_records(&records);
    assert_eq!(report.offer_efficiency, 0.0);
    assert_eq!(CallReport::from_records(&[]).offer_efficiency, 0.0);
}

#[test]
fn empty_input_yields_missing_aggregates() {
    let report = CallReport::from_records(&[]);

    assert_eq!(report.record_count, 0);
    assert_eq!(report.averages.dials, None);
    assert_eq!(report.call_quality.wrong_number, None);
    assert!(report.connection_rate_by_day.is_empty());
    assert_eq!(report.follow_up_totals.follow_up_1, 0.0);
}

#[test]
fn aggregation_is_idempotent_and_leaves_records_untouched() {
    let records = fixture_records();
    let before = records.clone();

    let first = CallReport::from_records(&records);
    let second = CallReport::from_records(&records);

    assert_eq!(records, before);
    assert_eq!(
        serde_json::to_vec(&first).expect("serialize"),
        serde_json::to_vec(&second).expect("serialize")
    );
    assert_eq!(first.summary(), second.summary());
}

#[test]
fn summary_tiles_match_dashboard_formatting() {
    let summary = CallReport::from_records(&fixture_records()).summary();
    let tiles: Vec<(&str, &str)> = summary
        .key_metrics
        .iter()
        .map(|tile| (tile.label, tile.display.as_str()))
        .collect();

    assert_eq!(
        tiles,
        vec![
            ("Avg. Dials", "98.00"),
            ("Avg. Conversations", "13.60"),
            ("Avg. Leads", "2.40"),
            ("Avg. Offers Made", "2.80"),
            ("Avg. Correct Numbers", "32.80"),
            ("Offer Efficiency", "21.00%"),
        ]
    );

    let quality_labels: Vec<&str> = summary
        .call_quality
        .bars
        .iter()
        .map(|bar| bar.label)
        .collect();
    assert_eq!(
        quality_labels,
        ["Wrong Number", "Dead Number", "Total Correct Numbers"]
    );
}

#[derive(Default)]
struct ChartCollector {
    charts: Vec<(String, Vec<BarEntry>)>,
    text: String,
}

impl DashboardPresenter for ChartCollector {
    fn page_title(&mut self, _title: &str) -> io::Result<()> {
        Ok(())
    }

    fn metric(&mut self, _label: &str, _value: &str) -> io::Result<()> {
        Ok(())
    }

    fn bar_chart(&mut self, title: &str, bars: &[BarEntry]) -> io::Result<()> {
        self.charts.push((title.to_string(), bars.to_vec()));
        Ok(())
    }

    fn static_text(&mut self, _heading: &str, markdown: &str) -> io::Result<()> {
        self.text = markdown.to_string();
        Ok(())
    }
}

#[test]
fn presenter_receives_follow_up_chart_and_playbook_text() {
    let summary = CallReport::from_records(&fixture_records()).summary();
    let mut presenter = ChartCollector::default();

    present_dashboard(&summary, &AutomationPlaybook::standard(), &mut presenter)
        .expect("render");

    let (title, bars) = presenter
        .charts
        .iter()
        .find(|(title, _)| title == "Follow-Up Call Totals")
        .expect("follow-up chart");
    assert_eq!(title, "Follow-Up Call Totals");
    assert_eq!(
        bars.iter().map(|bar| bar.value).collect::<Vec<_>>(),
        vec![Some(20.0), Some(10.0), Some(4.0)]
    );
    assert!(presenter.text.contains("Follow-Up Triggers"));
}
