use super::super::domain::{weekday_label, CallMetric, CallRecord, WEEKDAYS};
use super::views::{BarChartView, BarEntry, CallReportSummary, MetricTile};
use chrono::Weekday;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallAverages {
    pub dials: Option<f64>,
    pub conversations: Option<f64>,
    pub leads: Option<f64>,
    pub offers: Option<f64>,
    pub correct_numbers: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayConnectionRate {
    #[serde(skip)]
    pub day: Weekday,
    pub day_label: &'static str,
    /// Records dated on this weekday, with or without a connection rate.
    pub records: usize,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallQualityBreakdown {
    pub wrong_number: Option<f64>,
    pub dead_number: Option<f64>,
    pub correct_numbers: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FollowUpTotals {
    pub follow_up_1: f64,
    pub follow_up_2: f64,
    pub follow_up_3: f64,
}

/// Aggregates over one loaded call log. Building it never mutates the records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallReport {
    pub record_count: usize,
    pub averages: CallAverages,
    /// Mean offers per conversation; `0.0` when no record defines one.
    pub offer_efficiency: f64,
    pub connection_rate_by_day: Vec<DayConnectionRate>,
    pub call_quality: CallQualityBreakdown,
    pub follow_up_totals: FollowUpTotals,
}

impl CallReport {
    pub fn from_records(records: &[CallRecord]) -> Self {
        let metric_mean = |metric: CallMetric| mean(records.iter().map(|r| r.value(metric)));
        let metric_total = |metric: CallMetric| total(records.iter().map(|r| r.value(metric)));

        Self {
            record_count: records.len(),
            averages: CallAverages {
                dials: metric_mean(CallMetric::TotalDials),
                conversations: metric_mean(CallMetric::Conversations),
                leads: metric_mean(CallMetric::Leads),
                offers: metric_mean(CallMetric::OfferMade),
                correct_numbers: metric_mean(CallMetric::TotalCorrectNumbers),
            },
            offer_efficiency: mean(records.iter().map(|r| r.offers_per_conversation))
                .unwrap_or(0.0),
            connection_rate_by_day: connection_rate_by_day(records),
            call_quality: CallQualityBreakdown {
                wrong_number: metric_mean(CallMetric::WrongNumber),
                dead_number: metric_mean(CallMetric::DeadNumber),
                correct_numbers: metric_mean(CallMetric::TotalCorrectNumbers),
            },
            follow_up_totals: FollowUpTotals {
                follow_up_1: metric_total(CallMetric::CorrectFollowUp1),
                follow_up_2: metric_total(CallMetric::CorrectFollowUp2),
                follow_up_3: metric_total(CallMetric::CorrectFollowUp3),
            },
        }
    }

    pub fn summary(&self) -> CallReportSummary {
        let averages = &self.averages;
        let key_metrics = vec![
            MetricTile::average("avg_dials", "Avg. Dials", averages.dials),
            MetricTile::average(
                "avg_conversations",
                "Avg. Conversations",
                averages.conversations,
            ),
            MetricTile::average("avg_leads", "Avg. Leads", averages.leads),
            MetricTile::average("avg_offers", "Avg. Offers Made", averages.offers),
            MetricTile::average(
                "avg_correct_numbers",
                "Avg. Correct Numbers",
                averages.correct_numbers,
            ),
            MetricTile::percentage(
                "offer_efficiency",
                "Offer Efficiency",
                self.offer_efficiency,
            ),
        ];

        let connection_rate_by_day = BarChartView {
            title: "Connection Rate by Day",
            bars: self
                .connection_rate_by_day
                .iter()
                .map(|entry| BarEntry {
                    label: entry.day_label,
                    value: entry.mean,
                })
                .collect(),
        };

        let quality = &self.call_quality;
        let call_quality = BarChartView {
            title: "Call Quality Breakdown",
            bars: vec![
                BarEntry {
                    label: CallMetric::WrongNumber.header(),
                    value: quality.wrong_number,
                },
                BarEntry {
                    label: CallMetric::DeadNumber.header(),
                    value: quality.dead_number,
                },
                BarEntry {
                    label: CallMetric::TotalCorrectNumbers.header(),
                    value: quality.correct_numbers,
                },
            ],
        };

        let totals = &self.follow_up_totals;
        let follow_up_totals = BarChartView {
            title: "Follow-Up Call Totals",
            bars: vec![
                BarEntry {
                    label: CallMetric::CorrectFollowUp1.header(),
                    value: Some(totals.follow_up_1),
                },
                BarEntry {
                    label: CallMetric::CorrectFollowUp2.header(),
                    value: Some(totals.follow_up_2),
                },
                BarEntry {
                    label: CallMetric::CorrectFollowUp3.header(),
                    value: Some(totals.follow_up_3),
                },
            ],
        };

        CallReportSummary {
            record_count: self.record_count,
            offer_efficiency: self.offer_efficiency,
            key_metrics,
            connection_rate_by_day,
            call_quality,
            follow_up_totals,
        }
    }
}

/// Arithmetic mean of the present values; missing values count toward neither
/// the sum nor the denominator.
fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn total<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().flatten().sum()
}

fn connection_rate_by_day(records: &[CallRecord]) -> Vec<DayConnectionRate> {
    let mut rates: Vec<DayConnectionRate> = WEEKDAYS
        .into_iter()
        .filter_map(|day| {
            let dated: Vec<&CallRecord> = records
                .iter()
                .filter(|record| record.day_of_week == Some(day))
                .collect();
            if dated.is_empty() {
                return None;
            }

            Some(DayConnectionRate {
                day,
                day_label: weekday_label(day),
                records: dated.len(),
                mean: mean(dated.iter().map(|record| record.connection_rate)),
            })
        })
        .collect();

    // Stable: equal means keep calendar order, undefined means go last.
    rates.sort_by(|a, b| match (a.mean, b.mean) {
        (Some(left), Some(right)) => right.total_cmp(&left),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    rates
}
