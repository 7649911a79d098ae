use serde::Serialize;

pub const MISSING_DISPLAY: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricTile {
    pub key: &'static str,
    pub label: &'static str,
    pub value: Option<f64>,
    pub display: String,
}

impl MetricTile {
    pub(crate) fn average(key: &'static str, label: &'static str, value: Option<f64>) -> Self {
        Self {
            key,
            label,
            value,
            display: value.map_or_else(|| MISSING_DISPLAY.to_string(), |v| format!("{v:.2}")),
        }
    }

    /// Rounded to two decimals first, then shown as a percentage.
    pub(crate) fn percentage(key: &'static str, label: &'static str, value: f64) -> Self {
        let rounded = (value * 100.0).round() / 100.0;
        Self {
            key,
            label,
            value: Some(value),
            display: format!("{:.2}%", rounded * 100.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarEntry {
    pub label: &'static str,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartView {
    pub title: &'static str,
    pub bars: Vec<BarEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallReportSummary {
    pub record_count: usize,
    pub offer_efficiency: f64,
    pub key_metrics: Vec<MetricTile>,
    pub connection_rate_by_day: BarChartView,
    pub call_quality: BarChartView,
    pub follow_up_totals: BarChartView,
}

impl CallReportSummary {
    pub fn charts(&self) -> [&BarChartView; 3] {
        [
            &self.connection_rate_by_day,
            &self.call_quality,
            &self.follow_up_totals,
        ]
    }
}
