//! Type coercion and per-row ratio derivation.
//!
//! Nothing in here fails: a cell that cannot be read becomes missing and only
//! that cell is affected.

use super::domain::{CallMetric, CallRecord, DATE_HEADER};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};
use serde::Deserialize;
use std::collections::HashMap;

/// A CSV row as read, before any coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RawCallRow {
    cells: HashMap<String, Option<String>>,
}

impl RawCallRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.cells.insert(column.to_string(), Some(value.to_string()));
        self
    }

    /// Raw cell for `column`; blank and absent cells are both `None`.
    pub fn cell(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .and_then(|value| value.as_deref())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

// `%Y` takes any digit run, so short-year US forms go before `%Y/%m/%d` and
// anything before year 1000 is rejected.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

const MIN_YEAR: i32 = 1000;

fn plausible(date: NaiveDate) -> Option<NaiveDate> {
    (chrono::Datelike::year(&date) >= MIN_YEAR).then_some(date)
}

pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok().and_then(plausible))
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return plausible(dt.date_naive());
    }

    DATETIME_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .and_then(|dt| plausible(dt.date()))
    })
}

pub fn day_of_week(date: Option<NaiveDate>) -> Option<Weekday> {
    date.map(|date| chrono::Datelike::weekday(&date))
}

/// Non-negative finite number, or missing.
pub fn coerce_numeric(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// `conversations / dials`; only a zero or missing dial count makes this missing.
pub fn connection_rate(record: &CallRecord) -> Option<f64> {
    match (record.conversations, record.total_dials) {
        (Some(conversations), Some(dials)) if dials != 0.0 => Some(conversations / dials),
        _ => None,
    }
}

/// `offers / conversations`. Zero conversations is missing, not `0.0`, so a day
/// without conversations does not drag the overall efficiency down.
pub fn offers_per_conversation(record: &CallRecord) -> Option<f64> {
    match (record.offer_made, record.conversations) {
        (Some(offers), Some(conversations)) if conversations > 0.0 => {
            Some(offers / conversations)
        }
        _ => None,
    }
}

pub fn derive_record(row: usize, raw: &RawCallRow) -> CallRecord {
    let date = parse_date(raw.cell(DATE_HEADER));
    let mut record = CallRecord {
        row,
        date,
        day_of_week: day_of_week(date),
        ..CallRecord::default()
    };

    for metric in CallMetric::ordered() {
        record.set_value(metric, coerce_numeric(raw.cell(metric.header())));
    }

    record.connection_rate = connection_rate(&record);
    record.offers_per_conversation = offers_per_conversation(&record);
    record
}

/// Enriches every row, keeping count and order.
pub fn derive_records<I>(rows: I) -> Vec<CallRecord>
where
    I: IntoIterator<Item = RawCallRow>,
{
    rows.into_iter()
        .enumerate()
        .map(|(index, raw)| derive_record(index, &raw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(dials: &str, conversations: &str, offers: &str) -> RawCallRow {
        RawCallRow::new()
            .with("Total Dials", dials)
            .with("Conversations", conversations)
            .with("Offer Made", offers)
    }

    #[test]
    fn parse_date_accepts_common_export_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        for raw in [
            "2024-03-05",
            "2024/03/05",
            "03/05/2024",
            "3/5/2024",
            "03/05/24",
            "3/5/24",
            "03-05-2024",
            "03-05-24",
            "05-Mar-2024",
            "Mar 05, 2024",
            "March 5, 2024",
            "2024-03-05T09:30:00Z",
            "2024-03-05 09:30:00",
            "2024-03-05T09:30:00",
            "2024-03-05 09:30:00.000",
            "2024-03-05T09:30:00.250",
            " 2024-03-05 ",
        ] {
            assert_eq!(parse_date(Some(raw)), Some(expected), "{raw}");
        }
    }

    #[test]
    fn parse_date_is_missing_for_garbage() {
        assert_eq!(parse_date(None), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(Some("   ")), None);
        assert_eq!(parse_date(Some("yesterday")), None);
        assert_eq!(parse_date(Some("2024-02-30")), None);
        assert_eq!(parse_date(Some("0003-05-24")), None);
    }

    #[test]
    fn short_year_dates_land_on_the_right_weekday() {
        let record = derive_record(0, &row("100", "20", "5").with("Date", "03/05/24"));
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(record.day_of_week, Some(Weekday::Tue));

        let record = derive_record(0, &row("100", "20", "5").with("Date", "12/31/23"));
        assert_eq!(record.day_of_week, Some(Weekday::Sun));
    }

    #[test]
    fn day_of_week_follows_date() {
        let tuesday = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(day_of_week(tuesday), Some(Weekday::Tue));
        assert_eq!(day_of_week(None), None);
    }

    #[test]
    fn coerce_numeric_degrades_bad_cells_to_missing() {
        assert_eq!(coerce_numeric(Some("42")), Some(42.0));
        assert_eq!(coerce_numeric(Some(" 3.5 ")), Some(3.5));
        assert_eq!(coerce_numeric(Some("0")), Some(0.0));
        assert_eq!(coerce_numeric(Some("")), None);
        assert_eq!(coerce_numeric(Some("n/a")), None);
        assert_eq!(coerce_numeric(Some("12 calls")), None);
        assert_eq!(coerce_numeric(Some("NaN")), None);
        assert_eq!(coerce_numeric(Some("inf")), None);
        assert_eq!(coerce_numeric(Some("-4")), None);
        assert_eq!(coerce_numeric(None), None);
    }

    #[test]
    fn connection_rate_requires_nonzero_dials() {
        let record = derive_record(0, &row("100", "20", "5"));
        assert_eq!(record.connection_rate, Some(0.2));

        let zero_conversations = derive_record(0, &row("50", "0", "0"));
        assert_eq!(zero_conversations.connection_rate, Some(0.0));

        let zero_dials = derive_record(0, &row("0", "3", "0"));
        assert_eq!(zero_dials.connection_rate, None);

        let missing_dials = derive_record(0, &row("", "3", "0"));
        assert_eq!(missing_dials.connection_rate, None);
    }

    #[test]
    fn offers_per_conversation_guards_zero_and_missing() {
        assert_eq!(
            derive_record(0, &row("100", "20", "5")).offers_per_conversation,
            Some(0.25)
        );
        assert_eq!(
            derive_record(0, &row("50", "0", "0")).offers_per_conversation,
            None
        );
        assert_eq!(
            derive_record(0, &row("50", "", "2")).offers_per_conversation,
            None
        );
        assert_eq!(
            derive_record(0, &RawCallRow::new().with("Offer Made", "2")).offers_per_conversation,
            None
        );
        assert_eq!(
            derive_record(0, &row("50", "4", "")).offers_per_conversation,
            None
        );
    }

    #[test]
    fn derive_records_preserves_count_and_order() {
        let rows = vec![
            row("10", "2", "1").with("Date", "2024-03-04"),
            row("junk", "junk", "junk").with("Date", "junk"),
            RawCallRow::new(),
            row("30", "6", "0").with("Date", "2024-03-06"),
        ];

        let records = derive_records(rows);

        assert_eq!(records.len(), 4);
        assert_eq!(
            records.iter().map(|record| record.row).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(records[0].total_dials, Some(10.0));
        assert_eq!(records[1].missing_counters(), CallMetric::ordered().len());
        assert_eq!(records[1].day_of_week, None);
        assert_eq!(records[3].day_of_week, Some(Weekday::Wed));
    }
}
