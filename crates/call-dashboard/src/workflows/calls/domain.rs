use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Numeric counter columns of a daily call log, in export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallMetric {
    TotalDials,
    Conversations,
    Leads,
    OfferMade,
    TotalCorrectNumbers,
    DeadNumber,
    CorrectInitialCall,
    CorrectFollowUp1,
    CorrectFollowUp2,
    CorrectFollowUp3,
    NotInterested,
    WrongNumber,
}

impl CallMetric {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::TotalDials,
            Self::Conversations,
            Self::Leads,
            Self::OfferMade,
            Self::TotalCorrectNumbers,
            Self::DeadNumber,
            Self::CorrectInitialCall,
            Self::CorrectFollowUp1,
            Self::CorrectFollowUp2,
            Self::CorrectFollowUp3,
            Self::NotInterested,
            Self::WrongNumber,
        ]
    }

    /// Column header as it appears in the CSV export.
    pub const fn header(self) -> &'static str {
        match self {
            Self::TotalDials => "Total Dials",
            Self::Conversations => "Conversations",
            Self::Leads => "Leads",
            Self::OfferMade => "Offer Made",
            Self::TotalCorrectNumbers => "Total Correct Numbers",
            Self::DeadNumber => "Dead Number",
            Self::CorrectInitialCall => "Correct Initial Call",
            Self::CorrectFollowUp1 => "Correct Follow Up 1",
            Self::CorrectFollowUp2 => "Correct Follow Up 2",
            Self::CorrectFollowUp3 => "Correct Follow Up 3",
            Self::NotInterested => "Not Interested",
            Self::WrongNumber => "Wrong Number",
        }
    }
}

pub const DATE_HEADER: &str = "Date";

/// One day of rep/list activity after type coercion and ratio derivation.
///
/// Every `Option` is the "missing" state: an absent column, a blank cell or a
/// value that did not parse. Missing is never the same thing as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CallRecord {
    /// Zero-based position in the source file.
    pub row: usize,
    pub date: Option<NaiveDate>,
    #[serde(serialize_with = "serialize_weekday")]
    pub day_of_week: Option<Weekday>,
    pub total_dials: Option<f64>,
    pub conversations: Option<f64>,
    pub leads: Option<f64>,
    pub offer_made: Option<f64>,
    pub total_correct_numbers: Option<f64>,
    pub dead_number: Option<f64>,
    pub correct_initial_call: Option<f64>,
    pub correct_follow_up_1: Option<f64>,
    pub correct_follow_up_2: Option<f64>,
    pub correct_follow_up_3: Option<f64>,
    pub not_interested: Option<f64>,
    pub wrong_number: Option<f64>,
    pub connection_rate: Option<f64>,
    pub offers_per_conversation: Option<f64>,
}

impl CallRecord {
    pub fn value(&self, metric: CallMetric) -> Option<f64> {
        match metric {
            CallMetric::TotalDials => self.total_dials,
            CallMetric::Conversations => self.conversations,
            CallMetric::Leads => self.leads,
            CallMetric::OfferMade => self.offer_made,
            CallMetric::TotalCorrectNumbers => self.total_correct_numbers,
            CallMetric::DeadNumber => self.dead_number,
            CallMetric::CorrectInitialCall => self.correct_initial_call,
            CallMetric::CorrectFollowUp1 => self.correct_follow_up_1,
            CallMetric::CorrectFollowUp2 => self.correct_follow_up_2,
            CallMetric::CorrectFollowUp3 => self.correct_follow_up_3,
            CallMetric::NotInterested => self.not_interested,
            CallMetric::WrongNumber => self.wrong_number,
        }
    }

    pub(crate) fn set_value(&mut self, metric: CallMetric, value: Option<f64>) {
        let slot = match metric {
            CallMetric::TotalDials => &mut self.total_dials,
            CallMetric::Conversations => &mut self.conversations,
            CallMetric::Leads => &mut self.leads,
            CallMetric::OfferMade => &mut self.offer_made,
            CallMetric::TotalCorrectNumbers => &mut self.total_correct_numbers,
            CallMetric::DeadNumber => &mut self.dead_number,
            CallMetric::CorrectInitialCall => &mut self.correct_initial_call,
            CallMetric::CorrectFollowUp1 => &mut self.correct_follow_up_1,
            CallMetric::CorrectFollowUp2 => &mut self.correct_follow_up_2,
            CallMetric::CorrectFollowUp3 => &mut self.correct_follow_up_3,
            CallMetric::NotInterested => &mut self.not_interested,
            CallMetric::WrongNumber => &mut self.wrong_number,
        };
        *slot = value;
    }

    pub fn missing_counters(&self) -> usize {
        CallMetric::ordered()
            .into_iter()
            .filter(|metric| self.value(*metric).is_none())
            .count()
    }
}

/// Calendar order used for stable weekday grouping.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub const fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S>(day: &Option<Weekday>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match day {
        Some(day) => serializer.serialize_some(weekday_label(*day)),
        None => serializer.serialize_none(),
    }
}
