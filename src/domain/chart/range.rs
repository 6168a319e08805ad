use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::ValidationError;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{TimeSeriesPoint, Timestamp};
use crate::time_utils::{calendar_date, local_midnight_millis};

const COMPONENT: LogComponent = LogComponent::Domain("RangeResolver");

/// Value Object - named period of the period selector
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    StrumDisplay,
    EnumIter,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
pub enum Period {
    #[strum(serialize = "1M")]
    #[serde(rename = "1M")]
    OneMonth,
    #[strum(serialize = "3M")]
    #[serde(rename = "3M")]
    ThreeMonths,
    #[strum(serialize = "6M")]
    #[serde(rename = "6M")]
    SixMonths,
    #[default]
    #[strum(serialize = "1Y")]
    #[serde(rename = "1Y")]
    OneYear,
    #[strum(serialize = "YTD")]
    #[serde(rename = "YTD")]
    YearToDate,
    #[strum(serialize = "MAX")]
    #[serde(rename = "MAX")]
    Max,
    #[strum(serialize = "CUSTOM")]
    #[serde(rename = "CUSTOM")]
    Custom,
}

impl Period {
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        token.parse().map_err(|_| ValidationError::UnknownPeriod(token.to_string()))
    }

    /// Radio button label
    pub fn label(&self) -> &'static str {
        match self {
            Period::Custom => "Custom",
            other => other.token(),
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
            Period::YearToDate => "YTD",
            Period::Max => "MAX",
            Period::Custom => "CUSTOM",
        }
    }

    fn months_back(&self) -> Option<u32> {
        match self {
            Period::OneMonth => Some(1),
            Period::ThreeMonths => Some(3),
            Period::SixMonths => Some(6),
            Period::OneYear => Some(12),
            _ => None,
        }
    }
}

/// What the user asked to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeriodSelection {
    Named(Period),
    /// Bounds are optional until the user has picked both
    Custom { start: Option<NaiveDate>, end: Option<NaiveDate> },
}

impl Default for PeriodSelection {
    fn default() -> Self {
        PeriodSelection::Named(Period::default())
    }
}

/// Inclusive time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DateRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, timestamp: Timestamp) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Concrete window for `selection` over ascending `timestamps`.
///
/// `end` is the newest available timestamp, never "now". Named periods step back
/// whole calendar months from the local date of `end`; a day that does not exist in
/// the target month is clamped to that month's last day (March 31 minus one month is
/// February 28/29). A custom selection missing either bound, or `Period::Custom`
/// passed as a named period, covers everything. `None` when there is no data.
pub fn resolve_range(selection: &PeriodSelection, timestamps: &[Timestamp]) -> Option<DateRange> {
    let first = *timestamps.first()?;
    let last = *timestamps.last()?;
    let full = DateRange::new(first, last);

    let range = match selection {
        PeriodSelection::Custom { start: Some(start), end: Some(end) } => DateRange::new(
            Timestamp::from_millis(local_midnight_millis(*start)),
            Timestamp::from_millis(local_midnight_millis(*end)),
        ),
        PeriodSelection::Custom { .. } => full,
        PeriodSelection::Named(Period::Max | Period::Custom) => full,
        PeriodSelection::Named(Period::YearToDate) => match calendar_date(last.value())
            .and_then(|end| NaiveDate::from_ymd_opt(end.year(), 1, 1))
        {
            Some(jan_first) => DateRange::new(Timestamp::from_millis(local_midnight_millis(jan_first)), last),
            None => full,
        },
        PeriodSelection::Named(period) => {
            let start = period.months_back().and_then(|months| {
                calendar_date(last.value())?.checked_sub_months(Months::new(months))
            });
            match start {
                Some(start) => DateRange::new(Timestamp::from_millis(local_midnight_millis(start)), last),
                None => full,
            }
        }
    };

    crate::log_debug!(
        COMPONENT,
        "{:?} resolved to [{}, {}]",
        selection,
        range.start,
        range.end
    );
    Some(range)
}

/// Points inside `range` in their original order. `None` keeps everything.
pub fn filter_by_range<P: TimeSeriesPoint + Clone>(points: &[P], range: Option<DateRange>) -> Vec<P> {
    match range {
        Some(range) => points.iter().filter(|p| range.contains(p.timestamp())).cloned().collect(),
        None => points.to_vec(),
    }
}
