//! Time ranges used to filter expenses
//!
//! A [`TimeRange`] is the symbolic period a user asks for ("this week",
//! "this month", a custom pair of dates). Resolving it against the current
//! local instant yields a [`DateRange`]: a closed interval of local instants
//! with both ends inclusive.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;


/// A symbolic period, resolved relative to "now"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    /// Monday through Sunday
    Week,
    #[default]
    Month,
    Year,
    /// Whole days from `start` through `end`
    Custom { start: NaiveDate, end: NaiveDate },
}

impl TimeRange {
    /// Build a range from a user token such as `week` or `custom`
    ///
    /// Unrecognized tokens fall back to the current month. A `custom` token
    /// needs both bounds.
    pub fn from_token(
        token: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, RangeError> {
        match token.trim().to_lowercase().as_str() {
            "day" | "today" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "custom" => match (start, end) {
                (Some(start), Some(end)) => Ok(Self::Custom { start, end }),
                _ => Err(RangeError::MissingCustomBounds),
            },
            _ => Ok(Self::Month),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
            Self::Year => "This Year",
            Self::Custom { .. } => "Custom Range",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Day => write!(f, "day"),
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
            Self::Custom { start, end } => write!(f, "{}..{}", start, end),
        }
    }
}

/// Errors building a [`TimeRange`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    MissingCustomBounds,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCustomBounds => {
                write!(f, "A custom range needs both a start and an end date")
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// A closed interval of local instants; `start <= end` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Resolve a symbolic range against the current local instant
    pub fn resolve(range: &TimeRange, now: NaiveDateTime) -> Self {
        let today = now.date();
        match range {
            TimeRange::Day => Self::for_day(today),
            TimeRange::Week => Self::for_week(today),
            TimeRange::Month => Self::for_month(today),
            TimeRange::Year => Self::for_year(today.year()),
            TimeRange::Custom { start, end } => Self::between(*start, *end),
        }
    }

    /// Whole days from `first` through `last`, in either order
    pub fn between(first: NaiveDate, last: NaiveDate) -> Self {
        let (first, last) = if first <= last {
            (first, last)
        } else {
            (last, first)
        };
        Self {
            start: start_of_day(first),
            end: end_of_day(last),
        }
    }

    pub fn for_day(date: NaiveDate) -> Self {
        Self::between(date, date)
    }

    /// The Monday-to-Sunday week containing `date`
    pub fn for_week(date: NaiveDate) -> Self {
        let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
        Self::between(monday, monday + Duration::days(6))
    }

    /// The calendar month containing `date`
    pub fn for_month(date: NaiveDate) -> Self {
        Self::between(month_start(date), month_end(date))
    }

    pub fn for_year(year: i32) -> Self {
        match (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        ) {
            (Some(first), Some(last)) => Self::between(first, last),
            _ => Self::for_day(NaiveDate::MIN),
        }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Inclusive on both ends
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Whether local midnight of `date` falls inside the range
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.contains(start_of_day(date))
    }

    /// Every calendar day touched by the range, in order
    pub fn days(&self) -> Vec<NaiveDate> {
        let last = self.end_date();
        self.start_date()
            .iter_days()
            .take_while(|day| *day <= last)
            .collect()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start_date(), self.end_date())
    }
}

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last millisecond of `date`
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// First day of the month `offset` months away from the month containing `date`
pub fn shift_months(date: NaiveDate, offset: i32) -> NaiveDate {
    let first = month_start(date);
    let months = Months::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}
