// Date range resolution for leaderboard periods
// Works on whole calendar days only; the host's local day is "today"

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Wire format for every date this service emits or accepts
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ASCII digits only; `\d` would also accept other Unicode digits
static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern is a valid regex")
});

/// Coarse leaderboard window selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// Days before today included in the window
    fn lookback_days(&self) -> i64 {
        match self {
            Period::Today => 0,
            Period::Week => 6,
            Period::Month => 30,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized period token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid period. Use 'today', 'week', or 'month'")]
pub struct InvalidPeriod(pub String);

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Period::Today),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(InvalidPeriod(other.to_string())),
        }
    }
}

/// Inclusive calendar window; `start_at <= end_at` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start_at: NaiveDate,
    pub end_at: NaiveDate,
    pub period: Period,
}

impl DateRange {
    pub fn start_at_string(&self) -> String {
        self.start_at.format(DATE_FORMAT).to_string()
    }

    pub fn end_at_string(&self) -> String {
        self.end_at.format(DATE_FORMAT).to_string()
    }
}

/// Compute the window for `period` ending on `today`
pub fn resolve(period: Period, today: NaiveDate) -> DateRange {
    DateRange {
        start_at: today - Duration::days(period.lookback_days()),
        end_at: today,
        period,
    }
}

/// Parse a raw token and compute its window; unknown tokens never fall back
pub fn resolve_token(token: &str, today: NaiveDate) -> Result<DateRange, InvalidPeriod> {
    let period = token.parse::<Period>()?;
    Ok(resolve(period, today))
}

/// The host process's current calendar day, time-of-day discarded
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Literal `YYYY-MM-DD` shape check (no calendar validation)
pub fn is_iso_date(value: &str) -> bool {
    ISO_DATE.is_match(value)
}
