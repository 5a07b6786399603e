//! Date and time window schemas.
//!
//! A window accepts a formatted string that falls strictly on one side of an
//! anchor and, for dates, within a span of it. Anchors are captured when the
//! schema is built so every validation of one schema agrees on "now".

use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Which side of the anchor a value must fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Before,
    After,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Before => "before",
            Direction::After => "after",
        }
    }
}

fn now_anchor() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

/// A date strictly between the anchor and `anchor ∓ span`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateWindow {
    pub direction: Direction,
    #[serde(default)]
    pub years: u32,
    #[serde(default)]
    pub months: u32,
    #[serde(default)]
    pub days: u32,
    /// chrono `strftime` format of accepted strings.
    #[serde(default = "default_date_format")]
    pub format: String,
    #[serde(default = "now_anchor")]
    pub anchor: NaiveDateTime,
}

impl DateWindow {
    pub fn before(years: u32, months: u32, days: u32) -> Self {
        Self::new(Direction::Before, years, months, days)
    }

    pub fn after(years: u32, months: u32, days: u32) -> Self {
        Self::new(Direction::After, years, months, days)
    }

    fn new(direction: Direction, years: u32, months: u32, days: u32) -> Self {
        Self {
            direction,
            years,
            months,
            days,
            format: default_date_format(),
            anchor: now_anchor(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn anchored_at(mut self, anchor: NaiveDateTime) -> Self {
        self.anchor = anchor;
        self
    }

    /// The far edge of the window, `None` when the span overflows the calendar.
    pub fn limit(&self) -> Option<NaiveDateTime> {
        let months = Months::new(self.years.checked_mul(12)?.checked_add(self.months)?);
        let days = Days::new(u64::from(self.days));
        match self.direction {
            Direction::Before => self.anchor.checked_sub_months(months)?.checked_sub_days(days),
            Direction::After => self.anchor.checked_add_months(months)?.checked_add_days(days),
        }
    }

    /// Parse with the window's format; date-only formats resolve to midnight.
    pub fn parse(&self, input: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(input, &self.format)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(input, &self.format)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        let Some(limit) = self.limit() else {
            return false;
        };
        match self.direction {
            Direction::Before => limit < instant && instant < self.anchor,
            Direction::After => self.anchor < instant && instant < limit,
        }
    }

    pub fn render(&self, instant: NaiveDateTime) -> String {
        instant.format(&self.format).to_string()
    }

    /// Compact span label, e.g. `1y0m15d`.
    pub fn span_label(&self) -> String {
        format!("{}y{}m{}d", self.years, self.months, self.days)
    }

    pub fn message(&self) -> String {
        format!(
            "Date must be {} current date and within {} years, {} months, and {} days",
            self.direction.as_str(),
            self.years,
            self.months,
            self.days
        )
    }
}

/// A time of day strictly before or after a fixed time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeWindow {
    pub direction: Direction,
    pub time: NaiveTime,
    #[serde(default = "default_time_format")]
    pub format: String,
}

impl TimeWindow {
    pub fn before(time: NaiveTime) -> Self {
        Self {
            direction: Direction::Before,
            time,
            format: default_time_format(),
        }
    }

    pub fn after(time: NaiveTime) -> Self {
        Self {
            direction: Direction::After,
            time,
            format: default_time_format(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn parse(&self, input: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(input, &self.format).ok()
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        match self.direction {
            Direction::Before => time < self.time,
            Direction::After => time > self.time,
        }
    }

    pub fn render(&self, time: NaiveTime) -> String {
        time.format(&self.format).to_string()
    }

    pub fn message(&self) -> String {
        format!(
            "Time must be {} {}",
            self.direction.as_str(),
            self.time.format(DEFAULT_TIME_FORMAT)
        )
    }
}
