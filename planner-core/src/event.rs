//! Calendar event types.
//!
//! An [`Event`] is one concrete, datable occurrence. When `repeat` is not
//! [`Repeat::None`] the same struct doubles as a recurrence template: it is
//! expanded into occurrences sharing one `repeat_id` and never stored itself.

use std::fmt;
use std::num::NonZeroU32;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A planner calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Row id, `None` until the store assigns one on insert
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Index into the client's color palette
    #[serde(default)]
    pub color: i32,
    pub location: Option<String>,

    // Timing
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    /// Time fields are kept but not checked when set
    #[serde(default)]
    pub all_day: bool,

    // Recurrence
    #[serde(default)]
    pub repeat: Repeat,
    /// Step multiplier: every N days/weeks/months/years
    #[serde(default = "default_repeat_difference")]
    pub repeat_difference: NonZeroU32,
    /// Inclusive bound for generated occurrences
    pub repeat_end_date: NaiveDate,
    /// Weekdays to emit on, only read for [`Repeat::Weekly`]
    #[serde(default)]
    pub repeat_days: Vec<Weekday>,
    /// Shared by every occurrence of one generated series
    pub repeat_id: Option<i64>,

    // Subject linkage, carried through untouched
    pub subject_id: Option<i64>,
    pub subject_name: Option<String>,
}

fn default_repeat_difference() -> NonZeroU32 {
    NonZeroU32::MIN
}

/// Recurrence rule of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Repeat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Repeat::None => "none",
            Repeat::Daily => "daily",
            Repeat::Weekly => "weekly",
            Repeat::Monthly => "monthly",
            Repeat::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Repeat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Repeat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Repeat::None),
            "daily" => Ok(Repeat::Daily),
            "weekly" => Ok(Repeat::Weekly),
            "monthly" => Ok(Repeat::Monthly),
            "yearly" => Ok(Repeat::Yearly),
            other => Err(format!(
                "Unknown repeat '{}'. Expected none, daily, weekly, monthly or yearly",
                other
            )),
        }
    }
}

impl Event {
    /// Create a non-repeating timed event.
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Event {
            id: None,
            title: title.into(),
            description: String::new(),
            color: 0,
            location: None,
            start_date: start.date(),
            start_time: start.time(),
            end_date: end.date(),
            end_time: end.time(),
            all_day: false,
            repeat: Repeat::None,
            repeat_difference: NonZeroU32::MIN,
            repeat_end_date: start.date(),
            repeat_days: Vec::new(),
            repeat_id: None,
            subject_id: None,
            subject_name: None,
        }
    }

    /// Create a non-repeating all-day event spanning `start..=end`.
    pub fn all_day(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        let midnight = NaiveTime::default();
        let mut event = Event::new(title, start.and_time(midnight), end.and_time(midnight));
        event.all_day = true;
        event
    }

    /// Turn this event into a recurrence template.
    pub fn repeating(mut self, repeat: Repeat, every: NonZeroU32, until: NaiveDate) -> Self {
        self.repeat = repeat;
        self.repeat_difference = every;
        self.repeat_end_date = until;
        self
    }

    /// Set the weekdays a weekly template emits on.
    pub fn on_days(mut self, days: &[Weekday]) -> Self {
        self.repeat_days = days.to_vec();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_color(mut self, color: i32) -> Self {
        self.color = color;
        self
    }

    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat != Repeat::None
    }

    /// Whether the combined date and time ordering holds.
    ///
    /// All-day events are always valid here; only their dates are checked.
    pub fn is_valid_event(&self) -> bool {
        !(self.starts_at() > self.ends_at() && !self.all_day)
    }

    /// A copy of this template placed on the given dates, ready for insertion.
    pub fn occurrence(&self, start_date: NaiveDate, end_date: NaiveDate) -> Event {
        Event {
            id: None,
            start_date,
            end_date,
            ..self.clone()
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
