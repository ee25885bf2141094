//! Shared event arguments for `add` and `update`.

use std::num::NonZeroU32;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveTime, Weekday};
use clap::Args;
use planner_core::date_range::parse_date;
use planner_core::{Event, Repeat};

#[derive(Args)]
pub struct AddArgs {
    pub title: String,

    /// Start date (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date)]
    pub start: NaiveDate,

    /// Start time (HH:MM); omit for an all-day event
    #[arg(long, value_parser = parse_time)]
    pub start_time: Option<NaiveTime>,

    /// End date (YYYY-MM-DD), defaults to the start date
    #[arg(short, long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// End time (HH:MM)
    #[arg(long, value_parser = parse_time, conflicts_with = "duration")]
    pub end_time: Option<NaiveTime>,

    /// Duration instead of an end time (e.g. "45m", "1h30m")
    #[arg(short, long)]
    pub duration: Option<String>,

    #[command(flatten)]
    pub details: DetailArgs,

    #[command(flatten)]
    pub recurrence: RecurrenceArgs,
}

/// Free-form fields shared by `add` and `update`.
#[derive(Args, Default)]
pub struct DetailArgs {
    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Color index
    #[arg(long)]
    pub color: Option<i32>,
}

#[derive(Args, Default)]
pub struct RecurrenceArgs {
    /// Repeat rule: none, daily, weekly, monthly or yearly
    #[arg(short, long)]
    pub repeat: Option<Repeat>,

    /// Repeat every N days/weeks/months/years
    #[arg(long)]
    pub every: Option<NonZeroU32>,

    /// Last date a repetition may start on (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub until: Option<NaiveDate>,

    /// Weekdays for weekly repetition (e.g. "mon,wed")
    #[arg(long, value_delimiter = ',')]
    pub days: Option<Vec<Weekday>>,
}

/// Field changes for `update`; unset fields keep their stored value.
#[derive(Args, Default)]
pub struct EventArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    #[arg(long, value_parser = parse_time)]
    pub start_time: Option<NaiveTime>,

    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    #[arg(long, value_parser = parse_time)]
    pub end_time: Option<NaiveTime>,

    /// Mark the event all-day (true) or timed (false)
    #[arg(long)]
    pub all_day: Option<bool>,

    #[command(flatten)]
    pub details: DetailArgs,

    #[command(flatten)]
    pub recurrence: RecurrenceArgs,
}

impl AddArgs {
    /// Build the event or recurrence template described by the arguments.
    pub fn into_event(self, default_color: i32) -> Result<Event> {
        let end_date = self.end.unwrap_or(self.start);

        let mut event = match self.start_time {
            None => Event::all_day(self.title, self.start, end_date),
            Some(start_time) => {
                let start = self.start.and_time(start_time);
                let end = match (self.end_time, self.duration.as_deref()) {
                    (Some(end_time), _) => end_date.and_time(end_time),
                    (None, Some(duration)) => start + parse_duration(duration)?,
                    (None, None) => end_date.and_time(start_time) + Duration::hours(1),
                };
                Event::new(self.title, start, end)
            }
        };

        event.color = default_color;
        self.details.apply(&mut event);
        self.recurrence.apply(&mut event)?;
        Ok(event)
    }
}

impl DetailArgs {
    fn apply(self, event: &mut Event) {
        if let Some(location) = self.location {
            event.location = if location.is_empty() { None } else { Some(location) };
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(color) = self.color {
            event.color = color;
        }
    }
}

impl RecurrenceArgs {
    fn apply(self, event: &mut Event) -> Result<()> {
        if let Some(repeat) = self.repeat {
            event.repeat = repeat;
        }
        if let Some(every) = self.every {
            event.repeat_difference = every;
        }
        if let Some(days) = self.days {
            event.repeat_days = days;
        }

        match self.until {
            Some(until) => event.repeat_end_date = until,
            None if self.repeat.is_some_and(|r| r != Repeat::None) && event.repeat_id.is_none() => {
                anyhow::bail!("--until is required for repeating events");
            }
            None => {}
        }

        Ok(())
    }
}

impl EventArgs {
    /// Apply the given changes on top of a stored event.
    pub fn apply(self, event: &mut Event) -> Result<()> {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(start) = self.start {
            event.start_date = start;
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end) = self.end {
            event.end_date = end;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }

        self.details.apply(event);
        self.recurrence.apply(event)
    }
}

/// Parse HH:MM
pub fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| format!("Invalid time format '{}'. Expected HH:MM", s))
}

fn parse_duration(input: &str) -> Result<Duration> {
    let std_dur = humantime::parse_duration(input)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    Duration::from_std(std_dur).context("Duration too large")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn add_args(title: &str, start: NaiveDate) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            start,
            start_time: None,
            end: None,
            end_time: None,
            duration: None,
            details: DetailArgs::default(),
            recurrence: RecurrenceArgs::default(),
        }
    }

    #[test]
    fn add_without_time_is_all_day() {
        let event = add_args("Exam", date(2024, 6, 3)).into_event(2).unwrap();

        assert!(event.all_day);
        assert_eq!(event.end_date, date(2024, 6, 3));
        assert_eq!(event.color, 2);
    }

    #[test]
    fn add_with_time_defaults_to_one_hour() {
        let mut args = add_args("Lecture", date(2024, 6, 3));
        args.start_time = Some(parse_time("09:15").unwrap());

        let event = args.into_event(0).unwrap();

        assert!(!event.all_day);
        assert_eq!(event.end_time, parse_time("10:15").unwrap());
    }

    #[test]
    fn add_with_duration() {
        let mut args = add_args("Lecture", date(2024, 6, 3));
        args.start_time = Some(parse_time("23:30").unwrap());
        args.duration = Some("1h".to_string());

        let event = args.into_event(0).unwrap();

        assert_eq!(event.end_date, date(2024, 6, 4));
        assert_eq!(event.end_time, parse_time("00:30").unwrap());
    }

    #[test]
    fn repeating_add_requires_until() {
        let mut args = add_args("Gym", date(2024, 1, 1));
        args.recurrence.repeat = Some(Repeat::Weekly);
        args.recurrence.days = Some(vec![Weekday::Mon]);

        assert!(args.into_event(0).is_err());
    }

    #[test]
    fn repeating_add_sets_rule() {
        let mut args = add_args("Gym", date(2024, 1, 1));
        args.recurrence.repeat = Some(Repeat::Weekly);
        args.recurrence.every = NonZeroU32::new(2);
        args.recurrence.until = Some(date(2024, 3, 1));
        args.recurrence.days = Some(vec![Weekday::Mon, Weekday::Wed]);

        let event = args.into_event(0).unwrap();

        assert_eq!(event.repeat, Repeat::Weekly);
        assert_eq!(event.repeat_difference.get(), 2);
        assert_eq!(event.repeat_days, vec![Weekday::Mon, Weekday::Wed]);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let mut event = add_args("Exam", date(2024, 6, 3)).into_event(0).unwrap();
        let changes = EventArgs {
            title: Some("Final exam".to_string()),
            details: DetailArgs {
                location: Some("Aula".to_string()),
                ..DetailArgs::default()
            },
            ..EventArgs::default()
        };

        changes.apply(&mut event).unwrap();

        assert_eq!(event.title, "Final exam");
        assert_eq!(event.location.as_deref(), Some("Aula"));
        assert_eq!(event.start_date, date(2024, 6, 3));
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert!(parse_time("9am").is_err());
    }
}
