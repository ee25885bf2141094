//! Terminal rendering for planner events.
//!
//! Extension trait adding colored output to planner-core types via owo_colors.

use chrono::{NaiveDate, Weekday};
use owo_colors::OwoColorize;
use planner_core::{Event, Repeat};

pub trait Render {
    /// One-line summary used by `planner list`.
    fn render(&self) -> String;

    /// Multi-line view used by `planner show`.
    fn render_details(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let id = self.id.map(|id| format!("#{}", id)).unwrap_or_default();
        let mut line = format!("{} {} {}", format_time(self), self.title, id.dimmed());

        if let Some(repeat_id) = self.repeat_id {
            line.push_str(&format!(" {}", format!("[{} · series {}]", self.repeat, repeat_id).cyan()));
        }
        if let Some(location) = &self.location {
            line.push_str(&format!(" {}", format!("@ {}", location).dimmed()));
        }

        line
    }

    fn render_details(&self) -> String {
        let mut lines = vec![self.title.bold().to_string()];

        if let Some(id) = self.id {
            lines.push(format!("  id:       {}", id));
        }

        let when = if self.all_day {
            if self.start_date == self.end_date {
                format!("{} (all-day)", self.start_date)
            } else {
                format!("{} – {} (all-day)", self.start_date, self.end_date)
            }
        } else {
            format!(
                "{} – {}",
                self.starts_at().format("%Y-%m-%d %H:%M"),
                self.ends_at().format("%Y-%m-%d %H:%M")
            )
        };
        lines.push(format!("  when:     {}", when));

        if let Some(location) = &self.location {
            lines.push(format!("  where:    {}", location));
        }
        if !self.description.is_empty() {
            lines.push(format!("  notes:    {}", self.description));
        }
        if let Some(subject) = &self.subject_name {
            lines.push(format!("  subject:  {}", subject));
        }
        lines.push(format!("  color:    {}", self.color));

        if self.repeat != Repeat::None {
            lines.push(format!("  repeats:  {}", describe_rule(self)));
        }
        if let Some(repeat_id) = self.repeat_id {
            lines.push(format!("  series:   {}", repeat_id));
        }

        lines.join("\n")
    }
}

/// Human-readable recurrence rule, e.g. "every 2 weeks on Mon, Wed until 2024-03-01".
fn describe_rule(event: &Event) -> String {
    let n = event.repeat_difference.get();
    let unit = match event.repeat {
        Repeat::Daily => "day",
        Repeat::Weekly => "week",
        Repeat::Monthly => "month",
        Repeat::Yearly => "year",
        Repeat::None => return "never".to_string(),
    };

    let mut rule = if n == 1 {
        format!("every {}", unit)
    } else {
        format!("every {} {}", n, pluralize(unit, n as usize))
    };

    if event.repeat == Repeat::Weekly {
        let days: Vec<String> = event.repeat_days.iter().map(weekday_label).collect();
        rule.push_str(&format!(" on {}", days.join(", ")));
    }

    rule.push_str(&format!(" until {}", event.repeat_end_date));
    rule
}

fn weekday_label(day: &Weekday) -> String {
    day.to_string()
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Wed Feb 25")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// Format the time portion of an event (e.g. "15:00" or "all-day")
fn format_time(event: &Event) -> String {
    if event.all_day {
        format!("{:>7}", "all-day")
    } else {
        format!("{:>7}", event.start_time.format("%H:%M"))
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_labels_are_relative_near_today() {
        let today = date(2024, 2, 20);
        assert_eq!(format_date_label(today, today), "Today");
        assert_eq!(format_date_label(date(2024, 2, 21), today), "Tomorrow");
        assert_eq!(format_date_label(date(2024, 2, 19), today), "Yesterday");
        assert_eq!(format_date_label(date(2024, 2, 25), today), "Sun Feb 25 2024");
    }

    #[test]
    fn describe_weekly_rule() {
        let event = Event::all_day("Gym", date(2024, 1, 1), date(2024, 1, 1))
            .repeating(Repeat::Weekly, NonZeroU32::new(2).unwrap(), date(2024, 3, 1))
            .on_days(&[Weekday::Mon, Weekday::Wed]);

        assert_eq!(
            describe_rule(&event),
            "every 2 weeks on Mon, Wed until 2024-03-01"
        );
    }

    #[test]
    fn describe_monthly_rule() {
        let event = Event::all_day("Rent", date(2024, 1, 1), date(2024, 1, 1)).repeating(
            Repeat::Monthly,
            NonZeroU32::MIN,
            date(2024, 12, 1),
        );

        assert_eq!(describe_rule(&event), "every month until 2024-12-01");
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize("occurrence", 1), "occurrence");
        assert_eq!(pluralize("occurrence", 3), "occurrences");
    }
}
