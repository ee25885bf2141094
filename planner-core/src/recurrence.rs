//! Recurrence expansion.
//!
//! Expands a template into the concrete occurrences covering
//! `start_date..=repeat_end_date`. Expansion is pure: no I/O, no ids assigned.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::event::{Event, Repeat};

/// Expand a recurring template into its occurrences, ordered by start date.
///
/// - Every occurrence keeps the template's `repeat_id` and has `id = None`.
/// - A `repeat_end_date` before `start_date` yields an empty series.
/// - `Repeat::None` yields nothing; single events are stored without expansion.
pub fn expand(template: &Event) -> Vec<Event> {
    match template.repeat {
        Repeat::Weekly => expand_weekly(template),
        Repeat::Daily | Repeat::Monthly | Repeat::Yearly => expand_stepped(template),
        Repeat::None => Vec::new(),
    }
}

/// Walk the cursor one day at a time, emitting on selected weekdays.
///
/// Landing on a Monday skips `repeat_difference - 1` further weeks, so every
/// day of an included week is visited in order.
fn expand_weekly(template: &Event) -> Vec<Event> {
    let skip_days = u64::from(template.repeat_difference.get() - 1) * 7;
    let mut occurrences = Vec::new();

    let mut start = template.start_date;
    let mut end = template.end_date;

    while start <= template.repeat_end_date {
        if template.repeat_days.contains(&start.weekday()) {
            occurrences.push(template.occurrence(start, end));
        }

        let Some((next_start, next_end)) = shift_days(start, end, 1) else {
            break;
        };
        (start, end) = (next_start, next_end);

        if start.weekday() == Weekday::Mon && skip_days > 0 {
            let Some((next_start, next_end)) = shift_days(start, end, skip_days) else {
                break;
            };
            (start, end) = (next_start, next_end);
        }
    }

    occurrences
}

/// Emit one occurrence per step of `repeat_difference` days, months or years.
///
/// Occurrence k starts on `start_date + k * repeat_difference` units, the
/// series coverage guarantee, rather than on a cursor advanced one step at a
/// time. The two differ only after a month-end clamp: a Jan 31 monthly series
/// yields Feb 29 and then Mar 31, where a running cursor would stay on the 29th.
fn expand_stepped(template: &Event) -> Vec<Event> {
    let step = template.repeat_difference.get();
    let mut occurrences = Vec::new();

    for k in 0u32.. {
        let Some(units) = k.checked_mul(step) else {
            break;
        };
        let Some(start) = advance(template.start_date, template.repeat, units) else {
            break;
        };
        if start > template.repeat_end_date {
            break;
        }
        let Some(end) = advance(template.end_date, template.repeat, units) else {
            break;
        };

        occurrences.push(template.occurrence(start, end));
    }

    occurrences
}

fn advance(date: NaiveDate, repeat: Repeat, units: u32) -> Option<NaiveDate> {
    match repeat {
        Repeat::Daily => date.checked_add_days(Days::new(u64::from(units))),
        Repeat::Monthly => date.checked_add_months(Months::new(units)),
        Repeat::Yearly => date.checked_add_months(Months::new(units.checked_mul(12)?)),
        Repeat::Weekly | Repeat::None => None,
    }
}

fn shift_days(start: NaiveDate, end: NaiveDate, days: u64) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        start.checked_add_days(Days::new(days))?,
        end.checked_add_days(Days::new(days))?,
    ))
}
