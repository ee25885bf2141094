//! Structural checks run before an event is stored or expanded.
//!
//! Checks run in a fixed order and the first failure wins:
//! title, date order, series id (series scope only), weekly days,
//! then combined date and time order.

use crate::error::ValidationError;
use crate::event::{Event, Repeat};

/// Validate a single event or template (create, update this, update this and future).
pub fn validate(event: &Event) -> Result<(), ValidationError> {
    check(event, false)
}

/// Validate an event that must identify an existing series (update all).
pub fn validate_series(event: &Event) -> Result<(), ValidationError> {
    check(event, true)
}

fn check(event: &Event, require_series_id: bool) -> Result<(), ValidationError> {
    if event.title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    // Dates only; a same-day event with inverted times passes here
    if event.start_date > event.end_date {
        return Err(ValidationError::DateOrderInvalid);
    }

    if require_series_id && !event.repeat_id.is_some_and(|id| id > 0) {
        return Err(ValidationError::MissingOrInvalidRepeatId);
    }

    if event.repeat == Repeat::Weekly && event.repeat_days.is_empty() {
        return Err(ValidationError::WeeklyRepeatDaysRequired);
    }

    if !event.is_valid_event() {
        return Err(ValidationError::DateTimeInvalid);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, Weekday};
    use std::num::NonZeroU32;

    fn dt(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn lecture() -> Event {
        Event::new("Lecture", dt(2024, 3, 4, 9), dt(2024, 3, 4, 10))
    }

    #[test]
    fn valid_event_passes() {
        assert_eq!(validate(&lecture()), Ok(()));
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut event = lecture();
        event.title = "   ".to_string();
        assert_eq!(validate(&event), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn title_is_checked_first() {
        let mut event = lecture();
        event.title = String::new();
        event.end_date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(validate_series(&event), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn end_date_before_start_date_is_rejected() {
        let mut event = lecture();
        event.end_date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(validate(&event), Err(ValidationError::DateOrderInvalid));
    }

    #[test]
    fn date_order_check_wins_over_all_day() {
        let mut event = lecture();
        event.all_day = true;
        event.end_date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(validate(&event), Err(ValidationError::DateOrderInvalid));
    }

    #[test]
    fn same_day_inverted_times_fail_on_datetime_check() {
        let event = Event::new("Lecture", dt(2024, 3, 4, 11), dt(2024, 3, 4, 10));
        assert_eq!(validate(&event), Err(ValidationError::DateTimeInvalid));
    }

    #[test]
    fn all_day_event_ignores_inverted_times() {
        let mut event = Event::new("Exam", dt(2024, 3, 4, 11), dt(2024, 3, 4, 10));
        event.all_day = true;
        assert_eq!(validate(&event), Ok(()));
    }

    #[test]
    fn series_scope_requires_positive_repeat_id() {
        let mut event = lecture();
        assert_eq!(
            validate_series(&event),
            Err(ValidationError::MissingOrInvalidRepeatId)
        );

        event.repeat_id = Some(0);
        assert_eq!(
            validate_series(&event),
            Err(ValidationError::MissingOrInvalidRepeatId)
        );

        event.repeat_id = Some(4);
        assert_eq!(validate_series(&event), Ok(()));
    }

    #[test]
    fn standalone_scope_does_not_require_repeat_id() {
        let mut event = lecture();
        event.repeat_id = Some(-1);
        assert_eq!(validate(&event), Ok(()));
    }

    #[test]
    fn weekly_without_days_is_rejected() {
        let until = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let event = lecture().repeating(Repeat::Weekly, NonZeroU32::MIN, until);
        assert_eq!(
            validate(&event),
            Err(ValidationError::WeeklyRepeatDaysRequired)
        );

        let event = event.on_days(&[Weekday::Mon]);
        assert_eq!(validate(&event), Ok(()));
    }

    #[test]
    fn repeat_id_checked_before_weekly_days() {
        let until = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let event = lecture().repeating(Repeat::Weekly, NonZeroU32::MIN, until);
        assert_eq!(
            validate_series(&event),
            Err(ValidationError::MissingOrInvalidRepeatId)
        );
    }

    #[test]
    fn days_are_ignored_for_non_weekly_rules() {
        let until = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let event = lecture().repeating(Repeat::Daily, NonZeroU32::MIN, until);
        assert_eq!(validate(&event), Ok(()));
    }
}
