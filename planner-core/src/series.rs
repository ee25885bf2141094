//! Scoped creation, update and deletion of events and recurring series.
//!
//! Every operation validates before touching the store, so a rejected event
//! never causes a partial write. Edits to the same series are not
//! coordinated here; callers serialize them if needed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};
use crate::event::Event;
use crate::recurrence::expand;
use crate::store::EventStore;
use crate::validate::{validate, validate_series};

/// How much of a series an edit or deletion applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditScope {
    /// Only the given occurrence
    This,
    /// The given occurrence and every later one
    ThisAndFuture,
    /// Every occurrence of the series
    All,
}

impl fmt::Display for EditScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EditScope::This => write!(f, "this"),
            EditScope::ThisAndFuture => write!(f, "future"),
            EditScope::All => write!(f, "all"),
        }
    }
}

impl FromStr for EditScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "this" => Ok(EditScope::This),
            "future" | "this-and-future" => Ok(EditScope::ThisAndFuture),
            "all" => Ok(EditScope::All),
            other => Err(format!(
                "Unknown scope '{}'. Expected this, future or all",
                other
            )),
        }
    }
}

/// Result of [`SeriesEditor::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Created {
    /// A single stored event
    Single(i64),
    /// A generated series; may hold zero occurrences
    Series { repeat_id: i64, occurrences: usize },
}

/// Start and end date of the earliest stored member of a series.
///
/// Recovered before an all-scope edit deletes the series, so regeneration
/// starts where the series originally started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesAnchor {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SeriesAnchor {
    pub fn of(event: &Event) -> Self {
        SeriesAnchor {
            start_date: event.start_date,
            end_date: event.end_date,
        }
    }

    /// Move the template back onto the anchor dates.
    pub fn apply(&self, mut template: Event) -> Event {
        template.start_date = self.start_date;
        template.end_date = self.end_date;
        template
    }
}

/// Applies create/update/delete operations to a store, scoped per [`EditScope`].
pub struct SeriesEditor<S> {
    store: S,
}

impl<S: EventStore> SeriesEditor<S> {
    pub fn new(store: S) -> Self {
        SeriesEditor { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store a new event, expanding it into a fresh series if it repeats.
    pub async fn create(&self, mut event: Event) -> PlannerResult<Created> {
        validate(&event)?;
        event.id = None;

        if !event.is_repeating() {
            event.repeat_id = None;
            let id = self.store.insert(event).await?;
            tracing::info!(id, "Created event");
            return Ok(Created::Single(id));
        }

        let repeat_id = self.store.next_series_id().await?;
        event.repeat_id = Some(repeat_id);

        let occurrences = expand(&event);
        let count = occurrences.len();
        tracing::debug!(repeat_id, occurrences = count, repeat = %event.repeat, "Expanded new series");

        self.store.insert_many(occurrences).await?;
        tracing::info!(repeat_id, occurrences = count, "Created series");

        Ok(Created::Series {
            repeat_id,
            occurrences: count,
        })
    }

    /// Update a single occurrence in place, leaving its siblings alone.
    pub async fn update_this(&self, event: Event) -> PlannerResult<()> {
        validate(&event)?;
        let id = event.id;
        self.store.update(event).await?;
        tracing::info!(?id, "Updated event");
        Ok(())
    }

    /// Replace this occurrence and every later one with a re-expansion of `event`.
    ///
    /// Occurrences before `event.start_date` keep their stored values. A
    /// non-repeating event is simply updated.
    pub async fn update_this_and_future(&self, mut event: Event) -> PlannerResult<()> {
        validate(&event)?;

        if !event.is_repeating() {
            return self.update_this(event).await;
        }

        let repeat_id = self.require_series(event.repeat_id).await?.0;

        event.id = None;
        let from = event.start_date;

        self.store
            .delete_by_series_id_from_date(repeat_id, from)
            .await?;

        let occurrences = expand(&event);
        let count = occurrences.len();
        tracing::debug!(repeat_id, %from, occurrences = count, "Regenerating series tail");

        self.store.insert_many(occurrences).await?;
        tracing::info!(repeat_id, %from, occurrences = count, "Updated this and future occurrences");
        Ok(())
    }

    /// Regenerate the whole series from the edited template.
    ///
    /// The edited fields apply to every occurrence, but the series keeps its
    /// original start: the template is re-anchored on the earliest stored member.
    pub async fn update_all(&self, event: Event) -> PlannerResult<()> {
        validate_series(&event)?;

        let (repeat_id, anchor) = self.require_series(event.repeat_id).await?;

        self.store.delete_by_series_id(repeat_id).await?;

        let occurrences = regenerate(event, anchor);
        let count = occurrences.len();
        tracing::debug!(repeat_id, anchor = %anchor.start_date, occurrences = count, "Regenerating series");

        self.store.insert_many(occurrences).await?;
        tracing::info!(repeat_id, occurrences = count, "Updated all occurrences");
        Ok(())
    }

    /// Delete only the given occurrence.
    pub async fn delete_this(&self, event: &Event) -> PlannerResult<()> {
        self.store.delete(event).await?;
        tracing::info!(id = ?event.id, "Deleted event");
        Ok(())
    }

    /// Delete the given occurrence and every later one in its series.
    pub async fn delete_this_and_future(&self, event: &Event) -> PlannerResult<()> {
        let Some(repeat_id) = event.repeat_id else {
            return self.delete_this(event).await;
        };

        self.store
            .delete_by_series_id_from_date(repeat_id, event.start_date)
            .await?;
        tracing::info!(repeat_id, from = %event.start_date, "Deleted this and future occurrences");
        Ok(())
    }

    /// Delete every occurrence of the event's series.
    pub async fn delete_all(&self, event: &Event) -> PlannerResult<()> {
        let Some(repeat_id) = event.repeat_id else {
            return self.delete_this(event).await;
        };

        self.store.delete_by_series_id(repeat_id).await?;
        tracing::info!(repeat_id, "Deleted all occurrences");
        Ok(())
    }

    pub async fn update(&self, event: Event, scope: EditScope) -> PlannerResult<()> {
        match scope {
            EditScope::This => self.update_this(event).await,
            EditScope::ThisAndFuture => self.update_this_and_future(event).await,
            EditScope::All => self.update_all(event).await,
        }
    }

    pub async fn delete(&self, event: &Event, scope: EditScope) -> PlannerResult<()> {
        match scope {
            EditScope::This => self.delete_this(event).await,
            EditScope::ThisAndFuture => self.delete_this_and_future(event).await,
            EditScope::All => self.delete_all(event).await,
        }
    }

    /// Look up a stored member of the series; fails before any write if none exists.
    async fn require_series(&self, repeat_id: Option<i64>) -> PlannerResult<(i64, SeriesAnchor)> {
        let Some(id) = repeat_id else {
            return Err(PlannerError::SeriesNotFound(None));
        };

        match self.store.find_one_by_series_id(id).await? {
            Some(member) => Ok((id, SeriesAnchor::of(&member))),
            None => Err(PlannerError::SeriesNotFound(Some(id))),
        }
    }
}

/// Expand an edited template re-anchored on the series' original dates.
pub fn regenerate(template: Event, anchor: SeriesAnchor) -> Vec<Event> {
    let mut template = anchor.apply(template);
    template.id = None;
    expand(&template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Repeat;
    use crate::store::MemoryStore;
    use chrono::NaiveDateTime;
    use std::num::NonZeroU32;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(d: NaiveDate, h: u32) -> NaiveDateTime {
        d.and_hms_opt(h, 0, 0).unwrap()
    }

    fn daily(start: NaiveDate, until: NaiveDate) -> Event {
        Event::new("Revision", at(start, 9), at(start, 10)).repeating(
            Repeat::Daily,
            NonZeroU32::MIN,
            until,
        )
    }

    #[test]
    fn scope_parses_cli_names() {
        assert_eq!("this".parse::<EditScope>().unwrap(), EditScope::This);
        assert_eq!("future".parse::<EditScope>().unwrap(), EditScope::ThisAndFuture);
        assert_eq!("all".parse::<EditScope>().unwrap(), EditScope::All);
        assert!("some".parse::<EditScope>().is_err());
    }

    #[test]
    fn regenerate_uses_anchor_dates() {
        let mut edited = daily(date(2024, 1, 5), date(2024, 1, 7));
        edited.repeat_id = Some(1);
        edited.id = Some(33);
        let anchor = SeriesAnchor {
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 1),
        };

        let result = regenerate(edited, anchor);

        assert_eq!(result.len(), 7);
        assert_eq!(result[0].start_date, date(2024, 1, 1));
        assert!(result.iter().all(|e| e.id.is_none()));
    }

    #[tokio::test]
    async fn create_single_event_clears_repeat_id() {
        let editor = SeriesEditor::new(MemoryStore::new());
        let mut event = Event::new("Lecture", at(date(2024, 1, 1), 9), at(date(2024, 1, 1), 10));
        event.repeat_id = Some(5);

        let created = editor.create(event).await.unwrap();

        let Created::Single(id) = created else {
            panic!("expected a single event, got {created:?}");
        };
        let stored = editor.store().find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.repeat_id, None);
    }

    #[tokio::test]
    async fn create_rejects_invalid_event_without_writing() {
        let editor = SeriesEditor::new(MemoryStore::new());
        let mut event = daily(date(2024, 1, 1), date(2024, 1, 10));
        event.title = String::new();

        let result = editor.create(event).await;

        assert!(matches!(
            result,
            Err(PlannerError::Validation(crate::error::ValidationError::EmptyTitle))
        ));
        assert!(editor.store().all().await.is_empty());
    }

    #[tokio::test]
    async fn update_this_and_future_without_series_fails() {
        let editor = SeriesEditor::new(MemoryStore::new());
        let mut event = daily(date(2024, 1, 1), date(2024, 1, 10));
        event.repeat_id = Some(42);

        let result = editor.update_this_and_future(event).await;

        assert!(matches!(result, Err(PlannerError::SeriesNotFound(Some(42)))));
        assert!(editor.store().all().await.is_empty());
    }

    #[tokio::test]
    async fn delete_future_of_single_event_deletes_it() {
        let editor = SeriesEditor::new(MemoryStore::new());
        let event = Event::new("Lecture", at(date(2024, 1, 1), 9), at(date(2024, 1, 1), 10));
        let Created::Single(id) = editor.create(event).await.unwrap() else {
            panic!("expected a single event");
        };
        let stored = editor.store().find_by_id(id).await.unwrap().unwrap();

        editor
            .delete(&stored, EditScope::ThisAndFuture)
            .await
            .unwrap();

        assert!(editor.store().find_by_id(id).await.unwrap().is_none());
    }
}
