//! Table of stored events shared by the store backends.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{chronological, earliest};
use crate::date_range::DateRange;
use crate::error::{StoreError, StoreResult};
use crate::event::Event;

/// All stored rows plus the id counters.
#[derive(Debug, Default, Clone)]
pub(crate) struct StoreState {
    next_id: i64,
    next_series_id: i64,
    events: BTreeMap<i64, Event>,
}

/// On-disk shape of [`StoreState`].
#[derive(Serialize, Deserialize)]
pub(crate) struct StoreDocument {
    next_id: i64,
    next_series_id: i64,
    events: Vec<Event>,
}

impl StoreState {
    pub fn insert(&mut self, mut event: Event) -> i64 {
        let id = match event.id {
            Some(id) => id,
            None => self.allocate_id(),
        };
        // Keep the counter ahead of explicit ids
        self.next_id = self.next_id.max(id);
        event.id = Some(id);
        self.events.insert(id, event);
        id
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn next_series_id(&mut self) -> i64 {
        self.next_series_id += 1;
        self.next_series_id
    }

    pub fn get(&self, id: i64) -> Option<&Event> {
        self.events.get(&id)
    }

    pub fn series(&self, repeat_id: i64) -> impl Iterator<Item = &Event> {
        self.events
            .values()
            .filter(move |e| e.repeat_id == Some(repeat_id))
    }

    pub fn first_of_series(&self, repeat_id: i64) -> Option<&Event> {
        earliest(self.series(repeat_id))
    }

    pub fn in_range(&self, range: DateRange) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events
            .values()
            .filter(|e| range.contains(e.start_date))
            .cloned()
            .collect();
        events.sort_by(chronological);
        events
    }

    pub fn update(&mut self, event: Event) -> StoreResult<()> {
        let id = event.id.ok_or(StoreError::MissingId)?;
        let slot = self.events.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = event;
        Ok(())
    }

    pub fn delete(&mut self, event: &Event) {
        if let Some(id) = event.id {
            self.events.remove(&id);
        }
    }

    /// Remove series members starting on or after `from` (all of them when `from` is None).
    pub fn delete_series(&mut self, repeat_id: i64, from: Option<NaiveDate>) {
        self.events.retain(|_, e| {
            let in_series = e.repeat_id == Some(repeat_id);
            let in_range = from.is_none_or(|from| e.start_date >= from);
            !(in_series && in_range)
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Rebuild state from disk; counters never trail the ids already stored.
    pub fn from_document(document: StoreDocument) -> Self {
        let events: BTreeMap<i64, Event> = document
            .events
            .into_iter()
            .filter_map(|e| e.id.map(|id| (id, e)))
            .collect();

        let max_id = events.keys().next_back().copied().unwrap_or(0);
        let max_series_id = events
            .values()
            .filter_map(|e| e.repeat_id)
            .max()
            .unwrap_or(0);

        StoreState {
            next_id: document.next_id.max(max_id),
            next_series_id: document.next_series_id.max(max_series_id),
            events,
        }
    }

    pub fn to_document(&self) -> StoreDocument {
        StoreDocument {
            next_id: self.next_id,
            next_series_id: self.next_series_id,
            events: self.events.values().cloned().collect(),
        }
    }
}
