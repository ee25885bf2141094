//! In-process event store.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::EventStore;
use super::state::StoreState;
use crate::date_range::DateRange;
use crate::error::StoreResult;
use crate::event::Event;

/// Event store held in memory, lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Every stored event, ordered by start.
    pub async fn all(&self) -> Vec<Event> {
        self.state.read().await.in_range(DateRange::all())
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn insert(&self, event: Event) -> StoreResult<i64> {
        Ok(self.state.write().await.insert(event))
    }

    async fn insert_many(&self, events: Vec<Event>) -> StoreResult<()> {
        let mut state = self.state.write().await;
        for event in events {
            state.insert(event);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        Ok(self.state.read().await.get(id).cloned())
    }

    async fn find_by_series_id(&self, repeat_id: i64) -> StoreResult<Vec<Event>> {
        Ok(self.state.read().await.series(repeat_id).cloned().collect())
    }

    async fn find_one_by_series_id(&self, repeat_id: i64) -> StoreResult<Option<Event>> {
        Ok(self.state.read().await.first_of_series(repeat_id).cloned())
    }

    async fn find_in_range(&self, range: DateRange) -> StoreResult<Vec<Event>> {
        Ok(self.state.read().await.in_range(range))
    }

    async fn update(&self, event: Event) -> StoreResult<()> {
        self.state.write().await.update(event)
    }

    async fn delete(&self, event: &Event) -> StoreResult<()> {
        self.state.write().await.delete(event);
        Ok(())
    }

    async fn delete_by_series_id(&self, repeat_id: i64) -> StoreResult<()> {
        self.state.write().await.delete_series(repeat_id, None);
        Ok(())
    }

    async fn delete_by_series_id_from_date(&self, repeat_id: i64, from: NaiveDate) -> StoreResult<()> {
        self.state.write().await.delete_series(repeat_id, Some(from));
        Ok(())
    }

    async fn next_series_id(&self) -> StoreResult<i64> {
        Ok(self.state.write().await.next_series_id())
    }
}
