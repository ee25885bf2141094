//! Event store backed by a JSON file.
//!
//! Every event lives in `<data_dir>/events.json` together with the id
//! counters. Each write goes to `events.json.tmp` first and is renamed over
//! the real file, so a crash never leaves a half-written document behind.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use super::EventStore;
use super::state::{StoreDocument, StoreState};
use crate::date_range::DateRange;
use crate::error::{StoreError, StoreResult};
use crate::event::Event;

const EVENTS_FILE: &str = "events.json";

#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    /// Serializes load-modify-save cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        FileStore {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(EVENTS_FILE)
    }

    async fn load(&self) -> StoreResult<StoreState> {
        let path = self.path();

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(StoreState::default());
            }
            Err(e) => return Err(e.into()),
        };

        let document: StoreDocument = serde_json::from_str(&content).map_err(|e| {
            StoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        let state = StoreState::from_document(document);
        tracing::trace!(path = %path.display(), events = state.len(), "Loaded event store");
        Ok(state)
    }

    async fn save(&self, state: &StoreState) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let content = serde_json::to_string_pretty(&state.to_document())
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let path = self.path();
        let temp = self.dir.join(format!("{EVENTS_FILE}.tmp"));

        tokio::fs::write(&temp, content).await?;
        tokio::fs::rename(&temp, &path).await?;
        Ok(())
    }

    async fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> StoreResult<T> {
        let _guard = self.lock.lock().await;
        let state = self.load().await?;
        Ok(f(&state))
    }

    async fn modify<T>(&self, f: impl FnOnce(&mut StoreState) -> StoreResult<T>) -> StoreResult<T> {
        let _guard = self.lock.lock().await;
        let mut state = self.load().await?;
        let result = f(&mut state)?;
        self.save(&state).await?;
        Ok(result)
    }
}

#[async_trait]
impl EventStore for FileStore {
    async fn insert(&self, event: Event) -> StoreResult<i64> {
        self.modify(|state| Ok(state.insert(event))).await
    }

    async fn insert_many(&self, events: Vec<Event>) -> StoreResult<()> {
        self.modify(|state| {
            for event in events {
                state.insert(event);
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Event>> {
        self.read(|state| state.get(id).cloned()).await
    }

    async fn find_by_series_id(&self, repeat_id: i64) -> StoreResult<Vec<Event>> {
        self.read(|state| state.series(repeat_id).cloned().collect())
            .await
    }

    async fn find_one_by_series_id(&self, repeat_id: i64) -> StoreResult<Option<Event>> {
        self.read(|state| state.first_of_series(repeat_id).cloned())
            .await
    }

    async fn find_in_range(&self, range: DateRange) -> StoreResult<Vec<Event>> {
        self.read(|state| state.in_range(range)).await
    }

    async fn update(&self, event: Event) -> StoreResult<()> {
        self.modify(|state| state.update(event)).await
    }

    async fn delete(&self, event: &Event) -> StoreResult<()> {
        self.modify(|state| {
            state.delete(event);
            Ok(())
        })
        .await
    }

    async fn delete_by_series_id(&self, repeat_id: i64) -> StoreResult<()> {
        self.modify(|state| {
            state.delete_series(repeat_id, None);
            Ok(())
        })
        .await
    }

    async fn delete_by_series_id_from_date(&self, repeat_id: i64, from: NaiveDate) -> StoreResult<()> {
        self.modify(|state| {
            state.delete_series(repeat_id, Some(from));
            Ok(())
        })
        .await
    }

    async fn next_series_id(&self) -> StoreResult<i64> {
        self.modify(|state| Ok(state.next_series_id())).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path());

        assert!(store.find_in_range(DateRange::all()).await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn events_survive_reopen() {
        let dir = TempDir::new().unwrap();

        let id = {
            let store = FileStore::open(dir.path());
            store.next_series_id().await.unwrap();
            store
                .insert(Event::all_day("Exam", date(2024, 6, 3), date(2024, 6, 3)))
                .await
                .unwrap()
        };

        let store = FileStore::open(dir.path());
        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.title, "Exam");
        assert!(found.all_day);
        assert_eq!(store.next_series_id().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn writes_leave_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("nested"));

        store
            .insert(Event::all_day("Exam", date(2024, 6, 3), date(2024, 6, 3)))
            .await
            .unwrap();

        assert!(store.path().exists());
        assert!(!store.dir().join("events.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(EVENTS_FILE), "not json").unwrap();
        let store = FileStore::open(dir.path());

        let result = store.find_by_id(1).await;
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[tokio::test]
    async fn failed_update_does_not_write() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path());

        let result = store
            .update(Event::all_day("Exam", date(2024, 6, 3), date(2024, 6, 3)))
            .await;

        assert!(matches!(result, Err(StoreError::MissingId)));
        assert!(!store.path().exists());
    }
}
