//! Session History Storage
//!
//! Persists finished `MeasurementSession`s in a sled database so the
//! history screens and batch recomputation can read them back.
//!
//! Layout:
//! - default tree: `start_millis (u64 BE, sign-flipped) ++ id` -> JSON session
//! - `by_id` tree: `id` -> primary key
//!
//! The primary key sorts chronologically, so iterating the default tree
//! in reverse yields newest-first listings without sorting, and a start-time
//! window is a plain key range scan. Writes touching both trees run in one
//! sled transaction so the index never points at a missing entry.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDateTime;
use sled::transaction::{TransactionError, TransactionResult};
use sled::Transactional;
use thiserror::Error;
use tracing::{debug, warn};

use crate::types::MeasurementSession;

const ID_INDEX_TREE: &str = "by_id";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session has an empty id")]
    MissingId,

    #[error("Transaction aborted")]
    Aborted,
}

impl From<TransactionError<()>> for StorageError {
    fn from(err: TransactionError<()>) -> Self {
        match err {
            TransactionError::Abort(()) => StorageError::Aborted,
            TransactionError::Storage(e) => StorageError::Database(e),
        }
    }
}

/// Session store handle. Cheap to clone and safe to share between threads.
#[derive(Clone)]
pub struct SessionStore {
    db: Arc<sled::Db>,
    by_id: sled::Tree,
}

impl SessionStore {
    /// Open or create the store at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = sled::open(path)?;
        let by_id = db.open_tree(ID_INDEX_TREE)?;
        Ok(Self { db: Arc::new(db), by_id })
    }

    /// Insert or replace a session.
    ///
    /// A session saved again under the same id replaces the previous entry,
    /// even when its start time changed.
    pub fn save(&self, session: &MeasurementSession) -> Result<(), StorageError> {
        if session.id.is_empty() {
            return Err(StorageError::MissingId);
        }

        let key = primary_key(session);
        let value = serde_json::to_vec(session)?;

        let id = session.id.as_bytes();

        let result: TransactionResult<()> = (&**self.db, &self.by_id).transaction(|(main, idx)| {
            if let Some(old_key) = idx.insert(id, key.as_slice())? {
                if old_key.as_ref() != key.as_slice() {
                    main.remove(old_key)?;
                }
            }
            main.insert(key.as_slice(), value.as_slice())?;
            Ok(())
        });
        result?;
        self.db.flush()?;

        debug!(id = %session.id, readings = session.readings.len(), "Session saved");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<MeasurementSession>, StorageError> {
        let Some(key) = self.by_id.get(id.as_bytes())? else {
            return Ok(None);
        };
        match self.db.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(&value)?)),
            None => Ok(None),
        }
    }

    /// The most recent `limit` sessions, newest first
    pub fn list_recent(&self, limit: usize) -> Result<Vec<MeasurementSession>, StorageError> {
        let mut sessions = Vec::with_capacity(limit.min(self.db.len()));
        for item in self.db.iter().rev() {
            if sessions.len() >= limit {
                break;
            }
            let (key, value) = item?;
            if let Some(session) = decode(&key, &value) {
                sessions.push(session);
            }
        }
        Ok(sessions)
    }

    /// Every stored session, newest first
    pub fn all(&self) -> Result<Vec<MeasurementSession>, StorageError> {
        self.list_recent(usize::MAX)
    }

    /// Sessions that started within `[start, end]` (both inclusive), newest first
    pub fn range(&self, start: &NaiveDateTime, end: &NaiveDateTime) -> Result<Vec<MeasurementSession>, StorageError> {
        if start > end {
            return Ok(Vec::new());
        }

        let lower = time_prefix(start);
        let iter = match time_prefix(end).checked_add(1) {
            Some(upper) => self.db.range(lower.to_be_bytes()..upper.to_be_bytes()),
            None => self.db.range(lower.to_be_bytes()..),
        };

        let mut sessions = Vec::new();
        for item in iter.rev() {
            let (key, value) = item?;
            if let Some(session) = decode(&key, &value) {
                // keys hold whole millis; sub-millisecond starts are rechecked here
                if session.start_time >= *start && session.start_time <= *end {
                    sessions.push(session);
                }
            }
        }
        Ok(sessions)
    }

    /// Sessions whose peak lies within `[min_db, max_db]` (both inclusive), newest first
    pub fn by_peak_range(&self, min_db: f64, max_db: f64) -> Result<Vec<MeasurementSession>, StorageError> {
        let mut sessions = self.all()?;
        sessions.retain(|s| s.peak_within(min_db, max_db));
        Ok(sessions)
    }

    /// Remove a session. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, StorageError> {
        let result: TransactionResult<bool> = (&**self.db, &self.by_id).transaction(|(main, idx)| {
            match idx.remove(id.as_bytes())? {
                Some(key) => {
                    main.remove(key)?;
                    Ok(true)
                }
                None => Ok(false),
            }
        });
        let existed = result?;
        if existed {
            self.db.flush()?;
            debug!(id, "Session deleted");
        }
        Ok(existed)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        // entries first: a stale index entry only makes `get` return None
        self.db.clear()?;
        self.by_id.clear()?;
        self.db.flush()?;
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.db.len()
    }
}

/// Epoch millis with the sign bit flipped, so pre-1970 timestamps still
/// sort before later ones as big-endian bytes.
fn time_prefix(ts: &NaiveDateTime) -> u64 {
    (ts.and_utc().timestamp_millis() as u64) ^ (1u64 << 63)
}

/// Time prefix followed by the id
fn primary_key(session: &MeasurementSession) -> Vec<u8> {
    let mut key = Vec::with_capacity(8 + session.id.len());
    key.extend_from_slice(&time_prefix(&session.start_time).to_be_bytes());
    key.extend_from_slice(session.id.as_bytes());
    key
}

fn decode(key: &[u8], value: &[u8]) -> Option<MeasurementSession> {
    match serde_json::from_slice::<MeasurementSession>(value) {
        Ok(session) => Some(session),
        Err(e) => {
            let id = String::from_utf8_lossy(key.get(8..).unwrap_or_default());
            warn!(id = %id, error = %e, "Skipping undecodable session entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_timestamp;
    use tempfile::tempdir;

    fn session(ts: &str, readings: Vec<f64>) -> MeasurementSession {
        MeasurementSession::from_readings(parse_timestamp(ts).unwrap(), 60, readings)
    }

    #[test]
    fn test_store_and_get() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let s = session("2024-03-01T21:00:00", vec![50.0, 62.0]);
        store.save(&s).unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(store.get(&s.id).unwrap(), Some(s));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_list_recent_is_newest_first() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        for ts in ["2024-03-02T08:00:00", "2024-03-01T08:00:00", "2024-03-03T08:00:00"] {
            store.save(&session(ts, vec![45.0])).unwrap();
        }

        let recent = store.list_recent(2).unwrap();
        let ids: Vec<_> = recent.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["noise_20240303_080000", "noise_20240302_080000"]);
        assert_eq!(store.all().unwrap().len(), 3);
    }

    #[test]
    fn test_resave_with_new_start_time_replaces_entry() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let original = session("2024-03-01T08:00:00", vec![45.0]);
        store.save(&original).unwrap();

        let moved = session("2024-03-05T08:00:00", vec![70.0]).with_id(original.id.clone());
        store.save(&moved).unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(store.get(&original.id).unwrap().unwrap().max_db, Some(70.0));
    }

    #[test]
    fn test_empty_id_rejected() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        let s = session("2024-03-01T08:00:00", vec![45.0]).with_id(String::new());
        assert!(matches!(store.save(&s), Err(StorageError::MissingId)));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_delete_and_clear() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        let a = session("2024-03-01T08:00:00", vec![45.0]);
        let b = session("2024-03-02T08:00:00", vec![55.0]);
        store.save(&a).unwrap();
        store.save(&b).unwrap();

        assert!(store.delete(&a.id).unwrap());
        assert!(!store.delete(&a.id).unwrap());
        assert_eq!(store.count(), 1);

        store.clear().unwrap();
        assert_eq!(store.count(), 0);
        assert_eq!(store.get(&b.id).unwrap(), None);
    }

    #[test]
    fn test_undecodable_entry_is_skipped() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.save(&session("2024-03-01T08:00:00", vec![45.0])).unwrap();
        store.db.insert(b"\xff\xff\xff\xff\xff\xff\xff\xffgarbage", b"not json".as_slice()).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(store.count(), 2);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        for ts in [
            "2024-03-01T07:59:59",
            "2024-03-01T08:00:00",
            "2024-03-02T12:00:00",
            "2024-03-03T08:00:00",
            "2024-03-03T08:00:01",
        ] {
            store.save(&session(ts, vec![45.0])).unwrap();
        }

        let start = parse_timestamp("2024-03-01T08:00:00").unwrap();
        let end = parse_timestamp("2024-03-03T08:00:00").unwrap();
        let ids: Vec<_> = store.range(&start, &end).unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec!["noise_20240303_080000", "noise_20240302_120000", "noise_20240301_080000"]
        );

        assert!(store.range(&end, &start).unwrap().is_empty());
        assert_eq!(store.range(&start, &start).unwrap().len(), 1);
    }

    #[test]
    fn test_range_open_ended() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.save(&session("1969-07-20T20:17:00", vec![45.0])).unwrap();
        store.save(&session("2024-03-01T08:00:00", vec![45.0])).unwrap();

        let all = store.range(&NaiveDateTime::MIN, &NaiveDateTime::MAX).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_peak_range_is_inclusive() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.save(&session("2024-03-01T08:00:00", vec![40.0, 59.9])).unwrap();
        store.save(&session("2024-03-02T08:00:00", vec![45.0, 60.0])).unwrap();
        store.save(&session("2024-03-03T08:00:00", vec![50.0, 80.0])).unwrap();
        store.save(&session("2024-03-04T08:00:00", vec![50.0, 80.1])).unwrap();

        let peaks: Vec<f64> = store
            .by_peak_range(60.0, 80.0)
            .unwrap()
            .iter()
            .map(MeasurementSession::max_db)
            .collect();
        assert_eq!(peaks, vec![80.0, 60.0]);
    }

    #[test]
    fn test_index_and_entries_stay_in_step() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();

        // the same id written with different start times from several threads
        std::thread::scope(|scope| {
            for day in 1..=8u32 {
                let store = store.clone();
                scope.spawn(move || {
                    let ts = format!("2024-03-{day:02}T08:00:00");
                    let s = session(&ts, vec![f64::from(day) + 40.0]).with_id("shared");
                    store.save(&s).unwrap();
                });
            }
        });

        assert_eq!(store.count(), 1);
        assert_eq!(store.by_id.len(), 1);
        let stored = store.get("shared").unwrap().expect("index points at an entry");
        assert_eq!(store.all().unwrap(), vec![stored]);

        assert!(store.delete("shared").unwrap());
        assert_eq!(store.count(), 0);
        assert!(store.by_id.is_empty());
    }

    #[test]
    fn test_pre_epoch_sorts_before_epoch() {
        let dir = tempdir().unwrap();
        let store = SessionStore::open(dir.path()).unwrap();
        store.save(&session("1969-12-31T23:00:00", vec![40.0])).unwrap();
        store.save(&session("1970-01-01T01:00:00", vec![40.0])).unwrap();

        let ids: Vec<_> = store.all().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["noise_19700101_010000", "noise_19691231_230000"]);
    }
}
