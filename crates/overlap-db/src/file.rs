//! Single-file JSON store.
//!
//! The whole database is one JSON object mapping event id to event record,
//! rewritten in full on every mutation. Writes land in a temporary sibling
//! file that is renamed over the original, so a crash mid-write never leaves
//! a truncated document behind.
//!
//! Mutations within one process are serialized by an async mutex. Two
//! processes sharing the same file can still race: the last full rewrite
//! wins and may drop a vote written by the other process in between.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use overlap_types::{Event, EventId, Vote};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::store::EventStore;

/// Default location of the data file, relative to the working directory.
pub const DEFAULT_FILE_PATH: &str = "data/events.json";

/// Raw document: records stay undecoded until accessed so one damaged
/// record never prevents reading or rewriting the others.
type Document = BTreeMap<String, Value>;

/// File-backed [`EventStore`].
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open the store at `path`, creating the parent directory and an empty
    /// document if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory or file cannot be created.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, b"{}").await?;
        }

        tracing::info!(path = %path.display(), "Opened file event store");
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<Document, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "Data file is not a JSON object");
            StoreError::corrupt(self.path.display().to_string(), e)
        })
    }

    async fn write_document(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Decode one raw record, failing closed on damage.
fn decode(id: &EventId, raw: Value) -> Result<Event, StoreError> {
    serde_json::from_value(raw).map_err(|e| {
        tracing::warn!(event_id = %id, error = %e, "Stored event failed to decode");
        StoreError::corrupt(id.as_str(), e)
    })
}

#[async_trait]
impl EventStore for FileStore {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn get_event(&self, id: &EventId) -> Result<Option<Event>, StoreError> {
        let mut doc = self.read_document().await?;
        doc.remove(id.as_str()).map(|raw| decode(id, raw)).transpose()
    }

    async fn create_event(&self, event: &Event) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;

        if doc.contains_key(event.id.as_str()) {
            return Err(StoreError::DuplicateId(event.id.to_string()));
        }
        doc.insert(event.id.to_string(), serde_json::to_value(event)?);
        self.write_document(&doc).await?;

        tracing::debug!(event_id = %event.id, "Created event");
        Ok(())
    }

    async fn add_vote(&self, event_id: &EventId, vote: Vote) -> Result<Option<Event>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.read_document().await?;

        let Some(raw) = doc.remove(event_id.as_str()) else {
            return Ok(None);
        };
        let mut event = decode(event_id, raw)?;
        let replaced = event.upsert_vote(vote);

        doc.insert(event_id.to_string(), serde_json::to_value(&event)?);
        self.write_document(&doc).await?;

        tracing::debug!(
            event_id = %event_id,
            replaced,
            participants = event.participant_count(),
            "Recorded vote"
        );
        Ok(Some(event))
    }
}
