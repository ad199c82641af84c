//! `Dragonfly` (Redis-compatible) event store.
//!
//! One event per key, stored as JSON. Events expire after a rolling
//! retention window: every mutating write refreshes the key's TTL, so an
//! event stays alive as long as people keep voting on it.
//!
//! # Key Patterns
//!
//! | Pattern | Type | Description |
//! |---------|------|-------------|
//! | `event:{id}` | JSON | Full event record with participants |
//!
//! # Concurrency
//!
//! [`DragonflyStore::add_vote`] is a read-modify-write guarded by a
//! compare-and-swap script: the new document is written only if the key
//! still holds exactly the bytes that were read. A lost race re-reads and
//! retries, up to [`MAX_CAS_ATTEMPTS`] times.

use std::time::Duration;

use async_trait::async_trait;
use fred::interfaces::LuaInterface;
use fred::prelude::*;
use fred::types::{Expiration, SetOptions};
use overlap_types::{Event, EventId, Vote};

use crate::error::StoreError;
use crate::store::EventStore;

/// Default rolling retention window.
pub const DEFAULT_TTL: Duration = Duration::from_secs(90 * 24 * 60 * 60);

/// Upper bound on compare-and-swap retries for one vote.
pub const MAX_CAS_ATTEMPTS: u32 = 8;

/// Replace `KEYS[1]` with `ARGV[2]` only if it currently equals `ARGV[1]`.
/// `ARGV[3]` is the TTL in seconds; `0` stores without expiry.
const CAS_SCRIPT: &str = r"
if redis.call('GET', KEYS[1]) == ARGV[1] then
  if tonumber(ARGV[3]) > 0 then
    redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
  else
    redis.call('SET', KEYS[1], ARGV[2])
  end
  return 1
end
return 0
";

/// Storage key for an event.
fn event_key(id: &EventId) -> String {
    format!("event:{id}")
}

/// Connection handle to a `Dragonfly` (Redis-compatible) instance.
#[derive(Clone)]
pub struct DragonflyStore {
    client: Client,
    ttl: Option<Duration>,
}

impl DragonflyStore {
    /// Connect to `Dragonfly` at the given URL.
    ///
    /// The URL should follow the Redis URL scheme:
    /// `redis://host:port` or `redis://host:port/db`. A `ttl` of `None`
    /// stores events without expiry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed.
    /// Returns [`StoreError::Dragonfly`] if the connection fails.
    pub async fn connect(url: &str, ttl: Option<Duration>) -> Result<Self, StoreError> {
        let config = Config::from_url(url)
            .map_err(|e| StoreError::Config(format!("Invalid Dragonfly URL: {e}")))?;

        let client = Builder::from_config(config).build()?;
        client.init().await?;

        tracing::info!(ttl_secs = ttl.map(|t| t.as_secs()), "Connected to Dragonfly");
        Ok(Self { client, ttl })
    }

    /// TTL in whole seconds, `0` when expiry is disabled.
    fn ttl_secs(&self) -> i64 {
        self.ttl
            .map_or(0, |t| i64::try_from(t.as_secs()).unwrap_or(i64::MAX))
    }

    fn expiration(&self) -> Option<Expiration> {
        match self.ttl_secs() {
            0 => None,
            secs => Some(Expiration::EX(secs)),
        }
    }

    /// Return a reference to the underlying [`Client`].
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

/// Decode a stored record, failing closed on damage.
fn decode(key: &str, raw: &str) -> Result<Event, StoreError> {
    serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(key, error = %e, "Stored event failed to decode");
        StoreError::corrupt(key, e)
    })
}

#[async_trait]
impl EventStore for DragonflyStore {
    fn backend_name(&self) -> &'static str {
        "dragonfly"
    }

    async fn get_event(&self, id: &EventId) -> Result<Option<Event>, StoreError> {
        let key = event_key(id);
        let value: Option<String> = self.client.get(key.as_str()).await?;
        value.map(|raw| decode(&key, &raw)).transpose()
    }

    async fn create_event(&self, event: &Event) -> Result<(), StoreError> {
        let key = event_key(&event.id);
        let json = serde_json::to_string(event)?;

        // NX: never clobber an existing event. A nil reply means the key
        // was already taken.
        let reply: Option<String> = self
            .client
            .set(
                key.as_str(),
                json.as_str(),
                self.expiration(),
                Some(SetOptions::NX),
                false,
            )
            .await?;
        if reply.is_none() {
            return Err(StoreError::DuplicateId(event.id.to_string()));
        }

        tracing::debug!(event_id = %event.id, "Created event");
        Ok(())
    }

    async fn add_vote(&self, event_id: &EventId, vote: Vote) -> Result<Option<Event>, StoreError> {
        let key = event_key(event_id);
        let ttl_secs = self.ttl_secs().to_string();

        for attempt in 1..=MAX_CAS_ATTEMPTS {
            let current: Option<String> = self.client.get(key.as_str()).await?;
            let Some(current) = current else {
                return Ok(None);
            };

            let mut event = decode(&key, &current)?;
            let replaced = event.upsert_vote(vote.clone());
            let next = serde_json::to_string(&event)?;

            let swapped: i64 = self
                .client
                .eval(
                    CAS_SCRIPT,
                    key.as_str(),
                    vec![current, next, ttl_secs.clone()],
                )
                .await?;

            if swapped == 1 {
                tracing::debug!(
                    event_id = %event_id,
                    replaced,
                    attempt,
                    participants = event.participant_count(),
                    "Recorded vote"
                );
                return Ok(Some(event));
            }

            tracing::debug!(event_id = %event_id, attempt, "Event changed underneath vote, retrying");
        }

        Err(StoreError::Conflict {
            id: event_id.to_string(),
            attempts: MAX_CAS_ATTEMPTS,
        })
    }
}
