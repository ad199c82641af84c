//! Event identifiers.
//!
//! An [`EventId`] is the primary storage key and the public, shareable
//! reference to an event (it appears in the invite link). Generated ids are
//! short lowercase alphanumeric strings with enough entropy that collisions
//! are negligible; ids arriving from clients are checked against a
//! conservative character set before they are ever used to build a
//! storage key.

use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Length of a freshly generated identifier.
pub const GENERATED_ID_LEN: usize = 10;

/// Longest identifier accepted from a client.
pub const MAX_ID_LEN: usize = 64;

/// Characters used for generated identifiers (base36, ~5.17 bits each).
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Unique identifier for a scheduling event.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct EventId(String);

impl EventId {
    /// Generate a new random identifier of [`GENERATED_ID_LEN`] characters.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..GENERATED_ID_LEN)
            .filter_map(|_| ID_ALPHABET.choose(&mut rng).copied())
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Accept an identifier supplied by a client.
    ///
    /// Returns `None` unless `raw` is 1..=[`MAX_ID_LEN`] characters drawn
    /// from `[0-9A-Za-z_-]`. Callers treat a rejected id as "not found".
    pub fn parse(raw: &str) -> Option<Self> {
        let valid_len = !raw.is_empty() && raw.len() <= MAX_ID_LEN;
        let valid_chars = raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
        (valid_len && valid_chars).then(|| Self(raw.to_owned()))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
