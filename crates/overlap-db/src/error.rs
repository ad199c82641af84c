//! Error types for the data layer.
//!
//! All backend failures are propagated via [`StoreError`], which wraps the
//! underlying I/O, [`sqlx`], and [`fred`] errors. Callers treat every
//! variant as fatal to the current request; nothing here is retried by the
//! store except a lost compare-and-swap race.

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("file store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A `Dragonfly`/Redis operation failed.
    #[error("Dragonfly error: {0}")]
    Dragonfly(#[from] fred::error::Error),

    /// Serializing a record failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A persisted record (or the whole file document) could not be decoded.
    #[error("corrupt record {key}: {reason}")]
    Corrupt {
        /// Storage key or file path of the damaged record.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// An event with this id already exists.
    #[error("event id already exists: {0}")]
    DuplicateId(String),

    /// Concurrent writers kept winning the compare-and-swap race.
    #[error("event {id} still contended after {attempts} attempts")]
    Conflict {
        /// The contended event id.
        id: String,
        /// How many read-modify-write attempts were made.
        attempts: u32,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Build a [`StoreError::Corrupt`] from any decoder error.
    pub fn corrupt(key: impl Into<String>, reason: impl core::fmt::Display) -> Self {
        Self::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}
