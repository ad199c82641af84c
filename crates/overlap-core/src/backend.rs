//! Backend selection.
//!
//! Runs once at startup: the configured [`StoreBackend`] is connected and
//! erased behind a [`SharedStore`]. Everything after this point is
//! backend-agnostic.

use std::sync::Arc;

use overlap_db::{DragonflyStore, FileStore, PostgresConfig, PostgresStore, SharedStore, StoreError};

use crate::config::{StoreBackend, StoreConfig};

/// Connect the backend named in `config`.
///
/// # Errors
///
/// Returns whatever [`StoreError`] the chosen backend reports while opening
/// its file, connecting, or running migrations.
pub async fn connect_store(config: &StoreConfig) -> Result<SharedStore, StoreError> {
    let store: SharedStore = match config.backend {
        StoreBackend::File => Arc::new(FileStore::open(&config.file_path).await?),
        StoreBackend::Dragonfly => {
            Arc::new(DragonflyStore::connect(&config.dragonfly_url, config.ttl()).await?)
        }
        StoreBackend::Postgres => {
            let pg = PostgresConfig::new(&config.postgres_url)
                .with_max_connections(config.max_connections);
            Arc::new(PostgresStore::connect(&pg).await?)
        }
    };

    tracing::info!(backend = store.backend_name(), "Event store ready");
    Ok(store)
}
