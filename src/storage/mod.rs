//! Store adapters
//!
//! The lifecycle engine talks to storage only through [`TicketStore`]. Three
//! adapters are provided: an in-process [`MemoryStore`], a YAML
//! [`FileStorage`], and (with the `database` feature) a SQLite
//! [`SqliteStore`].

mod file;
mod memory;
mod record;
mod repository;
#[cfg(feature = "database")]
mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStore;
pub use record::{
    CommentRecord, TicketRecord, decode_comment, decode_ticket, format_timestamp,
};
#[cfg(test)]
pub use repository::MockTicketStore;
pub use repository::{TicketPatch, TicketStore};
#[cfg(feature = "database")]
pub use sqlite::SqliteStore;

use crate::config::{StorageBackend, SupportDeskConfig};
use crate::error::Result;
use std::sync::Arc;

/// Open the store selected by `config`
pub async fn open_store(config: &SupportDeskConfig) -> Result<Arc<dyn TicketStore>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::File => Ok(Arc::new(FileStorage::open(&config.storage.path).await?)),
        StorageBackend::Sqlite => open_sqlite(config).await,
    }
}

#[cfg(feature = "database")]
async fn open_sqlite(config: &SupportDeskConfig) -> Result<Arc<dyn TicketStore>> {
    tokio::fs::create_dir_all(&config.storage.path).await?;
    Ok(Arc::new(SqliteStore::open(&config.database_path()).await?))
}

#[cfg(not(feature = "database"))]
async fn open_sqlite(_config: &SupportDeskConfig) -> Result<Arc<dyn TicketStore>> {
    Err(crate::error::SupportDeskError::Storage(
        "SQLite backend requires the 'database' feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TicketFilter;
    use crate::test_utils::sample_tickets;
    use tempfile::TempDir;

    fn config_for(backend: StorageBackend, root: &std::path::Path) -> SupportDeskConfig {
        let mut config = SupportDeskConfig::default();
        config.storage.backend = backend;
        config.storage.path = root.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_open_each_backend() {
        let temp = TempDir::new().unwrap();
        let mut backends = vec![StorageBackend::Memory, StorageBackend::File];
        if cfg!(feature = "database") {
            backends.push(StorageBackend::Sqlite);
        }

        for backend in backends {
            let root = temp.path().join(format!("{backend:?}"));
            let store = open_store(&config_for(backend, &root)).await.unwrap();
            let ticket = sample_tickets().remove(0);
            store.insert(&ticket).await.unwrap();
            let all = store.query_all(&TicketFilter::new()).await.unwrap();
            assert_eq!(all, vec![ticket], "backend {backend:?}");
        }
    }
}
