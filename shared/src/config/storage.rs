//! Storage backend selection

use serde::{Deserialize, Serialize};

/// Where entities are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MySQL through the shared connection pool
    #[default]
    Mysql,
    /// Process-local store, for demos and tests
    Memory,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Run bundled migrations on startup (mysql only)
    pub run_migrations: bool,
}
