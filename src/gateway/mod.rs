//! Read-only access to the play table.
//!
//! A gateway is opened once at startup, handed to the pipeline by reference and
//! closed at shutdown. Nothing writes to the dataset while it is open.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryGateway;
pub use sqlite::SqliteGateway;

use crate::play::PlayRecord;
use crate::query::CompiledQuery;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("dataset unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("snapshot {path}: {reason}")]
    Snapshot { path: String, reason: String },
}

pub trait DatasetGateway {
    /// Rows matching the compiled predicate.
    fn fetch(&self, query: &CompiledQuery) -> Result<Vec<PlayRecord>, GatewayError>;

    /// Distinct passer names, ascending.
    fn passers(&self) -> Result<Vec<String>, GatewayError>;

    /// Distinct receivers targeted by `passer`, ascending.
    fn receivers(&self, passer: &str) -> Result<Vec<String>, GatewayError>;

    fn close(self: Box<Self>) -> Result<(), GatewayError> {
        Ok(())
    }
}
