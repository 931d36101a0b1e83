//! In-process snapshot of the play table.

use crate::gateway::{DatasetGateway, GatewayError};
use crate::play::PlayRecord;
use crate::query::CompiledQuery;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Evaluates compiled predicates directly against an owned row set.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    plays: Vec<PlayRecord>,
}

impl MemoryGateway {
    pub fn new(plays: Vec<PlayRecord>) -> Self {
        Self { plays }
    }

    /// Load a JSON array of rows keyed by table column names.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, GatewayError> {
        let path = path.as_ref();
        let snapshot_err = |reason: String| GatewayError::Snapshot {
            path: path.display().to_string(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|e| snapshot_err(e.to_string()))?;
        let plays: Vec<PlayRecord> =
            serde_json::from_str(&text).map_err(|e| snapshot_err(e.to_string()))?;

        log::info!("loaded {} plays from snapshot {}", plays.len(), path.display());
        Ok(Self::new(plays))
    }
}

impl DatasetGateway for MemoryGateway {
    fn fetch(&self, query: &CompiledQuery) -> Result<Vec<PlayRecord>, GatewayError> {
        Ok(self
            .plays
            .iter()
            .filter(|p| query.predicate.matches(p))
            .cloned()
            .collect())
    }

    fn passers(&self) -> Result<Vec<String>, GatewayError> {
        let names: BTreeSet<&str> = self
            .plays
            .iter()
            .map(|p| p.passer.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }

    fn receivers(&self, passer: &str) -> Result<Vec<String>, GatewayError> {
        let names: BTreeSet<&str> = self
            .plays
            .iter()
            .filter(|p| p.passer == passer)
            .filter_map(|p| p.receiver.as_deref())
            .collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }
}
