use crate::types::IncidentId;
use std::path::PathBuf;

/// Failure of a data source to produce a dataset.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("no incident with id {0}")]
    UnknownIncident(IncidentId),

    #[error("row {row} is outside the current view ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },
}
