//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::catalog::CatalogError;
use practice_core::model::SummaryError;
use storage::repository::StorageError;

/// Errors emitted by the practice session and its orchestrator.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("round complete; acknowledge it before continuing")]
    RoundComplete,

    #[error("no completed round to acknowledge")]
    NoCompletedRound,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Summary(#[from] SummaryError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
