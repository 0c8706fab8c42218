#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    KindTotals, ProgressRepository, Storage, StorageError, StoredSummary, SummaryRepository,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
