use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{FractionError, SettingsError, SummaryError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fraction(#[from] FractionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
