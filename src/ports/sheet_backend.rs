use std::sync::Arc;

use thiserror::Error;

use crate::domain::sheets::cell_range::CellRange;

/// Cell values by row, then column.
pub type SheetValues = Vec<Vec<String>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetBackendError {
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to clear range")]
    FailedToClearRange,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetConnectError {
    #[error("Spreadsheet credentials are missing or malformed")]
    Credentials,
    #[error("Could not authenticate with the spreadsheet service")]
    Authentication,
}

/// The three range operations the contact routines need from a spreadsheet.
#[async_trait::async_trait]
pub trait SheetBackend: Send + Sync {
    /// Returns the rows of `range` the way the sheet reports them: trailing
    /// blank rows and trailing blank cells in a row are omitted.
    async fn read_range(
        &self,
        range: &CellRange,
    ) -> error_stack::Result<SheetValues, SheetBackendError>;

    /// Replaces every cell covered by `values`, starting at the top-left of `range`.
    async fn write_range(
        &self,
        range: &CellRange,
        values: SheetValues,
    ) -> error_stack::Result<(), SheetBackendError>;

    async fn clear_range(&self, range: &CellRange) -> error_stack::Result<(), SheetBackendError>;
}

/// Produces a backend for a single request. Credentials are resolved here.
#[async_trait::async_trait]
pub trait SheetConnector: Send + Sync {
    async fn connect(&self) -> error_stack::Result<Arc<dyn SheetBackend>, SheetConnectError>;
}
