use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    domain::{
        contact::{ContactList, ContactRecord},
        sheets::{cell_range::CellRange, layout::ContactSheetLayout},
    },
    ports::sheet_backend::SheetBackend,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("{count} contacts do not fit in the sheet (capacity {capacity})")]
    CapacityExceeded { count: usize, capacity: usize },
    #[error("Failed to write contacts")]
    Write,
    #[error("Contacts were written but stale rows could not be cleared")]
    ClearRemainder,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("Failed to read contacts")]
    Read,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub written_rows: usize,
    /// Rows blanked after the write, if any.
    pub cleared: Option<CellRange>,
}

/// Replaces the contact list in the sheet with `records`.
///
/// The block `first_row..first_row + len` is written first, then every row
/// after it up to `max_row` is cleared so a shorter list never leaves older
/// contacts behind. An empty list is a single clear of the whole range.
/// Nothing is retried: if the clear fails the new contacts are already in
/// place and only stale rows may remain.
#[instrument(skip(backend, records), fields(count = records.len()))]
pub async fn sync_contacts(
    backend: &dyn SheetBackend,
    layout: &ContactSheetLayout,
    records: &[ContactRecord],
) -> error_stack::Result<SyncOutcome, SyncError> {
    let capacity = layout.capacity();
    if records.len() > capacity {
        return Err(report!(SyncError::CapacityExceeded {
            count: records.len(),
            capacity,
        }));
    }

    if let Some(written) = layout.written_range(records.len()) {
        let values = records.iter().map(ContactRecord::to_cells).collect();
        backend
            .write_range(&written, values)
            .await
            .change_context(SyncError::Write)
            .attach_printable_lazy(|| format!("Failed to write contacts to {}", written.a1()))?;
        info!(range = %written.a1(), "contacts written");
    }

    let cleared = match layout.stale_range(records.len()) {
        Some(stale) => {
            backend
                .clear_range(&stale)
                .await
                .change_context(SyncError::ClearRemainder)
                .attach_printable_lazy(|| format!("Failed to clear {}", stale.a1()))?;
            info!(range = %stale.a1(), "stale rows cleared");
            Some(stale)
        }
        None => None,
    };

    Ok(SyncOutcome {
        written_rows: records.len(),
        cleared,
    })
}

/// Reads the contact list back from the sheet.
#[instrument(skip(backend))]
pub async fn read_contacts(
    backend: &dyn SheetBackend,
    layout: &ContactSheetLayout,
) -> error_stack::Result<ContactList, ReadError> {
    let range = layout.full_range();
    let rows = backend
        .read_range(&range)
        .await
        .change_context(ReadError::Read)
        .attach_printable_lazy(|| format!("Failed to read contacts from {}", range.a1()))?;

    Ok(rows.into_iter().map(ContactRecord::from_cells).collect())
}
