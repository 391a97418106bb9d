use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use error_stack::{report, ResultExt};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::{
    domain::sheets::{
        cell_position::CellPosition, cell_range::CellRange, column::Column, row::Row,
    },
    ports::sheet_backend::{
        SheetBackend, SheetBackendError, SheetConnectError, SheetConnector, SheetValues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetOperation {
    Read,
    Write,
    Clear,
}

/// A request received by the in-memory sheet, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRequest {
    pub operation: SheetOperation,
    pub range: CellRange,
}

type CellKey = (String, Row, Column);

#[derive(Debug, Default)]
struct Inner {
    cells: BTreeMap<CellKey, String>,
    requests: Vec<SheetRequest>,
    failing: HashSet<SheetOperation>,
}

/// Spreadsheet kept in process memory.
///
/// Mirrors what the Sheets values API reports: blank cells do not exist,
/// reads omit trailing blank rows and trailing blank cells, and a write may
/// not spill outside its range. Clones share the same cells.
#[derive(Debug, Clone, Default)]
pub struct InMemorySheet {
    inner: Arc<RwLock<Inner>>,
}

fn sheet_of(range: &CellRange) -> String {
    range.sheet_title.clone().unwrap_or_default()
}

impl InMemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later request of this kind fail.
    pub async fn fail_on(&self, operation: SheetOperation) {
        self.inner.write().await.failing.insert(operation);
    }

    pub async fn requests(&self) -> Vec<SheetRequest> {
        self.inner.read().await.requests.clone()
    }

    pub async fn reset_requests(&self) {
        self.inner.write().await.requests.clear();
    }

    /// Every cell of `range`, blanks included.
    pub async fn grid(&self, range: &CellRange) -> SheetValues {
        let guard = self.inner.read().await;
        let sheet = sheet_of(range);
        (0..range.row_count())
            .map(|offset| {
                let row = range.start.row.offset(offset);
                column_span(range)
                    .map(|col| {
                        guard
                            .cells
                            .get(&(sheet.clone(), row, col))
                            .cloned()
                            .unwrap_or_default()
                    })
                    .collect()
            })
            .collect()
    }

    async fn record(
        &self,
        operation: SheetOperation,
        range: &CellRange,
    ) -> error_stack::Result<(), SheetBackendError> {
        let mut guard = self.inner.write().await;
        guard.requests.push(SheetRequest {
            operation,
            range: range.clone(),
        });
        if guard.failing.contains(&operation) {
            let error = match operation {
                SheetOperation::Read => SheetBackendError::FailedToFetchRange,
                SheetOperation::Write => SheetBackendError::FailedToWriteRange,
                SheetOperation::Clear => SheetBackendError::FailedToClearRange,
            };
            return Err(report!(error).attach_printable("in-memory sheet set to fail"));
        }
        Ok(())
    }
}

fn column_span(range: &CellRange) -> impl Iterator<Item = Column> {
    let first = range.start.col;
    (0..range.column_count()).map(move |offset| first.offset(offset))
}

#[async_trait::async_trait]
impl SheetBackend for InMemorySheet {
    #[instrument(skip(self, range), fields(range = %range.a1()))]
    async fn read_range(
        &self,
        range: &CellRange,
    ) -> error_stack::Result<SheetValues, SheetBackendError> {
        self.record(SheetOperation::Read, range).await?;

        let mut rows = self.grid(range).await;
        for row in &mut rows {
            while row.last().is_some_and(|cell| cell.is_empty()) {
                row.pop();
            }
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        Ok(rows)
    }

    #[instrument(skip(self, range, values), fields(range = %range.a1(), rows = values.len()))]
    async fn write_range(
        &self,
        range: &CellRange,
        values: SheetValues,
    ) -> error_stack::Result<(), SheetBackendError> {
        self.record(SheetOperation::Write, range).await?;

        let spills = values.len() > range.row_count() as usize
            || values
                .iter()
                .any(|row| row.len() > range.column_count() as usize);
        if spills {
            return Err(report!(SheetBackendError::FailedToWriteRange))
                .attach_printable_lazy(|| format!("values do not fit in range {}", range.a1()));
        }

        let sheet = sheet_of(range);
        let mut guard = self.inner.write().await;
        for (row, cells) in (0u32..).map(|offset| range.start.row.offset(offset)).zip(values) {
            for (col, value) in column_span(range).zip(cells) {
                let key = (sheet.clone(), row, col);
                if value.is_empty() {
                    guard.cells.remove(&key);
                } else {
                    guard.cells.insert(key, value);
                }
            }
        }
        Ok(())
    }

    #[instrument(skip(self, range), fields(range = %range.a1()))]
    async fn clear_range(&self, range: &CellRange) -> error_stack::Result<(), SheetBackendError> {
        self.record(SheetOperation::Clear, range).await?;

        let sheet = sheet_of(range);
        self.inner
            .write()
            .await
            .cells
            .retain(|(cell_sheet, row, col), _| {
                *cell_sheet != sheet
                    || !range.contains(&CellPosition::new(*col, *row))
            });
        Ok(())
    }
}

#[async_trait::async_trait]
impl SheetConnector for InMemorySheet {
    async fn connect(&self) -> error_stack::Result<Arc<dyn SheetBackend>, SheetConnectError> {
        Ok(Arc::new(self.clone()))
    }
}
