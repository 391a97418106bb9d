use thiserror::Error;

use super::{cell_range::CellRange, column::Column, row::Row};

pub const DEFAULT_SHEET_TITLE: &str = "Sheet1";
/// Row 1 holds the headers.
pub const DEFAULT_FIRST_ROW: u32 = 2;
pub const DEFAULT_MAX_ROW: u32 = 1000;

pub const NAME_COLUMN: Column = Column::A;
pub const NUMBER_COLUMN: Column = Column::B;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Sheet title cannot be empty")]
    EmptySheetTitle,
    #[error("Max row {max_row} comes before first data row {first_row}")]
    MaxRowBeforeFirstRow { first_row: Row, max_row: Row },
}

/// Where the contact list lives: one sheet tab, name and number columns,
/// data rows `first_row..=max_row`.
///
/// Reads and writes share the same bounds so a full read after a write sees
/// exactly what was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSheetLayout {
    sheet_title: String,
    first_row: Row,
    max_row: Row,
}

impl ContactSheetLayout {
    pub fn new(
        sheet_title: impl Into<String>,
        first_row: Row,
        max_row: Row,
    ) -> Result<Self, LayoutError> {
        let sheet_title = sheet_title.into();
        if sheet_title.trim().is_empty() {
            return Err(LayoutError::EmptySheetTitle);
        }
        if max_row < first_row {
            return Err(LayoutError::MaxRowBeforeFirstRow { first_row, max_row });
        }

        Ok(Self {
            sheet_title,
            first_row,
            max_row,
        })
    }

    pub fn max_row(&self) -> Row {
        self.max_row
    }

    /// Maximum number of contacts the sheet can hold.
    pub fn capacity(&self) -> usize {
        self.first_row.span_to(self.max_row) as usize
    }

    fn block(&self, first_row: Row, last_row: Row) -> CellRange {
        CellRange::columns_between(NAME_COLUMN, NUMBER_COLUMN, first_row, last_row)
            .with_sheet_title(self.sheet_title.as_str())
    }

    /// Every data row, used for reads and for clearing the whole list.
    pub fn full_range(&self) -> CellRange {
        self.block(self.first_row, self.max_row)
    }

    /// Rows occupied by a list of `len` contacts. `None` for an empty list or
    /// a list that does not fit.
    pub fn written_range(&self, len: usize) -> Option<CellRange> {
        if len == 0 || len > self.capacity() {
            return None;
        }
        let last_row = self.first_row.offset(len as u32 - 1);
        Some(self.block(self.first_row, last_row))
    }

    /// Rows that must be blanked after writing `len` contacts. `None` when the
    /// list fills the sheet to `max_row`.
    pub fn stale_range(&self, len: usize) -> Option<CellRange> {
        if len >= self.capacity() {
            return None;
        }
        let first_stale_row = self.first_row.offset(len as u32);
        Some(self.block(first_stale_row, self.max_row))
    }
}

impl Default for ContactSheetLayout {
    fn default() -> Self {
        Self {
            sheet_title: DEFAULT_SHEET_TITLE.to_string(),
            first_row: Row::from_row(DEFAULT_FIRST_ROW),
            max_row: Row::from_row(DEFAULT_MAX_ROW),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::sheets::a1_notation::ToA1Notation;

    use super::*;

    fn small_layout() -> ContactSheetLayout {
        ContactSheetLayout::new("Contacts", Row::from_row(2), Row::from_row(5)).unwrap()
    }

    #[test]
    fn test_default_layout() {
        let layout = ContactSheetLayout::default();
        assert_eq!(layout.capacity(), 999);
        assert_eq!(layout.full_range().a1().as_ref(), "'Sheet1'!A2:B1000");
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let result = ContactSheetLayout::new("Sheet1", Row::from_row(10), Row::from_row(9));
        assert!(matches!(
            result,
            Err(LayoutError::MaxRowBeforeFirstRow { .. })
        ));
    }

    #[test]
    fn test_rejects_blank_title() {
        let result = ContactSheetLayout::new("  ", Row::from_row(2), Row::from_row(9));
        assert_eq!(result, Err(LayoutError::EmptySheetTitle));
    }

    #[test]
    fn test_single_row_layout() {
        let layout =
            ContactSheetLayout::new("Sheet1", Row::from_row(2), Row::from_row(2)).unwrap();
        assert_eq!(layout.capacity(), 1);
        assert!(layout.stale_range(1).is_none());
    }

    #[test]
    fn test_written_range() {
        let layout = small_layout();
        assert_eq!(layout.written_range(0), None);
        assert_eq!(
            layout.written_range(3).unwrap().to_a1_notation(None).as_ref(),
            "A2:B4"
        );
        assert_eq!(
            layout.written_range(4).unwrap().to_a1_notation(None).as_ref(),
            "A2:B5"
        );
        assert_eq!(layout.written_range(5), None);
    }

    #[test]
    fn test_stale_range() {
        let layout = small_layout();
        assert_eq!(layout.stale_range(0), Some(layout.full_range()));
        assert_eq!(
            layout.stale_range(1).unwrap().a1().as_ref(),
            "'Contacts'!A3:B5"
        );
        assert_eq!(
            layout.stale_range(3).unwrap().a1().as_ref(),
            "'Contacts'!A5:B5"
        );
        assert_eq!(layout.stale_range(4), None);
    }
}
