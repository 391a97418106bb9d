use super::{
    a1_notation::{quote_sheet_title, A1Notation, ToA1Notation},
    cell_position::CellPosition,
    column::Column,
    row::Row,
};

/// Inclusive rectangular block of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
    pub sheet_title: Option<String>,
}

impl CellRange {
    pub fn new(start: CellPosition, end: CellPosition) -> Self {
        Self {
            start,
            end,
            sheet_title: None,
        }
    }

    /// Columns `first_col..=last_col` across rows `first_row..=last_row`.
    pub fn columns_between(
        first_col: Column,
        last_col: Column,
        first_row: Row,
        last_row: Row,
    ) -> Self {
        Self::new(
            CellPosition::new(first_col, first_row),
            CellPosition::new(last_col, last_row),
        )
    }

    pub fn row_count(&self) -> u32 {
        self.start.row.span_to(self.end.row)
    }

    pub fn column_count(&self) -> u32 {
        (self.end.col.value() + 1).saturating_sub(self.start.col.value())
    }

    pub fn with_sheet_title(&self, sheet_title: impl Into<String>) -> Self {
        Self {
            start: self.start,
            end: self.end,
            sheet_title: Some(sheet_title.into()),
        }
    }

    pub fn contains(&self, position: &CellPosition) -> bool {
        (self.start.row..=self.end.row).contains(&position.row)
            && (self.start.col..=self.end.col).contains(&position.col)
    }

    /// A1 notation using this range's own sheet title, if any.
    pub fn a1(&self) -> A1Notation {
        self.to_a1_notation(self.sheet_title.as_deref())
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let local = format!(
            "{}{}:{}{}",
            self.start.col, self.start.row, self.end.col, self.end.row
        );
        match sheet_name {
            Some(sheet_name) => A1Notation(format!("{}!{}", quote_sheet_title(sheet_name), local)),
            None => A1Notation(local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contacts_block() -> CellRange {
        CellRange::columns_between(Column::A, Column::B, Row::from_row(2), Row::from_row(1000))
    }

    #[test]
    fn test_counts() {
        let range = contacts_block();
        assert_eq!(range.row_count(), 999);
        assert_eq!(range.column_count(), 2);
    }

    #[test]
    fn test_to_a1_notation() {
        let range = contacts_block();
        assert_eq!(range.to_a1_notation(None).as_ref(), "A2:B1000");
        assert_eq!(
            range.with_sheet_title("Sheet1").a1().as_ref(),
            "'Sheet1'!A2:B1000"
        );
    }

    #[test]
    fn test_contains() {
        let range = contacts_block();
        assert!(range.contains(&CellPosition::new(Column::B, Row::from_row(1000))));
        assert!(!range.contains(&CellPosition::new(Column::A, Row::from_row(1))));
        assert!(!range.contains(&CellPosition::new(Column::B.offset(1), Row::from_row(2))));
    }
}
