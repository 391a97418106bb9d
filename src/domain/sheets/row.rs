use std::fmt::Formatter;

/// A spreadsheet row, stored as a zero-based index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub const fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub const fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    /// Returns the row as it is shown in the spreadsheet (1-based).
    /// # Examples
    /// ```
    /// use contact_sheet::domain::sheets::row::Row;
    /// assert_eq!(Row::from_index(0).number(), 1);
    /// assert_eq!(Row::from_row(26).number(), 26);
    /// ```
    pub const fn number(&self) -> u32 {
        self.index.saturating_add(1)
    }

    /// Returns the zero-based row index.
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// Moves `count` rows down the sheet.
    pub fn offset(self, count: u32) -> Row {
        Row::from_index(self.index.saturating_add(count))
    }

    /// Number of rows in the inclusive span `self..=end`, or zero when `end` is above `self`.
    pub fn span_to(self, end: Row) -> u32 {
        if end < self {
            0
        } else {
            end.index - self.index + 1
        }
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.number())
    }
}

impl<'de> serde::Deserialize<'de> for Row {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let row = u32::deserialize(deserializer)?;
        if row == 0 {
            return Err(serde::de::Error::custom("rows are numbered from 1"));
        }
        Ok(Row::from_row(row))
    }
}
