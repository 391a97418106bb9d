use std::fmt::Formatter;

/// A 1-based spreadsheet column, displayed with letters (`1` is `A`, `27` is `AA`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(u32);

impl Column {
    pub const A: Column = Column(1);
    pub const B: Column = Column(2);

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Moves `count` columns to the right.
    pub fn offset(self, count: u32) -> Column {
        Column(self.0.saturating_add(count))
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Column(u32: {}, letters: {})", self.0, self)
    }
}

fn number_to_letters(number: u32) -> String {
    let mut number = number;
    let mut letters = Vec::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        letters.push((remainder as u8 + b'A') as char);
        number = (number - remainder - 1) / 26;
    }
    letters.iter().rev().collect()
}
