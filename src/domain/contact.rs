use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One row of the contact sheet: column A holds the name, column B the number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub number: String,
}

/// Contacts in sheet order, first element on the first data row.
pub type ContactList = Vec<ContactRecord>;

impl ContactRecord {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }

    /// Builds a record from the cells of one sheet row. The sheet omits
    /// trailing blank cells, so missing cells read as empty strings.
    pub fn from_cells(cells: Vec<String>) -> Self {
        let mut cells = cells.into_iter();
        Self {
            name: cells.next().unwrap_or_default(),
            number: cells.next().unwrap_or_default(),
        }
    }

    pub fn to_cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.number.clone()]
    }
}

/// Accepts strings, numbers, booleans and `null` (as empty).
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected text, found {}",
            other
        ))),
    }
}
