use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::ports::sheet_backend::SheetValues;

pub trait ValueRangeFactory {
    fn from_rows(rows: SheetValues) -> Self;
}

/// Converts a values response into plain strings. Cells come back formatted,
/// so anything that is not a string is rendered as text.
pub trait IntoSheetValues {
    fn into_sheet_values(self) -> SheetValues;
}

fn wrap_value(value: String) -> Value {
    Value::String(value)
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: SheetValues) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(
                rows.into_iter()
                    .map(|row| row.into_iter().map(wrap_value).collect())
                    .collect(),
            ),
        }
    }
}

impl IntoSheetValues for ValueRange {
    fn into_sheet_values(self) -> SheetValues {
        self.values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_rows() {
        let value_range = ValueRange::from_rows(vec![
            vec!["Alice".to_string(), "+911111111111".to_string()],
            vec!["Bob".to_string(), String::new()],
        ]);
        assert_eq!(value_range.major_dimension, Some("ROWS".to_string()));
        assert_eq!(value_range.range, None, "Range comes from the request URL");
        assert_eq!(
            value_range.values,
            Some(vec![
                vec![json!("Alice"), json!("+911111111111")],
                vec![json!("Bob"), json!("")],
            ])
        );
    }

    #[test]
    fn test_missing_values_are_an_empty_sheet() {
        let value_range = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some("'Sheet1'!A2:B1000".to_string()),
            values: None,
        };
        assert!(value_range.into_sheet_values().is_empty());
    }

    #[test]
    fn test_cells_become_text() {
        let value_range = ValueRange {
            major_dimension: None,
            range: None,
            values: Some(vec![
                vec![json!("Alice"), json!(911111)],
                vec![],
                vec![json!(true), Value::Null],
            ]),
        };
        assert_eq!(
            value_range.into_sheet_values(),
            vec![
                vec!["Alice".to_string(), "911111".to_string()],
                vec![],
                vec!["true".to_string(), String::new()],
            ]
        );
    }
}
