use serde::Deserialize;

use crate::domain::sheets::{
    layout::{ContactSheetLayout, LayoutError},
    row::Row,
};

pub const DEFAULT_SPREADSHEET_ID: &str = "1TWed-hSlL14Eh5iNHV5NzDbdhcCkleX4_ZC6PGzmYzI";

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SheetBackendKind {
    #[default]
    Google,
    Memory,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Box<str>,
    pub sheet_title: String,
    pub first_row: Row,
    pub max_row: Row,
    #[serde(default)]
    pub backend: SheetBackendKind,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

impl SpreadsheetConfig {
    pub fn layout(&self) -> Result<ContactSheetLayout, LayoutError> {
        ContactSheetLayout::new(self.sheet_title.as_str(), self.first_row, self.max_row)
    }
}

/// Service account key, either base64 encoded or as raw JSON. The encoded
/// form wins when both are set.
#[derive(Deserialize, Clone, Default)]
pub struct CredentialsConfig {
    pub b64: Option<String>,
    pub json: Option<String>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("b64", &self.b64.as_ref().map(|_| "<redacted>"))
            .field("json", &self.json.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
