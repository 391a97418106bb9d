//! Shared state for the request handlers.

use std::sync::Arc;

use error_stack::ResultExt;

use crate::{
    adapters::{
        automation::make_trigger::MakeScenarioTrigger,
        config::{
            app_config::{AppConfig, ConfigError},
            sheets_config::SheetBackendKind,
        },
        sheets::{google_sheets::GoogleSheetsConnector, in_memory::InMemorySheet},
    },
    domain::sheets::layout::ContactSheetLayout,
    ports::{sheet_backend::SheetConnector, workflow_trigger::WorkflowTrigger},
};

#[derive(Clone)]
pub struct AppState {
    pub sheets: Arc<dyn SheetConnector>,
    pub layout: Arc<ContactSheetLayout>,
    pub trigger: Arc<dyn WorkflowTrigger>,
}

impl AppState {
    pub fn new(
        sheets: Arc<dyn SheetConnector>,
        layout: ContactSheetLayout,
        trigger: Arc<dyn WorkflowTrigger>,
    ) -> Self {
        Self {
            sheets,
            layout: Arc::new(layout),
            trigger,
        }
    }

    pub fn from_config(config: &AppConfig) -> error_stack::Result<Self, ConfigError> {
        let layout = config
            .sheets
            .layout()
            .change_context(ConfigError::Layout)?;

        let sheets: Arc<dyn SheetConnector> = match config.sheets.backend {
            SheetBackendKind::Google => {
                Arc::new(GoogleSheetsConnector::new(config.sheets.clone()))
            }
            SheetBackendKind::Memory => Arc::new(InMemorySheet::new()),
        };
        let trigger = Arc::new(MakeScenarioTrigger::new(config.automation.clone()));

        Ok(Self::new(sheets, layout, trigger))
    }
}
