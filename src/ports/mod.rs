pub mod sheet_backend;
pub mod workflow_trigger;
