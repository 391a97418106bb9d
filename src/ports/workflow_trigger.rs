use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Missing MAKE_TOKEN or SCENARIO_ID")]
    MissingConfiguration,
    #[error("Run failed with status {status}")]
    Upstream { status: u16, body: String },
    #[error("Could not reach the automation service")]
    Transport,
}

/// Response body of a successful run request, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunAcknowledgement {
    pub body: String,
}

/// Starts the remote automation scenario. Fire and forget: the run itself is
/// not tracked.
#[async_trait::async_trait]
pub trait WorkflowTrigger: Send + Sync {
    async fn trigger_run(&self) -> error_stack::Result<RunAcknowledgement, RunError>;
}
