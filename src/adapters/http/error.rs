//! Conversion of failures into JSON error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_stack::{Context, FrameKind, Report};
use serde_json::{json, Value};
use tracing::error;

use crate::{
    application::contact_sync::SyncError,
    ports::workflow_trigger::RunError,
};

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Value,
}

/// Every context in the report, outermost first, joined by `: `.
pub fn describe<C: Context>(report: &Report<C>) -> String {
    report
        .frames()
        .filter_map(|frame| match frame.kind() {
            FrameKind::Context(context) => Some(context.to_string()),
            FrameKind::Attachment(_) => None,
        })
        .collect::<Vec<_>>()
        .join(": ")
}

impl ApiError {
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "message": message.into() }),
        }
    }

    pub fn sheet_read<C: Context>(report: Report<C>) -> Self {
        error!("Error /api/get-sheet: {:?}", report);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "message": "Error reading sheet", "error": describe(&report) }),
        }
    }

    pub fn sheet_update<C: Context>(report: Report<C>) -> Self {
        error!("Error /api/update-sheet: {:?}", report);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "message": "Error updating sheet", "error": describe(&report) }),
        }
    }

    pub fn sync(report: Report<SyncError>) -> Self {
        if matches!(report.current_context(), SyncError::CapacityExceeded { .. }) {
            return Self::invalid_payload(format!(
                "Invalid payload: {}",
                report.current_context()
            ));
        }
        Self::sheet_update(report)
    }

    pub fn run(report: Report<RunError>) -> Self {
        error!("Error /api/make/run: {:?}", report);
        match report.current_context() {
            RunError::MissingConfiguration => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: json!({ "error": RunError::MissingConfiguration.to_string() }),
            },
            RunError::Upstream { status, body } => Self {
                status: StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                body: json!({ "error": "Run failed", "status": status, "details": body }),
            },
            RunError::Transport => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: json!({ "error": describe(&report) }),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use error_stack::{report, ResultExt};

    use super::*;
    use crate::application::contact_sync::ReadError;

    #[test]
    fn test_describe_joins_contexts() {
        let report = Err::<(), _>(report!(RunError::Transport))
            .attach_printable("not shown")
            .change_context(ReadError::Read)
            .unwrap_err();
        assert_eq!(
            describe(&report),
            "Failed to read contacts: Could not reach the automation service"
        );
    }

    #[test]
    fn test_capacity_is_a_client_error() {
        let error = ApiError::sync(report!(SyncError::CapacityExceeded {
            count: 1000,
            capacity: 999
        }));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            error.body["message"],
            "Invalid payload: 1000 contacts do not fit in the sheet (capacity 999)"
        );
    }

    #[test]
    fn test_write_failure_is_a_server_error() {
        let error = ApiError::sync(report!(SyncError::Write));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.body["message"], "Error updating sheet");
        assert_eq!(error.body["error"], "Failed to write contacts");
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let error = ApiError::run(report!(RunError::Upstream {
            status: 429,
            body: "slow down".to_string()
        }));
        assert_eq!(error.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            error.body,
            json!({ "error": "Run failed", "status": 429, "details": "slow down" })
        );
    }

    #[test]
    fn test_missing_run_configuration() {
        let error = ApiError::run(report!(RunError::MissingConfiguration));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.body, json!({ "error": "Missing MAKE_TOKEN or SCENARIO_ID" }));
    }
}
