use error_stack::{report, ResultExt};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tracing::{info, instrument, warn};

use crate::{
    adapters::config::automation_config::AutomationConfig,
    ports::workflow_trigger::{RunAcknowledgement, RunError, WorkflowTrigger},
};

pub const TOKEN_PREFIX: &str = "Token ";

/// Make expects `Authorization: Token <value>`; deployments usually store
/// only the raw value.
pub fn normalize_token(token: &str) -> String {
    if token.starts_with(TOKEN_PREFIX) {
        token.to_string()
    } else {
        format!("{}{}", TOKEN_PREFIX, token)
    }
}

/// Blank values count as missing; anything else is used exactly as configured.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.trim().is_empty())
}

/// Starts a Make scenario through `POST {base}/scenarios/{id}/run`.
pub struct MakeScenarioTrigger {
    config: AutomationConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for MakeScenarioTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MakeScenarioTrigger {{ config: {:?} }}", self.config)
    }
}

impl MakeScenarioTrigger {
    pub fn new(config: AutomationConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn run_url(&self, scenario_id: &str) -> String {
        format!(
            "{}/scenarios/{}/run",
            self.config.base_url.trim_end_matches('/'),
            scenario_id
        )
    }
}

#[async_trait::async_trait]
impl WorkflowTrigger for MakeScenarioTrigger {
    #[instrument(name = "MakeScenarioTrigger::trigger_run")]
    async fn trigger_run(&self) -> error_stack::Result<RunAcknowledgement, RunError> {
        let (Some(token), Some(scenario_id)) = (
            non_empty(&self.config.token),
            non_empty(&self.config.scenario_id),
        ) else {
            return Err(report!(RunError::MissingConfiguration));
        };

        let url = self.run_url(scenario_id);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, normalize_token(token))
            .header(ACCEPT, "*/*")
            .send()
            .await
            .change_context(RunError::Transport)
            .attach_printable_lazy(|| format!("POST {} failed", url))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .change_context(RunError::Transport)
            .attach_printable("Failed to read the run response body")?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "scenario run rejected");
            return Err(report!(RunError::Upstream {
                status: status.as_u16(),
                body,
            }));
        }

        info!(scenario_id, "scenario run started");
        Ok(RunAcknowledgement { body })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::post,
        Router,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct Seen {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    async fn run_scenario(
        State(seen): State<Seen>,
        Path(scenario_id): Path<String>,
        headers: HeaderMap,
    ) -> (StatusCode, String) {
        let authorization = headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        seen.calls
            .lock()
            .unwrap()
            .push((scenario_id.clone(), authorization));

        match scenario_id.as_str() {
            "42" => (StatusCode::OK, "{\"executionId\":\"abc\"}".to_string()),
            _ => (StatusCode::FORBIDDEN, "{\"message\":\"denied\"}".to_string()),
        }
    }

    async fn mock_make() -> (String, Seen) {
        let seen = Seen::default();
        let app = Router::new()
            .route("/api/v2/scenarios/{scenario_id}/run", post(run_scenario))
            .with_state(seen.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/api/v2", addr), seen)
    }

    fn trigger(base_url: &str, token: Option<&str>, scenario_id: Option<&str>) -> MakeScenarioTrigger {
        MakeScenarioTrigger::new(AutomationConfig {
            base_url: base_url.to_string(),
            token: token.map(str::to_string),
            scenario_id: scenario_id.map(str::to_string),
        })
    }

    #[test]
    fn test_normalize_token() {
        assert_eq!(normalize_token("abc"), "Token abc");
        assert_eq!(normalize_token("Token abc"), "Token abc");
    }

    #[tokio::test]
    async fn test_successful_run() {
        let (base_url, seen) = mock_make().await;

        let ack = trigger(&base_url, Some("abc"), Some("42"))
            .trigger_run()
            .await
            .unwrap();

        assert_eq!(ack.body, "{\"executionId\":\"abc\"}");
        assert_eq!(
            *seen.calls.lock().unwrap(),
            vec![("42".to_string(), "Token abc".to_string())]
        );
    }

    #[tokio::test]
    async fn test_prefixed_token_is_sent_as_is() {
        let (base_url, seen) = mock_make().await;
        let base_url = format!("{}/", base_url);

        trigger(&base_url, Some("Token abc"), Some("42"))
            .trigger_run()
            .await
            .unwrap();

        assert_eq!(seen.calls.lock().unwrap()[0].1, "Token abc");
    }

    #[tokio::test]
    async fn test_upstream_status_and_body_are_kept() {
        let (base_url, _) = mock_make().await;

        let error = trigger(&base_url, Some("abc"), Some("7"))
            .trigger_run()
            .await
            .unwrap_err();

        assert_eq!(
            error.current_context(),
            &RunError::Upstream {
                status: 403,
                body: "{\"message\":\"denied\"}".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_settings_make_no_request() {
        let (base_url, seen) = mock_make().await;

        for (token, scenario_id) in [(None, Some("42")), (Some("abc"), None), (Some(" "), Some("42"))] {
            let error = trigger(&base_url, token, scenario_id)
                .trigger_run()
                .await
                .unwrap_err();
            assert_eq!(error.current_context(), &RunError::MissingConfiguration);
        }
        assert!(seen.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configured_values_are_sent_untrimmed() {
        let (base_url, seen) = mock_make().await;

        let error = trigger(&base_url, Some("abc"), Some("42 "))
            .trigger_run()
            .await
            .unwrap_err();

        assert!(matches!(
            error.current_context(),
            RunError::Upstream { status: 403, .. }
        ));
        assert_eq!(
            *seen.calls.lock().unwrap(),
            vec![("42 ".to_string(), "Token abc".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let error = trigger("http://127.0.0.1:1", Some("abc"), Some("42"))
            .trigger_run()
            .await
            .unwrap_err();
        assert_eq!(error.current_context(), &RunError::Transport);
    }
}
