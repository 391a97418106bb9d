use base64::{engine::general_purpose::STANDARD, Engine as _};
use error_stack::{report, ResultExt};
use google_sheets4::oauth2::ServiceAccountKey;
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::sheets_config::CredentialsConfig;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Missing Google credentials. Set GOOGLE_CREDS_B64 or GOOGLE_CREDENTIALS.")]
    Missing,
    #[error("GOOGLE_CREDS_B64 is not valid base64")]
    InvalidBase64,
    #[error("Decoded credentials are not valid UTF-8")]
    InvalidUtf8,
    #[error("Credentials are not a valid service account key")]
    InvalidJson,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Turns literal `\n` sequences into newlines. Some deployment dashboards
/// cannot carry multi-line values, so PEM keys often arrive escaped.
pub fn normalize_private_key(private_key: &str) -> String {
    private_key.replace("\\n", "\n")
}

/// Resolves the service account key, preferring the base64 payload over raw JSON.
#[instrument(skip(config))]
pub fn load_service_account_key(
    config: &CredentialsConfig,
) -> error_stack::Result<ServiceAccountKey, CredentialsError> {
    let raw = match (non_empty(&config.b64), non_empty(&config.json)) {
        (Some(encoded), _) => {
            let bytes = STANDARD
                .decode(encoded)
                .change_context(CredentialsError::InvalidBase64)?;
            String::from_utf8(bytes).change_context(CredentialsError::InvalidUtf8)?
        }
        (None, Some(json)) => json.to_string(),
        (None, None) => return Err(report!(CredentialsError::Missing)),
    };

    let mut key: ServiceAccountKey =
        serde_json::from_str(&raw).change_context(CredentialsError::InvalidJson)?;
    key.private_key = normalize_private_key(&key.private_key);

    Ok(key)
}
