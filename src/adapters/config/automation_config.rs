use serde::Deserialize;

pub const DEFAULT_MAKE_BASE: &str = "https://eu2.make.com/api/v2";

#[derive(Deserialize, Clone)]
pub struct AutomationConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub scenario_id: Option<String>,
}

impl std::fmt::Debug for AutomationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("scenario_id", &self.scenario_id)
            .finish()
    }
}
