pub mod app_config;
pub mod automation_config;
pub mod server_config;
pub mod sheets_config;
