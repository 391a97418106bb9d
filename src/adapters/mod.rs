pub mod automation;
pub mod config;
pub mod http;
pub mod sheets;
