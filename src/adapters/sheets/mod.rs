pub mod auth;
pub mod credentials;
pub mod google_sheets;
pub mod http_client;
pub mod in_memory;
pub mod value_range_factory;
