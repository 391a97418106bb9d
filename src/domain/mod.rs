pub mod contact;
pub mod sheets;

pub use contact::{ContactList, ContactRecord};
