pub mod contact_sync;
