//! Clients - HTTP Clients for External APIs
//!
//! This module contains the client for the record store REST API.

pub mod record_store_client;

pub use record_store_client::{HttpRecordStore, RecordStore};
