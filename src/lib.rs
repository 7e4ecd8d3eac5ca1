//! JSON-file backed asset tracking service.
//!
//! The binary in `main.rs` wires configuration, logging and the listener;
//! everything else lives here so integration tests can build the same router.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
