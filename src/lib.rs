#![doc = "The `donelist` library crate."]
#![doc = ""]
#![doc = "Authentication, the data-access layer, domain models, routing configuration"]
#![doc = "and error handling for the donelist todo backend. The binary (`main.rs`)"]
#![doc = "loads configuration, opens the store and runs the HTTP server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
