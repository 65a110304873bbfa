//! Dinosaur API server library.
//!
//! Exposes config, state, error handling, handlers and routes so the
//! integration tests and the binary entrypoint build the same app.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
