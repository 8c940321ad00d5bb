//! Grocery list API server library.
//!
//! Exposes the building blocks (config, state, error handling, item
//! service, routes) so integration tests and the binary entrypoint can both
//! access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
