//! Domain types and validation rules for the grocery list service.
//!
//! Nothing in this crate performs I/O; the `db`, `api` and `client` crates
//! build on these types.

pub mod error;
pub mod grocery;
pub mod item;
pub mod types;
