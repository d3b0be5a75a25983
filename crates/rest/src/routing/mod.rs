//! Route configuration for the hospital records API.
//!
//! This module contains the routing configuration that maps HTTP paths
//! to handlers.

pub mod routes;

pub use routes::{create_routes, resource_routes};
