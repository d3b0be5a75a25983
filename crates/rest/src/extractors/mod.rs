//! Axum extractors for record requests.
//!
//! - [`ResourceId`] - The raw `{id}` path segment
//! - [`Params`] - The whitelisted attributes nested under a resource's root key

mod params;
mod resource_id;

pub use params::{Params, parse_params};
pub use resource_id::ResourceId;
