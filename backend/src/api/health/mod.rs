//! Module for the service health probe.
//!
//! The frontend polls this endpoint to show whether the API is reachable.

pub mod handlers;
pub mod routes;
