//! Central module for organizing the application's main API endpoints.
//!
//! This module groups the non-authentication API domains: the public health
//! probe and the authenticated account profile.

pub mod health;
pub mod user;
