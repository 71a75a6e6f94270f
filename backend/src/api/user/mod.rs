//! Module for account profile endpoints.
//!
//! These routes sit behind the identity middleware and expose information about
//! the authenticated account, distinct from the login/registration flow.

pub mod handlers;
pub mod routes;
