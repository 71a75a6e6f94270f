//! Data structures for authentication-related entities.
//!
//! This module defines the request and response bodies of the auth endpoints,
//! the JWT claim set, and `CurrentAccount`, the password-free view of an account
//! that the identity middleware hands to protected handlers.

use chrono::{DateTime, Utc};
use restosys_adapters::{AccountDocument, ObjectId};
use serde::{Deserialize, Serialize};

use super::AuthError;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "nombre_empresa")]
    pub company_name: String,
    #[serde(default)]
    pub logo: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("nombre_empresa", &self.company_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), AuthError> {
        require("email", &self.email)?;
        require("password", &self.password)
    }
}

fn require(field: &str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        return Err(AuthError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// JWT claims for session tokens
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Account id (hex object id)
    pub id: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

/// Authenticated account attached to the request. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentAccount {
    pub id: ObjectId,
    pub email: String,
    #[serde(rename = "nombre_empresa")]
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(rename = "sucursales")]
    pub branches: Vec<ObjectId>,
    #[serde(rename = "creado_en")]
    pub created_at: DateTime<Utc>,
}

impl From<AccountDocument> for CurrentAccount {
    fn from(doc: AccountDocument) -> Self {
        Self {
            id: doc.id,
            email: doc.email,
            company_name: doc.company_name,
            logo: doc.logo,
            branches: doc.branches,
            created_at: doc.created_at,
        }
    }
}
