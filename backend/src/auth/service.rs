//! Core business logic for the authentication system.
//!
//! This service handles account creation, password hashing, token issuance and
//! validation. It orchestrates interactions between the handlers, the identity
//! middleware and the account store.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use restosys_adapters::{AccountStore, NewAccount, ObjectId};
use tracing::{debug, info};

use super::errors::AuthError;
use super::models::{Claims, CurrentAccount, LoginRequest, RegisterRequest};

/// Lifetime of a session token.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Verified against when the email is unknown, so both login failures cost one
/// Argon2 verification.
const DUMMY_PASSWORD: &str = "restosys-timing-equalizer";

// ─── Tokens ───

/// Issues and verifies HS256 session tokens with a process-wide secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Signing("signing secret is empty".into()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(&self, account_id: &ObjectId) -> Result<String, AuthError> {
        self.issue_at(account_id, Utc::now())
    }

    /// Token as if issued at `issued_at`; expiry is always `TOKEN_TTL_DAYS` later.
    pub fn issue_at(
        &self,
        account_id: &ObjectId,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let claims = Claims {
            id: account_id.to_hex(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Returns the account id carried by a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<ObjectId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        // Expired at exactly `exp`, not one second after.
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(AuthError::InvalidToken("token expired".into()));
        }

        ObjectId::parse(&data.claims.id).map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

// ─── Passwords ───

fn hash_blocking(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn verify_blocking(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hashing(e.to_string())),
    }
}

/// Salted Argon2id hash in PHC format, computed off the async workers.
pub async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_blocking(&password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

// ─── Accounts ───

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    tokens: Arc<TokenService>,
    dummy_hash: Arc<str>,
}

impl AuthService {
    pub fn new(store: Arc<dyn AccountStore>, tokens: TokenService) -> Result<Self, AuthError> {
        Ok(Self {
            store,
            tokens: Arc::new(tokens),
            dummy_hash: hash_blocking(DUMMY_PASSWORD)?.into(),
        })
    }

    pub fn store(&self) -> &Arc<dyn AccountStore> {
        &self.store
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Creates the account and returns a session token for it.
    pub async fn register(&self, req: RegisterRequest) -> Result<String, AuthError> {
        req.validate()?;

        if self.store.find_by_email(&req.email).await?.is_some() {
            return Err(AuthError::DuplicateKey(req.email));
        }

        let password_hash = hash_password(req.password).await?;
        // The store's unique index still decides races between concurrent sign-ups.
        let account = self
            .store
            .create(NewAccount {
                email: req.email,
                password_hash,
                company_name: req.company_name,
                logo: req.logo,
            })
            .await?;

        info!(account = %account.id, "account registered");
        self.tokens.issue(&account.id)
    }

    pub async fn login(&self, req: LoginRequest) -> Result<String, AuthError> {
        req.validate()?;

        let account = self.store.find_by_email(&req.email).await?;
        let hash = match &account {
            Some(doc) => doc.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let valid = verify_password(req.password, hash).await?;

        match account {
            Some(doc) if valid => {
                debug!(account = %doc.id, "login succeeded");
                self.tokens.issue(&doc.id)
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    /// Resolves a bearer token to the account it names.
    pub async fn resolve(&self, token: &str) -> Result<CurrentAccount, AuthError> {
        let id = self.tokens.verify(token)?;
        let account = self
            .store
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AuthError::UnknownAccount(id.to_hex()))?;
        Ok(account.into())
    }
}
