//! # Authentication Module
//!
//! Password hashing, email/password authentication and the session-backed
//! [`CurrentAccount`] extractor used by every page that requires a login.
//!
//! Passwords are hashed with Argon2 and a random salt; only the PHC string
//! is stored.

use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use eyre::Result;
use labslot_core::{errors::LabResult, models::account::Account, repositories::AccountRepository};
use rand::rngs::OsRng;
use tower_sessions::Session;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error_handling::AppError;
use crate::{ApiState, routes::paths};

/// Session key holding the logged-in account id.
pub const ACCOUNT_SESSION_KEY: &str = "account_id";

/// Hashes a password using the Argon2 algorithm
///
/// Returns the hash in PHC string format, which embeds the algorithm,
/// parameters and salt.
///
/// # Example
///
/// ```
/// let hashed = labslot_api::middleware::auth::hash_password("user_password").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash. A malformed hash never
/// verifies.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash could not be parsed: {}", e);
            false
        }
    }
}

/// Looks up an account by (normalized) email and checks the password.
///
/// Returns `None` for an unknown email, a wrong password or an inactive
/// account; callers do not learn which.
pub async fn authenticate(
    accounts: &dyn AccountRepository,
    email: &str,
    password: &str,
) -> LabResult<Option<Account>> {
    debug!("Attempting to authenticate account with email: {}", email);

    let Some(account) = accounts.find_account_by_email(email).await? else {
        debug!("No account with email {}", email);
        return Ok(None);
    };

    if !account.is_active || !verify_password(password, &account.password_hash) {
        debug!("Credentials rejected for {}", email);
        return Ok(None);
    }

    Ok(Some(account))
}

/// Binds `account` to the session under a fresh session id.
pub async fn start_session(session: &Session, account: &Account) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.insert(ACCOUNT_SESSION_KEY, account.id).await?;
    Ok(())
}

/// The active account bound to the session, if any.
pub async fn session_account(
    session: &Session,
    state: &ApiState,
) -> Result<Option<Account>, AppError> {
    let Some(account_id) = session.get::<Uuid>(ACCOUNT_SESSION_KEY).await? else {
        return Ok(None);
    };

    let account = state.accounts.find_account_by_id(account_id).await?;
    Ok(account.filter(|a| a.is_active))
}

/// The logged-in account. Requests without one are redirected to the login
/// page.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

#[async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentAccount {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match session_account(&session, state).await {
            Ok(Some(account)) => Ok(Self(account)),
            Ok(None) => Err(Redirect::to(paths::LOGIN).into_response()),
            Err(err) => Err(err.into_response()),
        }
    }
}
