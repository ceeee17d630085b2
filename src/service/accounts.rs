//! Registration and login against the accounts table.

use super::validation::validate_password;
use crate::error::AppError;
use crate::models::{AccountOut, Credentials};
use crate::store::Store;

pub const USERNAME_TAKEN: &str = "Username already taken.";
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

pub struct AccountService;

impl AccountService {
    /// Username pre-check, then password rules, then insert. The password is stored as given.
    pub async fn register(store: &dyn Store, creds: &Credentials) -> Result<AccountOut, AppError> {
        let mut session = store.begin().await?;
        if session.find_account_by_username(&creds.username).await?.is_some() {
            tracing::debug!(username = %creds.username, "username already taken");
            return Err(AppError::Conflict(USERNAME_TAKEN.into()));
        }
        if let Err(rule) = validate_password(&creds.password) {
            tracing::debug!(username = %creds.username, ?rule, "weak password rejected");
            return Err(AppError::Validation(rule.to_string()));
        }
        let account = session.insert_account(&creds.username, &creds.password).await?;
        session.commit().await?;
        tracing::info!(account_id = account.id, username = %account.username, "account registered");
        Ok(account.into())
    }

    /// Exact match on the stored password. Unknown user and wrong password are indistinguishable.
    pub async fn login(store: &dyn Store, creds: &Credentials) -> Result<(), AppError> {
        let mut session = store.begin().await?;
        let account = session.find_account_by_username(&creds.username).await?;
        session.commit().await?;
        match account {
            Some(a) if a.password == creds.password => {
                tracing::info!(account_id = a.id, "login succeeded");
                Ok(())
            }
            _ => {
                tracing::warn!(username = %creds.username, "login failed");
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
    }
}
