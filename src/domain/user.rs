//! Ledger accounts.

use std::fmt;

use chrono::{DateTime, Utc};

use super::error::DomainError;
use super::id::UserId;
use super::money::Amount;

/// A persisted user.
///
/// The credential is opaque to the ledger: it is stored and handed back to
/// the authentication layer but never inspected here.
#[derive(Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub credential: String,
    pub balance: Amount,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("credential", &"<redacted>")
            .field("balance", &self.balance)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A validated registration that has not been persisted yet.
#[derive(Clone, PartialEq)]
pub struct NewUser {
    username: String,
    credential: String,
    balance: Amount,
}

impl NewUser {
    /// Validate a registration.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidUsername`] if the trimmed username or
    /// the credential is empty.
    pub fn try_new(
        username: &str,
        credential: impl Into<String>,
        balance: Amount,
    ) -> Result<Self, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::InvalidUsername {
                reason: "username is required".into(),
            });
        }
        let credential = credential.into();
        if credential.is_empty() {
            return Err(DomainError::InvalidUsername {
                reason: "credential is required".into(),
            });
        }
        Ok(Self {
            username: username.to_string(),
            credential,
            balance,
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Opening balance.
    #[must_use]
    pub const fn balance(&self) -> Amount {
        self.balance
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("credential", &"<redacted>")
            .field("balance", &self.balance)
            .finish()
    }
}
