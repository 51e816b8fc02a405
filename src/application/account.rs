//! Account service: registration and balance lookups.
//!
//! Credential hashing and verification belong to the caller; the ledger
//! only stores whatever opaque credential it is given.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::money::Amount;
use crate::domain::{NewUser, User, UserId};
use crate::error::Result;
use crate::port::outbound::ledger::LedgerStore;

/// Registers users and reads their balances.
pub struct AccountService<S> {
    store: Arc<S>,
    starting_balance: Amount,
}

impl<S> Clone for AccountService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            starting_balance: self.starting_balance,
        }
    }
}

impl<S: LedgerStore> AccountService<S> {
    /// Create an account service granting `starting_balance` to new users.
    pub const fn new(store: Arc<S>, starting_balance: Amount) -> Self {
        Self {
            store,
            starting_balance,
        }
    }

    /// Balance granted at registration.
    #[must_use]
    pub const fn starting_balance(&self) -> Amount {
        self.starting_balance
    }

    /// Register a user with the starting balance.
    ///
    /// # Errors
    /// Returns `InvalidUsername` for empty input, `UsernameTaken` for a
    /// duplicate, or a storage error.
    pub async fn register(&self, username: &str, credential: &str) -> Result<User> {
        let new_user = NewUser::try_new(username, credential, self.starting_balance)?;
        let user = self.store.insert_user(&new_user).await?;
        info!(user_id = %user.id, username = %user.username, balance = %user.balance, "User registered");
        Ok(user)
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn find(&self, id: UserId) -> Result<Option<User>> {
        self.store.find_user(id).await
    }

    /// Look up a user by username, e.g. to verify a login.
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.store.find_user_by_username(username.trim()).await
    }

    /// Current balance, or zero for an unknown user.
    ///
    /// # Errors
    /// Returns a storage error if the lookup fails.
    pub async fn balance(&self, id: UserId) -> Result<Amount> {
        match self.store.find_user(id).await? {
            Some(user) => Ok(user.balance),
            None => {
                debug!(user_id = %id, "Balance requested for unknown user");
                Ok(Decimal::ZERO)
            }
        }
    }
}
