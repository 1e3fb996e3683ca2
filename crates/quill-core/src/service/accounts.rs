//! Account service - profile updates, password changes, account deletion.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

/// Fields accepted when updating a profile.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

/// Manages the account-facing flows behind the profile endpoints.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.require(user_id).await
    }

    /// Update profile fields. A changed email must be well-formed and not
    /// already registered to another account.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        input: UpdateProfile,
    ) -> Result<User, DomainError> {
        let mut user = self.require(user_id).await?;

        if let Some(email) = input.email {
            let email = email.trim().to_lowercase();
            if email.is_empty() || !email.contains('@') {
                return Err(DomainError::validation("invalid email address"));
            }
            if email != user.email {
                let taken = self
                    .users
                    .find_by_email(&email)
                    .await
                    .map_err(Self::store_error)?
                    .is_some();
                if taken {
                    return Err(DomainError::Conflict("email already registered".to_string()));
                }
                user.email = email;
            }
        }
        if let Some(display_name) = input.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(bio) = input.bio {
            user.bio = Some(bio);
        }

        user.touch();
        self.users.update(user).await.map_err(Self::store_error)
    }

    /// Change the password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current: &str,
        new: &str,
    ) -> Result<(), DomainError> {
        if new.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let mut user = self.require(user_id).await?;
        self.verify_current(current, &user.password_hash)?;

        user.password_hash = self
            .passwords
            .hash(new)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        user.touch();

        self.users.update(user).await.map_err(Self::store_error)?;
        tracing::info!(%user_id, "password changed");
        Ok(())
    }

    /// Delete the account. Requires the current password; the posts
    /// foreign key cascade removes the account's posts with it.
    pub async fn delete_account(&self, user_id: Uuid, current: &str) -> Result<(), DomainError> {
        let user = self.require(user_id).await?;
        self.verify_current(current, &user.password_hash)?;

        match self.users.delete(user.id).await {
            Ok(()) => {
                tracing::info!(%user_id, "account deleted");
                Ok(())
            }
            Err(RepoError::NotFound) => Err(DomainError::not_found("user", user_id)),
            Err(other) => Err(Self::store_error(other)),
        }
    }

    fn verify_current(&self, password: &str, hash: &str) -> Result<(), DomainError> {
        let valid = self
            .passwords
            .verify(password, hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(DomainError::Unauthorized);
        }
        Ok(())
    }

    async fn require(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::store_error)?
            .ok_or_else(|| DomainError::not_found("user", user_id))
    }

    fn store_error(err: RepoError) -> DomainError {
        match err {
            RepoError::Constraint(message) => DomainError::Conflict(message),
            RepoError::NotFound => DomainError::Internal("row vanished mid-operation".to_string()),
            RepoError::Connection(message) | RepoError::Query(message) => {
                DomainError::Internal(message)
            }
        }
    }
}
