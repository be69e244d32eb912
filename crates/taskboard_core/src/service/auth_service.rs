//! Username/password auth check.
//!
//! # Responsibility
//! - Register accounts with unique usernames.
//! - Verify login credentials against stored hashes.
//!
//! # Invariants
//! - Passwords are stored as Argon2id PHC strings with a per-user random
//!   salt; plaintext never reaches the repository.
//! - Login failures do not reveal whether the username exists.

use crate::model::user::{Credentials, User};
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use log::{info, warn};

/// Use-case service for registration and login.
pub struct AuthService<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a service using the provided repository implementation.
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Registers a new account.
    ///
    /// Fails with `Conflict` when the username is taken.
    pub fn register(&self, credentials: &Credentials) -> ServiceResult<User> {
        if self
            .users
            .find_by_username(credentials.username.as_str())?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "username already taken: {}",
                credentials.username
            )));
        }

        let password_hash = hash_password(credentials.password.as_str())?;
        let user = self
            .users
            .create_user(credentials.username.as_str(), password_hash.as_str())?;
        info!(
            "event=auth_register module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Checks credentials and returns the matching account.
    pub fn login(&self, credentials: &Credentials) -> ServiceResult<User> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username.as_str())?
        else {
            warn!("event=auth_login module=service status=error error_code=unknown_user");
            return Err(ServiceError::Unauthorized);
        };

        if !verify_password(credentials.password.as_str(), user.password_hash.as_str())? {
            warn!(
                "event=auth_login module=service status=error error_code=bad_password user_id={}",
                user.id
            );
            return Err(ServiceError::Unauthorized);
        }

        info!("event=auth_login module=service status=ok user_id={}", user.id);
        Ok(user)
    }
}

fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::PasswordHash(err.to_string()))
}

fn verify_password(password: &str, stored_hash: &str) -> ServiceResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| ServiceError::PasswordHash(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
