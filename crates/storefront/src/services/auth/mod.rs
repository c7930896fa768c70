//! Authentication service.
//!
//! Password registration and login for shoppers, plus the separate admin
//! console login. Passwords are hashed with Argon2id; the hash is stored
//! under the `password` key of the users collection.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use techshop_core::{Email, UserId};

use crate::db::{JsonStore, RepositoryError, UserRepository};
use crate::models::user::{NewUser, User};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
pub struct AuthService {
    users: UserRepository,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            users: UserRepository::new(store),
        }
    }

    /// Register a new shopper.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` for an empty name,
    /// `AuthError::InvalidEmail` for a malformed email,
    /// `AuthError::WeakPassword` for a password under the minimum length,
    /// and `AuthError::EmailTaken` if the email is already registered.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        password: &str,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::InvalidInput("name cannot be empty".to_owned()));
        }

        let email = Email::parse(email)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;

        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);

        let user = self
            .users
            .create(NewUser {
                name: name.to_owned(),
                email,
                phone,
                password_hash,
                is_admin: false,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email or phone plus password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if no account matches or
    /// the password is wrong.
    pub async fn login(&self, login: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .users
            .find_by_login(login)?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &user.password_hash)?;

        Ok(user)
    }

    /// Login to the admin console.
    ///
    /// Only accounts carrying the admin flag may open an admin session;
    /// everyone else gets the same `InvalidCredentials` a wrong password
    /// would, so the error does not reveal which accounts are admins.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` on any mismatch.
    pub async fn login_admin(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.login(email, password).await?;

        if !user.is_admin {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users.get(user_id)?.ok_or(AuthError::UserNotFound)
    }

    /// Update a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput`/`InvalidEmail` for bad fields,
    /// `AuthError::EmailTaken` if the email belongs to another account,
    /// and `AuthError::UserNotFound` for an unknown ID.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        name: &str,
        email: &str,
        phone: Option<&str>,
    ) -> Result<User, AuthError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AuthError::InvalidInput("name cannot be empty".to_owned()));
        }

        let email = Email::parse(email)?;
        let phone = phone
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);

        self.users
            .update_profile(user_id, name.to_owned(), email, phone)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Repository(other),
            })
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
