//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! techshop-cli admin create -e admin@techshop.com -n "Administrator" -p <password>
//! ```

use thiserror::Error;

use techshop_core::{Email, EmailError};
use techshop_storefront::db::{JsonStore, RepositoryError, UserRepository};
use techshop_storefront::models::user::NewUser;
use techshop_storefront::services::auth::hash_password;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// An account already exists with this email.
    #[error("Account already exists with email: {0}")]
    UserExists(String),

    /// Password hashing failed.
    #[error("Password hashing failed")]
    PasswordHash,

    /// Persistence failure.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create a new admin account.
///
/// # Errors
///
/// Returns `AdminError::UserExists` if the email is already registered
/// and `AdminError::InvalidEmail` for a malformed address.
pub async fn create(
    data_dir: &str,
    email: &str,
    name: &str,
    password: &str,
) -> Result<i32, AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    let password_hash = hash_password(password).map_err(|_| AdminError::PasswordHash)?;

    let store = JsonStore::open(data_dir);
    let users = UserRepository::new(&store);

    tracing::info!(email = %email, "Creating admin account");

    let user = users
        .create(NewUser {
            name: name.to_owned(),
            email: email.clone(),
            phone: None,
            password_hash,
            is_admin: true,
        })
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AdminError::UserExists(email.to_string()),
            other => AdminError::Repository(other),
        })?;

    tracing::info!(
        id = %user.id,
        email = %user.email,
        "Admin account created successfully"
    );

    Ok(user.id.as_i32())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_admin() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap();

        let id = create(data_dir, "admin@techshop.com", "Administrator", "s3cure-enough")
            .await
            .unwrap();
        assert_eq!(id, 1);

        let store = JsonStore::open(data_dir);
        let user = UserRepository::new(&store)
            .find_by_email(&Email::parse("admin@techshop.com").unwrap())
            .unwrap()
            .unwrap();
        assert!(user.is_admin);

        // Second create with the same email is rejected
        let result = create(data_dir, "admin@techshop.com", "Administrator", "s3cure-enough").await;
        assert!(matches!(result, Err(AdminError::UserExists(_))));
    }
}
