//! User repository.

use chrono::Utc;

use techshop_core::{Email, UserId};

use super::{Collection, JsonStore, RepositoryError};
use crate::models::user::{NewUser, User};

/// Collection name for users.
pub const COLLECTION: &str = "users";

/// Repository for user accounts.
#[derive(Clone)]
pub struct UserRepository {
    users: Collection<User>,
}

impl UserRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: &JsonStore) -> Self {
        Self {
            users: store.collection(COLLECTION),
        }
    }

    /// Look up a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn get(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.load()?.into_iter().find(|u| u.id == id))
    }

    /// Look up a user by email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.load()?.into_iter().find(|u| u.email == *email))
    }

    /// Look up a user by login identifier: email address or phone number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io`/`Corrupt` if the collection cannot be
    /// loaded.
    pub fn find_by_login(&self, login: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .load()?
            .into_iter()
            .find(|u| u.email.as_str() == login || u.phone.as_deref() == Some(login)))
    }

    /// Create a user with the next free ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is already
    /// registered.
    pub async fn create(&self, new: NewUser) -> Result<User, RepositoryError> {
        self.users
            .with_mut(|users| {
                if users.iter().any(|u| u.email == new.email) {
                    return Err(RepositoryError::Conflict(
                        "email already registered".to_owned(),
                    ));
                }

                let id = users.iter().map(|u| u.id.as_i32()).max().unwrap_or(0) + 1;
                let user = User {
                    id: UserId::new(id),
                    name: new.name,
                    email: new.email,
                    phone: new.phone,
                    password_hash: new.password_hash,
                    is_admin: new.is_admin,
                    created_at: Utc::now(),
                };
                users.push(user.clone());
                Ok(user)
            })
            .await
    }

    /// Update a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown ID and
    /// `RepositoryError::Conflict` if the new email belongs to another
    /// account.
    pub async fn update_profile(
        &self,
        id: UserId,
        name: String,
        email: Email,
        phone: Option<String>,
    ) -> Result<User, RepositoryError> {
        self.users
            .with_mut(|users| {
                if users.iter().any(|u| u.id != id && u.email == email) {
                    return Err(RepositoryError::Conflict(
                        "email already registered".to_owned(),
                    ));
                }

                let user = users
                    .iter_mut()
                    .find(|u| u.id == id)
                    .ok_or(RepositoryError::NotFound)?;
                user.name = name;
                user.email = email;
                user.phone = phone;
                Ok(user.clone())
            })
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_user(name: &str, email: &str, phone: Option<&str>) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: Email::parse(email).unwrap(),
            phone: phone.map(str::to_string),
            password_hash: "$argon2id$stub".to_string(),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_max_plus_one() {
        let repo = UserRepository::new(&JsonStore::in_memory());
        let first = repo
            .create(new_user("Amina", "amina@example.com", None))
            .await
            .unwrap();
        let second = repo
            .create(new_user("Karim", "karim@example.com", None))
            .await
            .unwrap();

        assert_eq!(first.id, UserId::new(1));
        assert_eq!(second.id, UserId::new(2));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = UserRepository::new(&JsonStore::in_memory());
        repo.create(new_user("Amina", "amina@example.com", None))
            .await
            .unwrap();

        let result = repo
            .create(new_user("Impostor", "amina@example.com", None))
            .await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));

        // First account intact
        let existing = repo
            .find_by_email(&Email::parse("amina@example.com").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(existing.name, "Amina");
    }

    #[tokio::test]
    async fn test_find_by_login_email_or_phone() {
        let repo = UserRepository::new(&JsonStore::in_memory());
        repo.create(new_user("Amina", "amina@example.com", Some("0612345678")))
            .await
            .unwrap();

        assert!(repo.find_by_login("amina@example.com").unwrap().is_some());
        assert!(repo.find_by_login("0612345678").unwrap().is_some());
        assert!(repo.find_by_login("0699999999").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_profile_email_conflict() {
        let repo = UserRepository::new(&JsonStore::in_memory());
        let amina = repo
            .create(new_user("Amina", "amina@example.com", None))
            .await
            .unwrap();
        repo.create(new_user("Karim", "karim@example.com", None))
            .await
            .unwrap();

        let result = repo
            .update_profile(
                amina.id,
                "Amina".to_string(),
                Email::parse("karim@example.com").unwrap(),
                None,
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));

        // Updating to a new unique email works, including keeping your own
        let updated = repo
            .update_profile(
                amina.id,
                "Amina B".to_string(),
                Email::parse("amina@example.com").unwrap(),
                Some("0612345678".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Amina B");
    }
}
