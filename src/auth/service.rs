//! Registration and login workflows.

use crate::db::{Database, NewUser, User, UserRepository};
use crate::retry::RetryPolicy;
use crate::{Result, RoombookError};

use super::password;

/// Orchestrates account registration and credential verification.
pub struct AuthService<'a> {
    db: &'a Database,
    retry: &'a RetryPolicy,
}

impl<'a> AuthService<'a> {
    /// Create an auth service over the shared database and retry policy.
    pub fn new(db: &'a Database, retry: &'a RetryPolicy) -> Self {
        Self { db, retry }
    }

    /// Register a new account.
    ///
    /// The password is hashed once here; the insert is guarded by the email
    /// uniqueness constraint, so a duplicate registration (including a lost
    /// race between two concurrent ones) surfaces as a conflict.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let hashed = password::hash_password(password)?;
        let new_user = NewUser::new(email, name, hashed);

        let pool = self.db.pool();
        self.retry
            .run(|| {
                let new_user = new_user.clone();
                async move { UserRepository::new(pool).create(&new_user).await }
            })
            .await
    }

    /// Verify credentials and return the matching user.
    ///
    /// An unknown email and a wrong password both yield not-found, so the
    /// response does not reveal whether the account exists.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let pool = self.db.pool();
        let user = self
            .retry
            .run(|| async move { UserRepository::new(pool).get_by_email(email).await })
            .await?
            .ok_or_else(|| RoombookError::NotFound("user".to_string()))?;

        if !password::verify_password(password, &user.password)? {
            return Err(RoombookError::NotFound("user".to_string()));
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Role;

    async fn setup() -> (Database, RetryPolicy) {
        let db = Database::open_in_memory().await.unwrap();
        (db, RetryPolicy::default())
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let (db, retry) = setup().await;
        let service = AuthService::new(&db, &retry);

        let user = service
            .register("John", "john@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(user.email, "john@example.com");
        assert_eq!(user.role, Role::User);
        // Stored hash, never the plain password
        assert!(user.password.starts_with("$argon2id$"));

        let authed = service
            .authenticate("john@example.com", "password123")
            .await
            .unwrap();
        assert_eq!(authed.id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let (db, retry) = setup().await;
        let service = AuthService::new(&db, &retry);

        service
            .register("John", "john@example.com", "password123")
            .await
            .unwrap();

        let result = service
            .register("Johnny", "john@example.com", "password456")
            .await;
        assert!(matches!(result, Err(RoombookError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_wrong_password_is_not_found() {
        let (db, retry) = setup().await;
        let service = AuthService::new(&db, &retry);

        service
            .register("John", "john@example.com", "password123")
            .await
            .unwrap();

        let result = service.authenticate("john@example.com", "wrong-password").await;
        assert!(matches!(result, Err(RoombookError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let (db, retry) = setup().await;
        let service = AuthService::new(&db, &retry);

        let result = service.authenticate("nobody@example.com", "password123").await;
        assert!(matches!(result, Err(RoombookError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let (db, retry) = setup().await;
        let service = AuthService::new(&db, &retry);

        let result = service.register("John", "john@example.com", "short").await;
        assert!(matches!(result, Err(RoombookError::Validation(_))));
    }
}
