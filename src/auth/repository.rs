// Credential stores: login -> password hash persistence

use axum::async_trait;
use tokio::sync::RwLock;

use crate::auth::{error::AuthError, models::User};
use crate::db::DbPool;

/// Storage for registered users
///
/// Logins are unique (exact, case-sensitive match). Implementations must make
/// `create` atomic with respect to that check.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create a new user, failing with `DuplicateLogin` if the login is taken
    async fn create(&self, login: &str, password_hash: &str) -> Result<User, AuthError>;

    /// Find a user by exact login
    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AuthError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError>;
}

/// SQLite-backed credential store; uniqueness comes from the table constraint
#[derive(Clone)]
pub struct SqliteCredentialStore {
    pool: DbPool,
}

impl SqliteCredentialStore {
    /// Create a new SqliteCredentialStore
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for SqliteCredentialStore {
    async fn create(&self, login: &str, password_hash: &str) -> Result<User, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (login, password_hash) VALUES (?, ?) RETURNING id, login, password_hash",
        )
        .bind(login)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AuthError::DuplicateLogin;
                }
            }
            AuthError::DatabaseError(e.to_string())
        })?;

        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, password_hash FROM users WHERE login = ?",
        )
        .bind(login)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, login, password_hash FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// In-process credential store; check-then-insert runs under the write lock
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, login: &str, password_hash: &str) -> Result<User, AuthError> {
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.login == login) {
            return Err(AuthError::DuplicateLogin);
        }

        let user = User {
            id: users.last().map_or(1, |u| u.id + 1),
            login: login.to_string(),
            password_hash: password_hash.to_string(),
        };
        users.push(user.clone());

        Ok(user)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.login == login).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AuthError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}
