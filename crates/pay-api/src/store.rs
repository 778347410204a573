//! # User Directory Store
//!
//! SQLite-backed CRUD over the only persisted entity in the system.
//! Usernames are unique; emails are unique and normalized (trimmed,
//! lower-cased) before they hit the database. Unique-constraint
//! violations surface as `PaymentError::Conflict`.

use pay_core::{is_valid_email, PaymentError, PaymentResult, ValidationError};
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email    TEXT NOT NULL UNIQUE
)
"#;

/// A user directory entry
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// SQLite-backed user store
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// Open (or create) the store at `database_url` and run migrations.
    ///
    /// A single connection: SQLite serializes writers anyway, and
    /// `sqlite::memory:` databases exist per-connection.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        sqlx::query(CREATE_USERS_TABLE).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// All users, in id order
    pub async fn list(&self) -> PaymentResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT id, username, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)
    }

    /// Insert a new user from raw input
    pub async fn create(&self, username: &str, email: &str) -> PaymentResult<User> {
        let username = username.trim().to_string();
        let email = normalize_email(email);

        let errors = validate_user(&username, &email);
        if !errors.is_empty() {
            return Err(PaymentError::Validation(errors));
        }

        let result = sqlx::query("INSERT INTO users (username, email) VALUES (?1, ?2)")
            .bind(&username)
            .bind(&email)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(User {
            id: result.last_insert_rowid(),
            username,
            email,
        })
    }

    /// Fetch one user by id
    pub async fn get(&self, id: i64) -> PaymentResult<User> {
        sqlx::query_as::<_, User>("SELECT id, username, email FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?
            .ok_or_else(|| PaymentError::NotFound("user".to_string()))
    }

    /// Apply the provided fields to an existing user
    pub async fn update(
        &self,
        id: i64,
        username: Option<String>,
        email: Option<String>,
    ) -> PaymentResult<User> {
        let mut user = self.get(id).await?;

        if let Some(username) = username {
            user.username = username.trim().to_string();
        }
        if let Some(email) = email {
            user.email = normalize_email(&email);
        }

        let errors = validate_user(&user.username, &user.email);
        if !errors.is_empty() {
            return Err(PaymentError::Validation(errors));
        }

        sqlx::query("UPDATE users SET username = ?1, email = ?2 WHERE id = ?3")
            .bind(&user.username)
            .bind(&user.email)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(user)
    }

    /// Remove a user by id
    pub async fn delete(&self, id: i64) -> PaymentResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        if result.rows_affected() == 0 {
            return Err(PaymentError::NotFound("user".to_string()));
        }
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_user(username: &str, email: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if username.len() < 2 {
        errors.push(ValidationError::new(
            "username",
            "must be at least 2 characters",
        ));
    }
    if !is_valid_email(email) {
        errors.push(ValidationError::new(
            "email",
            "must be a valid email address",
        ));
    }
    errors
}

fn map_sqlx_err(err: sqlx::Error) -> PaymentError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            PaymentError::Conflict("username or email already exists".to_string())
        }
        _ => PaymentError::Internal(err.to_string()),
    }
}
