//! User Repository
//!
//! email UNIQUE 索引是邮箱唯一性的最终防线；find_by_email 预检只是
//! 为了给出友好错误信息。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, is_unique_violation, record_id};
use crate::db::models::{User, UserSignup};
use crate::utils::now_millis;

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a user account. The password is hashed here; the hash is bound
    /// into a raw query because `User` never serializes it.
    pub async fn create(&self, data: UserSignup) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate("Email already registered".to_string()));
        }

        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;

        let result: Result<Option<User>, _> = self
            .base
            .db()
            .query(
                r#"
                CREATE user SET
                    fullName     = $full_name,
                    email        = $email,
                    passwordHash = $password_hash,
                    phone        = $phone,
                    createdAt    = $created_at
                "#,
            )
            .bind(("full_name", data.full_name))
            .bind(("email", data.email))
            .bind(("password_hash", password_hash))
            .bind(("phone", data.phone))
            .bind(("created_at", now_millis()))
            .await
            .and_then(|mut r| r.take(0));

        match result {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(RepoError::Database("Failed to create user".to_string())),
            Err(e) if is_unique_violation(&e) => {
                Err(RepoError::Duplicate("Email already registered".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Find user by id. Accepts any opaque id string; one that does not
    /// resolve simply returns `None`.
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(record_id(TABLE, id)).await?;
        Ok(user)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(users.into_iter().next())
    }
}
