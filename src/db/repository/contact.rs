//! Contact Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ContactCreate, ContactMessage};
use crate::utils::now_millis;

const TABLE: &str = "contact";

#[derive(Clone)]
pub struct ContactRepository {
    base: BaseRepository,
}

impl ContactRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a contact-form message
    pub async fn create(&self, data: ContactCreate) -> RepoResult<ContactMessage> {
        let message = ContactMessage {
            id: None,
            name: data.name,
            email: data.email,
            subject: data.subject,
            message: data.message,
            created_at: now_millis(),
        };

        let created: Option<ContactMessage> =
            self.base.db().create(TABLE).content(message).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create contact message".to_string()))
    }

    /// All messages, newest first (admin)
    pub async fn find_all(&self) -> RepoResult<Vec<ContactMessage>> {
        let messages: Vec<ContactMessage> = self
            .base
            .db()
            .query("SELECT * FROM contact ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(messages)
    }
}
