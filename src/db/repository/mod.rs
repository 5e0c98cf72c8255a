//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. One repository per
//! table, all sharing a [`BaseRepository`] database handle.

// Accounts
pub mod user;

// Catalog
pub mod product;

// Contact
pub mod contact;

// Order/Payment lifecycle
pub mod order;
pub mod payment;

// Re-exports
pub use contact::ContactRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Whether a storage error is a unique-index violation. The embedded engine
/// reports these only through the error text.
pub fn is_unique_violation(err: &surrealdb::Error) -> bool {
    let msg = err.to_string().to_lowercase();
    msg.contains("already contains") || msg.contains("unique") || msg.contains("duplicate")
}

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "order:abc".parse()?;
//   - 创建: let id = RecordId::from_table_key("order", "abc");
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Parse an id that may arrive as `table:key` or as a bare key.
pub fn record_id(table: &str, id: &str) -> RecordId {
    if id.contains(':') {
        id.parse()
            .unwrap_or_else(|_| RecordId::from_table_key(table, id))
    } else {
        RecordId::from_table_key(table, id)
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
