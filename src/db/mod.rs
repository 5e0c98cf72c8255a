//! Database Module
//!
//! Embedded SurrealDB: RocksDb on disk in production, Mem in tests.
//! Schema definitions (unique indexes) are applied on every startup.

pub mod models;
pub mod repository;

use std::path::Path;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "quickcart";
const DATABASE: &str = "quickcart";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply the schema
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;

        Self::init(db).await
    }

    /// In-memory database for tests
    pub async fn new_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory database: {e}")))?;

        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database connection established (embedded SurrealDB)");

        Ok(Self { db })
    }

    /// Unique indexes back the numbering scheme and email uniqueness.
    /// A same-millisecond, same-suffix collision fails the write and surfaces
    /// as a conflict instead of silently overwriting.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            r#"
            DEFINE INDEX IF NOT EXISTS idx_user_email ON TABLE user FIELDS email UNIQUE;
            DEFINE INDEX IF NOT EXISTS idx_order_number ON TABLE order FIELDS orderNumber UNIQUE;
            DEFINE INDEX IF NOT EXISTS idx_payment_transaction ON TABLE payment FIELDS transactionId UNIQUE;
            "#,
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to apply schema: {e}")))?
        .check()
        .map_err(|e| AppError::Database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database schema applied");
        Ok(())
    }
}
