use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是整个服务的核心数据结构。
/// `Surreal<Db>` 内部是 Arc，Clone 成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造，测试场景使用)
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// 初始化服务器状态
    ///
    /// 1. 确保数据目录存在
    /// 2. 打开数据库 (data_dir/quickcart.db) 并应用 schema
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let data_dir = std::path::Path::new(&config.data_dir);
        std::fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Internal(format!(
                "Failed to create data directory {}: {e}",
                config.data_dir
            ))
        })?;

        let db_service = DbService::new(&data_dir.join("quickcart.db")).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 初始化内存数据库状态 (集成测试使用)
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::new_memory().await?;
        Ok(Self::new(config.clone(), db_service.db))
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
