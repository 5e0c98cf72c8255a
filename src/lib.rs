//! QuickCart Server - 生鲜电商后端
//!
//! # 架构概述
//!
//! - **HTTP API** (`api`): RESTful API 接口 (axum)
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **订单/支付生命周期** (`lifecycle`): 状态机、编号、金额校验
//!
//! # 模块结构
//!
//! ```text
//! src/
//! ├── core/          # 配置、状态、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repositories)
//! ├── lifecycle/     # 订单/支付生命周期规则
//! └── utils/         # 错误、日志、校验工具
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::db::DbService;
pub use crate::utils::{AppError, AppResult};

/// Load .env and initialize logging. Call once at process start.
pub fn setup_environment() -> anyhow::Result<()> {
    // .env is optional; env vars always win
    dotenv::dotenv().ok();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
    utils::logger::init_logger(&level);

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____        _      __   ______           __
  / __ \__  __(_)____/ /__/ ____/___ ______/ /_
 / / / / / / / / ___/ //_/ /   / __ `/ ___/ __/
/ /_/ / /_/ / / /__/ ,< / /___/ /_/ / /  / /_
\___\_\__,_/_/\___/_/|_|\____/\__,_/_/   \__/
    "#
    );
}
