// ==========================================
// XML 配置迁移工具 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod config_repo;
pub mod error;

// 重导出核心仓储
pub use config_repo::ConfigRepository;
pub use error::{RepositoryError, RepositoryResult};
