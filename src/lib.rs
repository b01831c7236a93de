// ==========================================
// XML 配置迁移工具 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 一次性迁移工具（schema 由宿主应用管理）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::ConfigSetting;

// 仓储
pub use repository::{ConfigRepository, RepositoryError};

// 导入器
pub use importer::{ConfigImporter, ImportError, ImportReport, XmlSource};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "XML 配置迁移工具";

// 默认 XML 文件路径（可通过环境变量 CONFIG_MIGRATOR_XML_PATH 覆盖）
pub const DEFAULT_XML_PATH: &str = "./project/config.xml";

// 默认数据库路径（可通过环境变量 CONFIG_MIGRATOR_DB_PATH 覆盖）
pub const DEFAULT_DB_PATH: &str = "./config_migrator.db";

// ==========================================
// 路径解析
// ==========================================

/// 解析 XML 文件路径
///
/// 允许通过环境变量显式指定（便于调试/测试/CI）
pub fn get_xml_path() -> String {
    resolve_path("CONFIG_MIGRATOR_XML_PATH", DEFAULT_XML_PATH)
}

/// 解析数据库文件路径
pub fn get_db_path() -> String {
    resolve_path("CONFIG_MIGRATOR_DB_PATH", DEFAULT_DB_PATH)
}

fn resolve_path(env_key: &str, default: &str) -> String {
    if let Ok(path) = std::env::var(env_key) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    default.to_string()
}
