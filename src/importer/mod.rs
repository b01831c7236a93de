// ==========================================
// XML 配置迁移工具 - 导入层
// ==========================================
// 职责: 外部配置文件导入，写入配置数据库
// 支持: XML
// ==========================================

// 模块声明
pub mod config_importer;
pub mod error;
pub mod xml_parser;

// 重导出核心类型
pub use config_importer::{ConfigImporter, ImportReport};
pub use error::{ImportError, ImportResult};
pub use xml_parser::XmlSource;
