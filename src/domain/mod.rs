// ==========================================
// XML 配置迁移工具 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含导入逻辑
// ==========================================

pub mod setting;

// 重导出核心类型
pub use setting::ConfigSetting;
