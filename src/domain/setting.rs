// ==========================================
// XML 配置迁移工具 - 配置领域模型
// ==========================================
// 对齐: 宿主应用 config_setting 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ConfigSetting - 配置项定义
// ==========================================
// 用途: 宿主应用预置数据，本工具只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSetting {
    // ===== 主键 =====
    pub id: i64, // 配置项唯一标识

    // ===== 基础信息 =====
    pub name: String,           // 配置项名称（XML 叶子标签名）
    pub parent_id: Option<i64>, // 父级配置项（NULL 表示顶层）

    // ===== 多值策略 =====
    pub allow_multiple: bool, // 是否允许同一配置项存储多个值
}
