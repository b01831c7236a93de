// ==========================================
// XML 配置迁移工具 - 配置导入器
// ==========================================
// 职责: 递归遍历 XML 树，按名称+父级匹配配置项定义，
//       依据 allow_multiple 策略写入 config_value
// 流程: 解析 → 递归遍历 → 叶子匹配 → 落库
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::xml_parser::{has_element_children, leaf_text, XmlSource};
use crate::repository::ConfigRepository;
use roxmltree::Node;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// ImportReport - 导入结果统计
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub leaves_scanned: usize,          // 扫描到的叶子节点总数
    pub inserted: usize,                // 新插入的值
    pub updated: usize,                 // 覆写的值（allow_multiple=false）
    pub skipped_duplicate: usize,       // 重复值跳过（allow_multiple=true）
    pub skipped_unknown: usize,         // 名称无匹配配置项，跳过
    pub skipped_parent_mismatch: usize, // 父级不一致，跳过
}

// ==========================================
// ConfigImporter - 配置导入器
// ==========================================
pub struct ConfigImporter {
    repo: ConfigRepository,
}

impl ConfigImporter {
    /// 创建新的 ConfigImporter 实例
    ///
    /// # 参数
    /// - repo: 配置数据仓储
    pub fn new(repo: ConfigRepository) -> Self {
        Self { repo }
    }

    /// 从 XML 文件导入配置
    ///
    /// # 参数
    /// - file_path: XML 文件路径（.xml）
    ///
    /// # 返回
    /// - Ok(ImportReport): 导入结果统计
    /// - Err: 文件/解析/数据库错误
    pub fn import_from_file(&self, file_path: &Path) -> ImportResult<ImportReport> {
        info!(file_path = %file_path.display(), "开始导入配置");
        let source = XmlSource::load(file_path)?;
        self.import_source(&source)
    }

    /// 从已读取的 XML 源导入配置
    pub fn import_source(&self, source: &XmlSource) -> ImportResult<ImportReport> {
        let doc = source.parse()?;

        let mut report = ImportReport::default();
        // 遍历从根元素自身开始；根元素的标签名即其直接子叶子的父级上下文
        self.walk(doc.root_element(), None, &mut report)?;

        info!(
            leaves_scanned = report.leaves_scanned,
            inserted = report.inserted,
            updated = report.updated,
            skipped_duplicate = report.skipped_duplicate,
            skipped_unknown = report.skipped_unknown,
            skipped_parent_mismatch = report.skipped_parent_mismatch,
            "配置导入完成"
        );
        Ok(report)
    }

    /// 递归遍历 XML 子树
    ///
    /// # 参数
    /// - node: 当前元素
    /// - parent_key: 遍历上下文中的父级标签名（根元素自身为 None）
    fn walk(
        &self,
        node: Node<'_, '_>,
        parent_key: Option<&str>,
        report: &mut ImportReport,
    ) -> ImportResult<()> {
        let name = node.tag_name().name();
        if has_element_children(&node) {
            // 含子元素：以当前标签名作为下一层的父级上下文
            for child in node.children().filter(|c| c.is_element()) {
                self.walk(child, Some(name), report)?;
            }
        } else {
            let value = leaf_text(&node);
            self.process_leaf(name, parent_key, &value, report)?;
        }
        Ok(())
    }

    /// 处理单个叶子节点
    ///
    /// 匹配规则:
    /// 1. 按名称精确查找配置项；无匹配 → 跳过（非错误）
    /// 2. 核对库中记录的父级名称与遍历上下文一致；不一致 → 跳过
    ///    （防止不同分支下同名叶子的串写）
    fn process_leaf(
        &self,
        name: &str,
        parent_key: Option<&str>,
        value: &str,
        report: &mut ImportReport,
    ) -> ImportResult<()> {
        report.leaves_scanned += 1;

        let config_id = match self.repo.find_setting_id_by_name(name)? {
            Some(id) => id,
            None => {
                debug!(name = %name, "无匹配配置项，跳过");
                report.skipped_unknown += 1;
                return Ok(());
            }
        };

        let stored_parent = self.repo.parent_name_by_setting_name(name)?;
        if stored_parent.as_deref() != parent_key {
            debug!(
                name = %name,
                expected = ?parent_key,
                stored = ?stored_parent,
                "父级不一致，跳过"
            );
            report.skipped_parent_mismatch += 1;
            return Ok(());
        }

        self.write_value(config_id, name, value, report)
    }

    /// 按 allow_multiple 策略写入值
    ///
    /// 策略:
    /// - 无现有值 → 插入
    /// - 有现有值且 allow_multiple=false → 覆写
    /// - 有现有值且 allow_multiple=true → 不重复才插入（递归深度相等判定）
    fn write_value(
        &self,
        config_id: i64,
        name: &str,
        value: &str,
        report: &mut ImportReport,
    ) -> ImportResult<()> {
        let allow_multiple = self.repo.allow_multiple(config_id)?;
        let current_values = self.repo.list_values(config_id)?;

        if current_values.is_empty() {
            self.repo.insert_value(config_id, value)?;
            debug!(name = %name, config_id = config_id, "插入新值");
            report.inserted += 1;
        } else if !allow_multiple {
            self.repo.update_values(config_id, value)?;
            debug!(name = %name, config_id = config_id, "覆写现有值");
            report.updated += 1;
        } else if value_already_present(value, &current_values) {
            debug!(name = %name, config_id = config_id, "值已存在，跳过");
            report.skipped_duplicate += 1;
        } else {
            self.repo.insert_value(config_id, value)?;
            debug!(name = %name, config_id = config_id, "追加多值");
            report.inserted += 1;
        }
        Ok(())
    }
}

// ==========================================
// 值相等判定
// ==========================================

/// 把原始文本规整为可比较的值
///
/// 说明: config_value.value 可能是 JSON 结构化负载；能解析为 JSON 的
/// 按结构比较（对格式差异不敏感），否则按纯文本比较。
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// 递归判定 needle 是否出现在 haystack 中
///
/// 规则: 先做整体相等比较，再向下递归进入数组元素与对象的值。
fn json_contains(haystack: &Value, needle: &Value) -> bool {
    if haystack == needle {
        return true;
    }
    match haystack {
        Value::Array(items) => items.iter().any(|item| json_contains(item, needle)),
        Value::Object(map) => map.values().any(|item| json_contains(item, needle)),
        _ => false,
    }
}

/// 判定新值是否已出现在现有值列表中（含嵌套结构）
pub fn value_already_present(new_value: &str, existing: &[String]) -> bool {
    let needle = parse_value(new_value);
    existing
        .iter()
        .any(|raw| json_contains(&parse_value(raw), &needle))
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_string_duplicate() {
        let existing = vec!["smtp.example.org".to_string()];
        assert!(value_already_present("smtp.example.org", &existing));
        assert!(!value_already_present("smtp.backup.org", &existing));
    }

    #[test]
    fn test_scalar_number_duplicate() {
        let existing = vec!["5".to_string()];
        assert!(value_already_present("5", &existing));
        assert!(!value_already_present("6", &existing));
    }

    #[test]
    fn test_nested_json_containment() {
        // 现有值本身是结构化负载，判定需要递归进入
        let existing = vec![r#"["alpha", ["beta", "gamma"]]"#.to_string()];
        assert!(value_already_present("beta", &existing));
        assert!(!value_already_present("delta", &existing));
    }

    #[test]
    fn test_json_duplicate_is_format_insensitive() {
        let existing = vec![r#"{"host": "db1", "port": 3306}"#.to_string()];
        // 键序与空白不同，但结构相同
        assert!(value_already_present(
            r#"{ "port": 3306, "host": "db1" }"#,
            &existing
        ));
        assert!(!value_already_present(
            r#"{"host": "db2", "port": 3306}"#,
            &existing
        ));
    }

    #[test]
    fn test_object_values_are_searched() {
        let existing = vec![r#"{"primary": "db1", "replicas": ["db2", "db3"]}"#.to_string()];
        assert!(value_already_present("db3", &existing));
    }

    #[test]
    fn test_empty_existing_list() {
        assert!(!value_already_present("anything", &[]));
    }
}
