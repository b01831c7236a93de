// ==========================================
// XML 配置迁移工具 - XML 文件解析器
// ==========================================
// 职责: 读取并解析 config.xml，提供叶子节点判定
// 支持: XML (.xml)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;

// ==========================================
// XmlSource - XML 源文件
// ==========================================
// 说明: roxmltree 的 Document 借用源文本，因此先把文件内容
// 读入自有 String，再按需解析。
pub struct XmlSource {
    text: String,
}

impl XmlSource {
    /// 读取 XML 文件
    ///
    /// # 参数
    /// - file_path: XML 文件路径
    ///
    /// # 返回
    /// - Ok(XmlSource): 文件内容
    /// - Err(FileNotFound / UnsupportedFormat / FileReadError)
    pub fn load(file_path: &Path) -> ImportResult<Self> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if ext != "xml" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let text = fs::read_to_string(file_path)?;
        Ok(Self { text })
    }

    /// 从字符串构造（测试用）
    pub fn from_string(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// 解析为 XML 文档树
    pub fn parse(&self) -> ImportResult<Document<'_>> {
        let doc = Document::parse(&self.text)?;
        Ok(doc)
    }
}

/// 判断元素是否含有子元素
///
/// 说明: 文本/空白节点不算子节点，只统计元素节点。
pub fn has_element_children(node: &Node<'_, '_>) -> bool {
    node.children().any(|c| c.is_element())
}

/// 提取叶子元素的文本值
///
/// # 返回
/// - 去除首尾空白后的文本；空元素返回空字符串
pub fn leaf_text(node: &Node<'_, '_>) -> String {
    node.text().unwrap_or("").trim().to_string()
}
