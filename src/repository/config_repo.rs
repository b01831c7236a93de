// ==========================================
// XML 配置迁移工具 - 配置数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 对齐: config_setting（只读）/ config_value（读写）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::setting::ConfigSetting;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigRepository - 配置数据仓储
// ==========================================
/// 配置数据仓储
/// 职责: config_setting 表的只读查询，config_value 表的读写
/// 红线: 不含业务逻辑，只负责数据访问
pub struct ConfigRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigRepository {
    /// 创建新的 ConfigRepository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按名称查询配置项 ID（精确匹配）
    ///
    /// # 返回
    /// - Ok(Some(i64)): 找到配置项
    /// - Ok(None): 名称不存在
    pub fn find_setting_id_by_name(&self, name: &str) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let id = conn
            .query_row(
                "SELECT id FROM config_setting WHERE name = ?1",
                params![name],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        Ok(id)
    }

    /// 按 ID 查询配置项定义
    pub fn find_setting_by_id(&self, config_id: i64) -> RepositoryResult<Option<ConfigSetting>> {
        let conn = self.get_conn()?;
        let setting = conn
            .query_row(
                "SELECT id, name, parent_id, allow_multiple
                 FROM config_setting
                 WHERE id = ?1",
                params![config_id],
                |row| {
                    Ok(ConfigSetting {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        parent_id: row.get(2)?,
                        allow_multiple: row.get::<_, i64>(3)? != 0,
                    })
                },
            )
            .optional()?;
        Ok(setting)
    }

    /// 按配置项名称查询其父级配置项的名称
    ///
    /// # 返回
    /// - Ok(Some(String)): 父级名称
    /// - Ok(None): 配置项不存在，或为顶层配置项（parent_id 为 NULL）
    pub fn parent_name_by_setting_name(&self, name: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let parent = conn
            .query_row(
                "SELECT name FROM config_setting
                 WHERE id = (SELECT parent_id FROM config_setting WHERE name = ?1)",
                params![name],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(parent)
    }

    /// 查询配置项的多值策略
    ///
    /// # 返回
    /// - Ok(bool): allow_multiple 标志
    /// - Err(NotFound): 配置项不存在
    pub fn allow_multiple(&self, config_id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let flag = conn
            .query_row(
                "SELECT allow_multiple FROM config_setting WHERE id = ?1",
                params![config_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        match flag {
            Some(v) => Ok(v != 0),
            None => Err(RepositoryError::NotFound {
                entity: "config_setting".to_string(),
                id: config_id.to_string(),
            }),
        }
    }

    /// 查询配置项当前存储的全部值
    ///
    /// # 返回
    /// - Ok(Vec<String>): 按插入顺序返回；无值时为空向量
    pub fn list_values(&self, config_id: i64) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT value FROM config_value WHERE config_id = ?1 ORDER BY id",
        )?;

        let rows = stmt.query_map(params![config_id], |row| row.get::<_, String>(0))?;

        let mut values = Vec::new();
        for row in rows {
            values.push(row?);
        }
        Ok(values)
    }

    /// 插入一条配置值
    pub fn insert_value(&self, config_id: i64, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_value (config_id, value) VALUES (?1, ?2)",
            params![config_id, value],
        )?;
        Ok(())
    }

    /// 覆写配置项的现有值（UPDATE 按 config_id 作用于全部现有行）
    ///
    /// # 返回
    /// - Ok(usize): 受影响的行数
    pub fn update_values(&self, config_id: i64, value: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE config_value SET value = ?1 WHERE config_id = ?2",
            params![value, config_id],
        )?;
        Ok(affected)
    }
}
