// ==========================================
// XML 配置迁移工具 - 主入口
// ==========================================
// 技术栈: Rust + SQLite
// 调用方式: 无参数；路径通过默认值/环境变量解析
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use config_migrator::db::{has_config_tables, open_sqlite_connection};
use config_migrator::{logging, ConfigImporter, ConfigRepository};

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", config_migrator::APP_NAME);
    tracing::info!("系统版本: {}", config_migrator::VERSION);
    tracing::info!("==================================================");

    // 解析路径
    let xml_path = config_migrator::get_xml_path();
    let db_path = config_migrator::get_db_path();
    tracing::info!("使用 XML 文件: {}", xml_path);
    tracing::info!("使用数据库: {}", db_path);

    // 打开数据库连接（统一 PRAGMA）
    let conn = open_sqlite_connection(&db_path)
        .with_context(|| format!("无法打开数据库: {}", db_path))?;

    // schema 由宿主应用管理，这里只做启动检查
    if !has_config_tables(&conn)? {
        anyhow::bail!("配置表缺失（config_setting / config_value），请先初始化宿主应用 schema");
    }

    // 执行导入
    let repo = ConfigRepository::from_connection(Arc::new(Mutex::new(conn)));
    let importer = ConfigImporter::new(repo);
    let report = importer
        .import_from_file(Path::new(&xml_path))
        .context("配置导入失败")?;

    tracing::info!(
        "迁移完成: 插入 {} / 覆写 {} / 重复跳过 {} / 无匹配跳过 {} / 父级不一致跳过 {}",
        report.inserted,
        report.updated,
        report.skipped_duplicate,
        report.skipped_unknown,
        report.skipped_parent_mismatch,
    );

    Ok(())
}
