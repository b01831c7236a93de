// ==========================================
// Repository 层集成测试
// ==========================================
// 测试目标: 验证 ConfigRepository 对两张表的数据访问
// ==========================================


use config_migrator::logging;
use config_migrator::repository::{ConfigRepository, RepositoryError};
use test_helpers::{create_test_db, insert_setting, open_test_connection};

#[test]
fn test_find_setting_id_by_name() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    let id = insert_setting(&conn, "timezone", None, false).expect("Failed to insert setting");

    let repo = ConfigRepository::new(&db_path).expect("Failed to create repo");
    assert_eq!(
        repo.find_setting_id_by_name("timezone").expect("Query should succeed"),
        Some(id)
    );
    assert_eq!(
        repo.find_setting_id_by_name("missing").expect("Query should succeed"),
        None
    );
}

#[test]
fn test_parent_name_lookup() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    let database_id =
        insert_setting(&conn, "database", None, false).expect("Failed to insert setting");
    insert_setting(&conn, "host", Some(database_id), false).expect("Failed to insert setting");

    let repo = ConfigRepository::new(&db_path).expect("Failed to create repo");

    // 嵌套: host 的父级是 database
    assert_eq!(
        repo.parent_name_by_setting_name("host").expect("Query should succeed"),
        Some("database".to_string())
    );
    // 顶层: database 无父级
    assert_eq!(
        repo.parent_name_by_setting_name("database").expect("Query should succeed"),
        None
    );
    // 不存在的配置项
    assert_eq!(
        repo.parent_name_by_setting_name("missing").expect("Query should succeed"),
        None
    );
}

#[test]
fn test_find_setting_by_id() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    let mail_id = insert_setting(&conn, "mail", None, false).expect("Failed to insert setting");
    let admin_id =
        insert_setting(&conn, "admin", Some(mail_id), true).expect("Failed to insert setting");

    let repo = ConfigRepository::new(&db_path).expect("Failed to create repo");
    let setting = repo
        .find_setting_by_id(admin_id)
        .expect("Query should succeed")
        .expect("Setting should exist");

    assert_eq!(setting.name, "admin");
    assert_eq!(setting.parent_id, Some(mail_id));
    assert!(setting.allow_multiple);

    assert!(repo
        .find_setting_by_id(9999)
        .expect("Query should succeed")
        .is_none());
}

#[test]
fn test_allow_multiple_flag() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    let single_id = insert_setting(&conn, "single", None, false).expect("Failed to insert setting");
    let multi_id = insert_setting(&conn, "multi", None, true).expect("Failed to insert setting");

    let repo = ConfigRepository::new(&db_path).expect("Failed to create repo");
    assert!(!repo.allow_multiple(single_id).expect("Query should succeed"));
    assert!(repo.allow_multiple(multi_id).expect("Query should succeed"));

    // 不存在的配置项 → NotFound
    let result = repo.allow_multiple(9999);
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_insert_and_list_values_preserves_order() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    let id = insert_setting(&conn, "admin", None, true).expect("Failed to insert setting");

    let repo = ConfigRepository::new(&db_path).expect("Failed to create repo");
    assert!(repo.list_values(id).expect("Query should succeed").is_empty());

    repo.insert_value(id, "first").expect("Insert should succeed");
    repo.insert_value(id, "second").expect("Insert should succeed");

    let values = repo.list_values(id).expect("Query should succeed");
    assert_eq!(values, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn test_update_values_rewrites_all_rows() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    let id = insert_setting(&conn, "base", None, false).expect("Failed to insert setting");

    let repo = ConfigRepository::new(&db_path).expect("Failed to create repo");
    repo.insert_value(id, "/old/one").expect("Insert should succeed");
    repo.insert_value(id, "/old/two").expect("Insert should succeed");

    // UPDATE 按 config_id 作用于全部现有行
    let affected = repo.update_values(id, "/new/path").expect("Update should succeed");
    assert_eq!(affected, 2);

    let values = repo.list_values(id).expect("Query should succeed");
    assert_eq!(values, vec!["/new/path".to_string(), "/new/path".to_string()]);
}

#[test]
fn test_insert_value_enforces_foreign_key() {
    logging::init_test();
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    // 统一 PRAGMA 开启了 foreign_keys，悬空 config_id 必须报错
    let repo = ConfigRepository::new(&db_path).expect("Failed to create repo");
    let result = repo.insert_value(424242, "dangling");
    assert!(result.is_err(), "Dangling config_id must be rejected");
}
