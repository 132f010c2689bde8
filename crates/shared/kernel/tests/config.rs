use lyceum_kernel::config::load_config;
use lyceum_kernel::domain::config::AppConfig;
use std::fs;
use tempfile::tempdir;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let cfg: AppConfig = load_config(Some(dir.path().join("absent.toml"))).unwrap();

    assert_eq!(cfg.database.url, "mem://");
    assert_eq!(cfg.database.namespace, "lyceum");
    assert_eq!(cfg.logging.level, "info");
}

#[test]
fn toml_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lyceum.toml");
    fs::write(
        &path,
        r#"
[database]
url = "ws://db:8000"
database = "campus"

[database.credentials]
username = "admin"
password = "secret"

[logging]
level = "debug"
json = true
"#,
    )
    .unwrap();

    let cfg: AppConfig = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.database.url, "ws://db:8000");
    assert_eq!(cfg.database.database, "campus");
    assert_eq!(cfg.database.namespace, "lyceum");
    assert_eq!(cfg.database.credentials.as_ref().map(|c| c.password.as_str()), Some("secret"));
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[database\nurl = ").unwrap();

    assert!(load_config::<AppConfig>(Some(&path)).is_err());
}
