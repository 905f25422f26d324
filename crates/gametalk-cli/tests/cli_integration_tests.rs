//! CLI integration tests
//!
//! Each test runs the `gametalk` binary against a scratch database and a
//! server address where nothing listens, so only local paths succeed.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const UNREACHABLE: &str = "http://127.0.0.1:9/";

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("gametalk.db")
}

fn gametalk(temp_dir: &TempDir, db: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gametalk"))
        .current_dir(temp_dir.path())
        .env("GAMETALK_BASE_URL", UNREACHABLE)
        .env("GAMETALK_LOG_PROFILE", "test")
        .env("GAMETALK_CONNECT_TIMEOUT_SECS", "2")
        .env("GAMETALK_READ_TIMEOUT_SECS", "2")
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_categories_list_seeds_defaults() {
    // Given: A fresh database
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    // When: Listing categories
    let output = gametalk(&temp_dir, &db, &["categories", "list"]);

    // Then: The default catalogue is shown
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("RPG"));
    assert!(out.contains("E-Sports"));
    assert!(db.exists());

    // And: Seeding again reports nothing to do
    let again = gametalk(&temp_dir, &db, &["categories", "seed"]);
    assert!(stdout(&again).contains("ya existen"));
}

#[test]
fn test_register_then_login_offline() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let register = gametalk(
        &temp_dir,
        &db,
        &[
            "users",
            "register",
            "--email",
            "ana@example.com",
            "--password",
            "hunter22",
            "--username",
            "ana",
        ],
    );
    assert!(register.status.success(), "stderr: {}", stderr(&register));

    let login = gametalk(
        &temp_dir,
        &db,
        &["users", "login", "--email", "ana@example.com", "--password", "hunter22"],
    );
    assert!(login.status.success());
    assert!(stdout(&login).contains("Bienvenido, ana"));

    let wrong = gametalk(
        &temp_dir,
        &db,
        &["users", "login", "--email", "ana@example.com", "--password", "nope"],
    );
    assert!(!wrong.status.success());
    assert!(stderr(&wrong).contains("Credenciales incorrectas"));
}

#[test]
fn test_server_url_is_remembered() {
    // Given: A saved server address
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let set = gametalk(&temp_dir, &db, &["server", "set", "http://127.0.0.1:9/api"]);
    assert!(set.status.success(), "stderr: {}", stderr(&set));

    // When: A later run asks which server is in use
    let show = gametalk(&temp_dir, &db, &["server", "show"]);

    // Then: The saved address wins over the environment
    assert_eq!(stdout(&show).trim(), "http://127.0.0.1:9/api/");

    // And: Reset goes back to the configured address
    gametalk(&temp_dir, &db, &["server", "reset"]);
    let show = gametalk(&temp_dir, &db, &["server", "show"]);
    assert_eq!(stdout(&show).trim(), UNREACHABLE);
}

#[test]
fn test_invalid_server_url_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = gametalk(&temp_dir, &db, &["server", "set", "ftp://files.example.com"]);

    assert!(!output.status.success());
    let show = gametalk(&temp_dir, &db, &["server", "show"]);
    assert_eq!(stdout(&show).trim(), UNREACHABLE);
}

#[test]
fn test_topics_list_without_server_or_cache_fails() {
    // Given: An empty cache and no server
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    // When
    let output = gametalk(&temp_dir, &db, &["topics", "list"]);

    // Then: Loading was shown, then the network error
    assert!(!output.status.success());
    assert!(stdout(&output).contains("Cargando…"));
    assert!(!stderr(&output).trim().is_empty());
}

#[test]
fn test_blank_topic_title_rejected_locally() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = gametalk(
        &temp_dir,
        &db,
        &[
            "topics",
            "create",
            "--category",
            "1",
            "--user",
            "1",
            "--title",
            " ",
            "--description",
            "cuerpo",
        ],
    );

    assert!(!output.status.success());
    assert!(stderr(&output).contains("El título no puede estar vacío"));
}
