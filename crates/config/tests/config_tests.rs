//! Tests for the `roster-config` loader: defaults, file discovery, and
//! environment overrides. Environment mutation forces serial execution.

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::TempDir;

use roster_config::{load, AppConfig};

const ENV_VARS_TO_RESET: &[&str] = &[
    "ROSTER_CONFIG",
    "ROSTER__AUTH__ISSUER",
    "ROSTER__AUTH__TOKEN_SECRET",
    "ROSTER__AUTH__TOKEN_TTL_SECONDS",
    "ROSTER__DATABASE__MAX_CONNECTIONS",
    "ROSTER__DATABASE__URL",
    "ROSTER__HTTP__ADDRESS",
    "ROSTER__HTTP__PORT",
];

struct TestContext {
    vars: Vec<(String, Option<String>)>,
    original_dir: Option<PathBuf>,
}

impl TestContext {
    fn new() -> Self {
        let mut ctx = Self {
            vars: Vec::new(),
            original_dir: None,
        };
        ctx.reset_environment();
        ctx
    }

    fn reset_environment(&mut self) {
        for key in ENV_VARS_TO_RESET {
            self.remove_var(key);
        }
    }

    fn set_var(&mut self, key: &str, value: impl AsRef<str>) {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value.as_ref());
        self.vars.push((key.to_string(), previous));
    }

    fn remove_var(&mut self, key: &str) {
        let previous = std::env::var(key).ok();
        std::env::remove_var(key);
        self.vars.push((key.to_string(), previous));
    }

    fn change_dir(&mut self, dir: &std::path::Path) {
        if self.original_dir.is_none() {
            self.original_dir = std::env::current_dir().ok();
        }
        std::env::set_current_dir(dir).expect("failed to change directory");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        if let Some(dir) = self.original_dir.take() {
            let _ = std::env::set_current_dir(dir);
        }
        for (key, previous) in self.vars.drain(..).rev() {
            match previous {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

#[test]
#[serial]
fn load_returns_defaults_without_file_or_env() {
    let _ctx = TestContext::new();

    let config = load().expect("defaults should load");
    let defaults = AppConfig::default();

    assert_eq!(config.http.address, defaults.http.address);
    assert_eq!(config.http.port, defaults.http.port);
    assert_eq!(config.database.url, defaults.database.url);
    assert_eq!(config.auth.token_ttl_seconds, defaults.auth.token_ttl_seconds);
    assert_eq!(config.auth.issuer, "roster");
}

#[test]
#[serial]
fn load_reads_file_pointed_to_by_env_var() {
    let mut ctx = TestContext::new();
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("roster.toml");
    fs::write(
        &path,
        r#"
[http]
address = "0.0.0.0"
port = 9000

[auth]
token_secret = "file-secret"
token_ttl_seconds = 3600
"#,
    )
    .expect("write config file");

    ctx.set_var("ROSTER_CONFIG", path.to_str().unwrap());

    let config = load().expect("file config should load");
    assert_eq!(config.http.address, "0.0.0.0");
    assert_eq!(config.http.port, 9000);
    assert_eq!(config.auth.token_secret, "file-secret");
    assert_eq!(config.auth.token_ttl_seconds, 3600);
    // Untouched sections keep defaults.
    assert_eq!(config.database.url, AppConfig::default().database.url);
}

#[test]
#[serial]
fn load_discovers_file_in_current_directory() {
    let mut ctx = TestContext::new();
    let temp = TempDir::new().expect("tempdir");
    fs::write(
        temp.path().join("roster.toml"),
        "[database]\nurl = \"sqlite://discovered.db\"\nmax_connections = 3\n",
    )
    .expect("write config file");

    ctx.change_dir(temp.path());

    let config = load().expect("discovered config should load");
    assert_eq!(config.database.url, "sqlite://discovered.db");
    assert_eq!(config.database.max_connections, 3);
}

#[test]
#[serial]
fn environment_overrides_take_precedence() {
    let mut ctx = TestContext::new();
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("roster.toml");
    fs::write(&path, "[http]\nport = 9000\n").expect("write config file");

    ctx.set_var("ROSTER_CONFIG", path.to_str().unwrap());
    ctx.set_var("ROSTER__HTTP__PORT", "9100");
    ctx.set_var("ROSTER__AUTH__TOKEN_SECRET", "env-secret");

    let config = load().expect("config should load");
    assert_eq!(config.http.port, 9100);
    assert_eq!(config.auth.token_secret, "env-secret");
}

#[test]
#[serial]
fn invalid_port_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.set_var("ROSTER__HTTP__PORT", "not-a-port");

    assert!(load().is_err());
}
