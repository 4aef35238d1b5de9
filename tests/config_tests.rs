//! Tests for configuration loading.

use std::io::Write;
use std::sync::{Mutex, OnceLock};

use shopbridge::config::{BridgeConfig, ServerKind, ServerList};
use shopbridge::error::BridgeError;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 5] = [
    "MICROSERVICE_HOST",
    "MICROSERVICE_PORT",
    "API_KEY",
    "MCP_SERVER_NAME",
    "MCP_SERVER_VERSION",
];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clear_config_env() {
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
}

#[test]
fn from_env_uses_defaults_when_unset() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();

    let config = BridgeConfig::from_env().unwrap();
    assert_eq!(config.service_base_url(), "http://localhost:3000");
    assert_eq!(config.server_name, "microservice-mcp");
    assert!(config.api_key.is_none());
}

#[test]
fn from_env_reads_every_variable() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();
    std::env::set_var("MICROSERVICE_HOST", "shop.internal");
    std::env::set_var("MICROSERVICE_PORT", "4100");
    std::env::set_var("API_KEY", "admin-secret");
    std::env::set_var("MCP_SERVER_NAME", "shop-tools");
    std::env::set_var("MCP_SERVER_VERSION", "3.1.0");

    let config = BridgeConfig::from_env().unwrap();
    assert_eq!(config.service_base_url(), "http://shop.internal:4100");
    assert_eq!(config.api_key.as_deref(), Some("admin-secret"));
    assert_eq!(config.server_name, "shop-tools");
    assert_eq!(config.server_version, "3.1.0");
}

#[test]
fn from_env_rejects_out_of_range_port() {
    let _lock = env_lock_guard();
    let _guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    clear_config_env();
    std::env::set_var("MICROSERVICE_PORT", "70000");

    let err = BridgeConfig::from_env().unwrap_err();
    assert!(matches!(err, BridgeError::Configuration(_)));
    assert!(err.to_string().contains("70000"));
}

#[test]
fn default_config_matches_builder_defaults() {
    let config = BridgeConfig::default();
    assert_eq!(config.service_host, "localhost");
    assert_eq!(config.service_port, 3000);
    assert_eq!(config.server_version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn server_list_file_round_trips_through_discover() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
        [[servers]]
        name = "Local Microservice MCP Server"
        description = "Runs on the local machine (default)"
        args = ["serve"]

        [[servers]]
        name = "Remote Microservice MCP Server"
        description = "Connects over the network"
        type = "remote"
        url = "https://mcp.example.com"
        "#
    )
    .unwrap();

    let list = ServerList::discover(Some(file.path())).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.entries()[0].kind, ServerKind::Local);
    assert_eq!(list.entries()[1].kind, ServerKind::Remote);
    assert!(list.entries()[0].command.is_none());
}

#[test]
fn server_list_rejects_unknown_transport_type() {
    let err = ServerList::from_toml_str(
        r#"
        [[servers]]
        name = "Odd"
        type = "carrier-pigeon"
        "#,
    )
    .unwrap_err();
    assert!(matches!(err, BridgeError::ServerList(_)));
}
