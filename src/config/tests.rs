use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_standby_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("STANDBY_PORT");
        env::remove_var("STANDBY_BIND_ADDR");
        env::remove_var("STANDBY_MODEL_ID");
        env::remove_var("STANDBY_ENDPOINT_PREFIX");
        env::remove_var("STANDBY_APP_URL");
        env::remove_var("STANDBY_IDLE_WINDOW_SECS");
        env::remove_var("STANDBY_EXTEND_THRESHOLD_SECS");
        env::remove_var("STANDBY_CONTROL_URL");
        env::remove_var("STANDBY_MODEL_NAME");
        env::remove_var("STANDBY_INSTANCE_TYPE");
        env::remove_var("STANDBY_TEXTBELT_KEY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.model_id, "sentiment-model");
    assert_eq!(config.idle_window_secs, 30 * 60);
    assert_eq!(config.extend_threshold_secs, 15 * 60);
    assert!(config.control_url.is_none());
    assert!(config.textbelt_key.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_standby_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config.port, 8080);
    assert_eq!(config.model_id, "sentiment-model");
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_standby_env();
    let config = with_env_vars(
        &[
            ("STANDBY_PORT", "9090"),
            ("STANDBY_MODEL_ID", "my-model"),
            ("STANDBY_IDLE_WINDOW_SECS", "600"),
            ("STANDBY_EXTEND_THRESHOLD_SECS", "120"),
            ("STANDBY_CONTROL_URL", "http://control:9000"),
            ("STANDBY_TEXTBELT_KEY", "secret"),
        ],
        || Config::from_env().unwrap(),
    );

    assert_eq!(config.port, 9090);
    assert_eq!(config.model_id, "my-model");
    assert_eq!(config.idle_window_secs, 600);
    assert_eq!(config.extend_threshold_secs, 120);
    assert_eq!(config.control_url.as_deref(), Some("http://control:9000"));
    assert_eq!(config.textbelt_key.as_deref(), Some("secret"));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_invalid_port_is_rejected() {
    clear_standby_env();
    let result = with_env_vars(&[("STANDBY_PORT", "not-a-port")], Config::from_env);
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_invalid_bind_addr_is_rejected() {
    clear_standby_env();
    let result = with_env_vars(&[("STANDBY_BIND_ADDR", "localhost")], Config::from_env);
    assert!(result.is_err());
}

#[test]
fn test_validate_rejects_threshold_at_or_above_window() {
    let config = Config {
        idle_window_secs: 600,
        extend_threshold_secs: 600,
        ..Config::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_lifecycle_config_carries_tunables() {
    let config = Config {
        idle_window_secs: 600,
        extend_threshold_secs: 120,
        ..Config::default()
    };
    let lifecycle = config.lifecycle_config();
    assert_eq!(lifecycle.idle_window.as_secs(), 600);
    assert_eq!(lifecycle.extend_threshold.as_secs(), 120);
    assert_eq!(lifecycle.model_id, "sentiment-model");
}
