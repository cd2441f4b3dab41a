use std::env;

use roster_engine::config::Config;
use serial_test::serial;

mod common;

#[test]
#[serial]
fn test_config_from_env_with_defaults() {
    common::setup_test_env();

    // Store original values
    let original_values = [
        ("HOST", env::var("HOST").ok()),
        ("PORT", env::var("PORT").ok()),
        ("ENVIRONMENT", env::var("ENVIRONMENT").ok()),
        ("BASE_URL", env::var("BASE_URL").ok()),
    ];

    // Clear environment variables
    for (key, _) in &original_values {
        unsafe {
            env::remove_var(key);
        }
    }

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8080);
    assert_eq!(config.environment, "development");
    assert_eq!(config.client_base_url, "http://localhost:3000");
    assert!(config.is_development());
    assert!(!config.is_production());
    assert_eq!(config.server_address(), "127.0.0.1:8080");

    // Restore original values
    for (key, value) in original_values {
        if let Some(val) = value {
            unsafe {
                env::set_var(key, val);
            }
        }
    }
}

#[test]
#[serial]
fn test_config_from_env_with_custom_values() {
    common::setup_test_env();

    // Store original values
    let original_values = [
        ("HOST", env::var("HOST").ok()),
        ("PORT", env::var("PORT").ok()),
        ("ENVIRONMENT", env::var("ENVIRONMENT").ok()),
        ("BASE_URL", env::var("BASE_URL").ok()),
    ];

    // Set custom values
    unsafe {
        env::set_var("HOST", "0.0.0.0");
        env::set_var("PORT", "3000");
        env::set_var("ENVIRONMENT", "production");
        env::set_var("BASE_URL", "https://roster.example.org");
    }

    let config = Config::from_env_only().unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 3000);
    assert_eq!(config.environment, "production");
    assert_eq!(config.client_base_url, "https://roster.example.org");
    assert!(config.is_production());

    // Restore original values
    unsafe {
        for (key, value) in original_values {
            if let Some(val) = value {
                env::set_var(key, val);
            } else {
                env::remove_var(key);
            }
        }
    }
}

#[test]
#[serial]
fn test_invalid_port_falls_back_to_default() {
    common::setup_test_env();

    let original = env::var("PORT").ok();
    unsafe {
        env::set_var("PORT", "not-a-port");
    }

    let config = Config::from_env_only().unwrap();
    assert_eq!(config.port, 8080);

    unsafe {
        match original {
            Some(val) => env::set_var("PORT", val),
            None => env::remove_var("PORT"),
        }
    }
}
