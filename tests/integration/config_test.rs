use std::collections::HashMap;
use std::path::PathBuf;

use ekko::core::config::{
    Config, ENV_CRITICAL_THRESHOLD, ENV_DISK_PATH, ENV_LOAD_DELAY_MS, ENV_LOG_FILE,
    ENV_MONITOR_INTERVAL_MS, ENV_WARN_THRESHOLD,
};
use ekko::EkkoError;

fn from_vars(vars: &[(&str, &str)]) -> ekko::Result<Config> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.monitor_interval_ms, 2000);
    assert_eq!(config.disk_path, PathBuf::from("/"));
    assert_eq!(config.load_delay_ms, 500);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_environment_gives_defaults() {
    let config = from_vars(&[]).unwrap();
    assert_eq!(config.monitor_interval_ms, Config::default().monitor_interval_ms);
    assert!(config.log_file.is_none());
}

#[test]
fn test_environment_overrides() {
    let config = from_vars(&[
        (ENV_MONITOR_INTERVAL_MS, "750"),
        (ENV_DISK_PATH, "/home"),
        (ENV_LOAD_DELAY_MS, "0"),
        (ENV_LOG_FILE, "/tmp/ekko.log"),
        (ENV_WARN_THRESHOLD, "50"),
        (ENV_CRITICAL_THRESHOLD, "80"),
    ])
    .unwrap();

    assert_eq!(config.monitor_interval_ms, 750);
    assert_eq!(config.disk_path, PathBuf::from("/home"));
    assert_eq!(config.load_delay_ms, 0);
    assert_eq!(config.log_file_path().unwrap(), PathBuf::from("/tmp/ekko.log"));
}

#[test]
fn test_bad_values_are_config_errors() {
    for vars in [
        vec![(ENV_MONITOR_INTERVAL_MS, "fast")],
        vec![(ENV_MONITOR_INTERVAL_MS, "10")],
        vec![(ENV_WARN_THRESHOLD, "95")],
    ] {
        let err = from_vars(&vars).unwrap_err();
        assert!(matches!(err, EkkoError::Config(_)), "{:?}", vars);
    }
}
