use expense_glow::{
    config::{Config, ConfigManager},
    Amount, ValidationError,
};
use tempfile::tempdir;

#[test]
fn default_config_matches_limit_dialog() {
    let cfg = Config::default();

    assert_eq!(cfg.monthly_limit, Amount::from_units(15_000));
    assert_eq!(cfg.minimum_limit, Amount::from_units(1_000));
    assert_eq!(cfg.preset_limits.len(), 6);
    assert!(!cfg.currency_symbol.is_empty());
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    assert_eq!(manager.load().expect("load config"), Config::default());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.monthly_limit = Amount::from_units(20_000);
    cfg.currency_symbol = "$".to_string();

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.monthly_limit, Amount::from_units(20_000));
    assert_eq!(loaded.currency_symbol, "$");
    assert!(manager.path().ends_with("expense_glow/config.json"));
}

#[test]
fn limit_policy_comes_from_config() {
    let policy = Config::default().limit_policy();

    assert!(matches!(
        policy.validate(Amount::from_units(500)),
        Err(ValidationError::LimitBelowMinimum { .. })
    ));
    assert!(policy.validate(Amount::from_units(5_000)).is_ok());
}
