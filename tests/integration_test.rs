use tildeterm::config::Config;

#[test]
fn test_config_validation_rejects_multiline_prompt() {
    let config = Config {
        prompt: "~\n$".to_string(),
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_rejects_blank_prompt() {
    let config = Config {
        prompt: "   ".to_string(),
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_accepts_defaults() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.blink_interval().as_millis(), 500);
}
