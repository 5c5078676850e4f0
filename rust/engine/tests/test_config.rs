use std::io::Write;

use hilo_engine::config::{self, ConfigError, EngineConfig, ValueSource};
use hilo_engine::session::{Direction, GameSession};
use serial_test::serial;

fn clear_env() {
    for var in [config::CONFIG_PATH_VAR, config::SEED_VAR, config::DECKS_VAR] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn defaults_without_file_or_env() {
    clear_env();
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config, EngineConfig::default());
    assert_eq!(resolved.config.default_num_decks, 6);
    assert_eq!(resolved.config.seed, None);
    assert_eq!(resolved.sources.seed, ValueSource::Default);
}

#[test]
#[serial]
fn file_values_then_env_overrides() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 99\ndefault_num_decks = 8").unwrap();
    std::env::set_var(config::CONFIG_PATH_VAR, file.path());

    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.seed, Some(99));
    assert_eq!(resolved.config.default_num_decks, 8);
    assert_eq!(resolved.sources.seed, ValueSource::File);
    assert_eq!(resolved.sources.default_num_decks, ValueSource::File);

    std::env::set_var(config::SEED_VAR, "7");
    let resolved = config::load_with_sources().unwrap();
    assert_eq!(resolved.config.seed, Some(7));
    assert_eq!(resolved.sources.seed, ValueSource::Env);
    assert_eq!(resolved.sources.default_num_decks, ValueSource::File);
    clear_env();
}

#[test]
#[serial]
fn out_of_range_decks_are_rejected() {
    clear_env();
    std::env::set_var(config::DECKS_VAR, "11");
    assert!(matches!(config::load(), Err(ConfigError::Invalid(_))));
    std::env::set_var(config::DECKS_VAR, "many");
    assert!(matches!(config::load(), Err(ConfigError::Invalid(_))));
    clear_env();
}

#[test]
#[serial]
fn unreadable_or_malformed_file_fails() {
    clear_env();
    std::env::set_var(config::CONFIG_PATH_VAR, "/definitely/not/here.toml");
    assert!(matches!(config::load(), Err(ConfigError::Io(_))));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = \"abc").unwrap();
    std::env::set_var(config::CONFIG_PATH_VAR, file.path());
    assert!(matches!(config::load(), Err(ConfigError::Parse(_))));
    clear_env();
}

#[test]
fn seeded_config_gives_reproducible_sessions() {
    let cfg = EngineConfig {
        seed: Some(314),
        default_num_decks: 7,
    };
    let mut a = GameSession::from_config(&cfg);
    let mut b = GameSession::from_config(&cfg);
    assert_eq!(
        a.start(cfg.default_num_decks).unwrap(),
        b.start(cfg.default_num_decks).unwrap()
    );
    assert_eq!(
        a.guess(0, Direction::Lower, 0).unwrap(),
        b.guess(0, Direction::Lower, 0).unwrap()
    );
}
