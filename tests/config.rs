use std::io::Write;

use range_equity::analyzer::{AnalyzerConfig, ConfigError};

#[test]
fn partial_config_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, r#"{{ "iterations": 1200, "parallel": true }}"#).expect("write");

    let config = AnalyzerConfig::load(file.path()).expect("loads");
    assert_eq!(config.iterations, 1200);
    assert!(config.parallel);
    assert_eq!(config.seed, None);
    assert!(config.runouts && config.distribution);
}

#[test]
fn malformed_config_is_reported() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(file, "iterations = 5").expect("write");
    assert!(matches!(
        AnalyzerConfig::load(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn missing_config_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    assert!(matches!(
        AnalyzerConfig::load(&path),
        Err(ConfigError::Io { .. })
    ));
}
