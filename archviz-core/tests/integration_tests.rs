//! Integration tests for archviz-core infrastructure

use archviz_core::{
    config_error, repository_error, validation_error, ArchvizConfig, ArchvizError,
    DiagramProvider, LogFormat,
};

#[test]
fn test_error_handling() {
    let error = repository_error!("Test repository error", "test_component");

    match &error {
        ArchvizError::Repository {
            message, context, ..
        } => {
            assert_eq!(message, "Test repository error");
            assert_eq!(context.component, "test_component");
            assert!(!context.error_id.is_empty());
        }
        _ => panic!("Expected Repository error"),
    }

    // Logging without a subscriber must not panic
    error.log();
    assert!(!error.is_client_error());

    let invalid = validation_error!("Missing repo query parameter", "repo", "test");
    assert!(invalid.is_client_error());
    assert!(invalid.to_string().contains("Missing repo query parameter"));

    let config = config_error!("Invalid config", "test");
    assert!(!config.is_client_error());
    assert!(config
        .context()
        .unwrap()
        .recovery_suggestions
        .iter()
        .any(|s| s.contains("config --init")));
}

#[test]
fn test_repository_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory");
    let error = repository_error!("Could not open repository", "test", io);

    let source = std::error::Error::source(&error).expect("source is chained");
    assert!(source.to_string().contains("no such directory"));
}

#[test]
fn test_config_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("nested").join("archviz.toml");

    let mut config = ArchvizConfig::default();
    config.analysis.excluded_patterns.push("*.lock".to_string());
    config.diagram.provider = DiagramProvider::Disabled;
    config.logging.format = LogFormat::Json;
    config.save_to_file(&path).unwrap();

    let loaded = ArchvizConfig::from_file(&path).unwrap();
    assert_eq!(loaded.analysis.excluded_dirs, vec![".git".to_string()]);
    assert_eq!(loaded.analysis.excluded_patterns, vec!["*.lock".to_string()]);
    assert_eq!(loaded.diagram.provider, DiagramProvider::Disabled);
    assert_eq!(loaded.logging.format, LogFormat::Json);
}

#[test]
fn test_partial_config_uses_defaults() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("archviz.toml");
    std::fs::write(&path, "[diagram]\nprogram = \"mmdc-llm\"\n").unwrap();

    let loaded = ArchvizConfig::from_file(&path).unwrap();
    assert_eq!(loaded.diagram.program, "mmdc-llm");
    assert_eq!(loaded.diagram.provider, DiagramProvider::Command);
    assert_eq!(loaded.analysis.excluded_dirs, vec![".git".to_string()]);
}

#[test]
fn test_config_validation() {
    let mut config = ArchvizConfig::default();
    assert!(config.validate().is_ok());

    config.diagram.program = "  ".to_string();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, ArchvizError::Config { .. }));
    assert!(err
        .context()
        .unwrap()
        .recovery_suggestions
        .iter()
        .any(|s| s.contains("config --init")));

    config.diagram.provider = DiagramProvider::Disabled;
    assert!(config.validate().is_ok());

    config.analysis.excluded_dirs.push("vendor/cache".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_unreadable_config_is_config_error() {
    let result = ArchvizConfig::from_file("/definitely/not/here/archviz.toml");
    assert!(matches!(result, Err(ArchvizError::Config { .. })));
}

#[test]
fn test_unknown_provider_is_rejected() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("archviz.toml");
    std::fs::write(&path, "[diagram]\nprovider = \"carrier-pigeon\"\n").unwrap();

    assert!(ArchvizConfig::from_file(&path).is_err());
}
