//! Tests for configuration validation.

use sheaf_config::{
    ConfigError, ConfigValidator, FsValidator, SchemaValidator, SheafConfig, validate_fs,
};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn default_config_passes_schema_validation() {
    assert!(SchemaValidator.validate(&SheafConfig::default()).is_ok());
}

#[test]
fn schema_rejects_package_in_two_chunks() {
    let mut cfg = SheafConfig::default();
    cfg.build
        .manual_chunks
        .insert("vue".into(), vec!["vue".into(), "pinia".into()]);
    cfg.build
        .manual_chunks
        .insert("state".into(), vec!["pinia".into()]);

    match SchemaValidator.validate(&cfg).unwrap_err() {
        ConfigError::DuplicateChunkPackage {
            package,
            first,
            second,
        } => {
            assert_eq!(package, "pinia");
            assert_eq!(first, "vue");
            assert_eq!(second, "state");
        }
        other => panic!("expected DuplicateChunkPackage, got {other:?}"),
    }
}

#[test]
fn schema_rejects_empty_chunk() {
    let mut cfg = SheafConfig::default();
    cfg.build.manual_chunks.insert("empty".into(), Vec::new());

    let err = SchemaValidator.validate(&cfg).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaValidation { .. }));
    assert!(err.to_string().contains("empty"));
}

#[test]
fn schema_rejects_zero_chunk_limit() {
    let mut cfg = SheafConfig::default();
    cfg.build.chunk_size_warning_limit = 0;
    assert!(SchemaValidator.validate(&cfg).is_err());
}

#[test]
fn schema_rejects_empty_out_dir() {
    let mut cfg = SheafConfig::default();
    cfg.build.out_dir = PathBuf::new();
    assert!(SchemaValidator.validate(&cfg).is_err());
}

#[test]
fn schema_rejects_port_zero() {
    let mut cfg = SheafConfig::default();
    cfg.server.port = Some(0);
    assert!(SchemaValidator.validate(&cfg).is_err());

    cfg.server.port = Some(3000);
    assert!(SchemaValidator.validate(&cfg).is_ok());
}

#[test]
fn schema_rejects_blank_pure_entry() {
    let mut cfg = SheafConfig::default();
    cfg.minify.pure = vec!["console.log".into(), " ".into()];
    assert!(SchemaValidator.validate(&cfg).is_err());
}

#[test]
fn schema_rejects_empty_alias_key() {
    let mut cfg = SheafConfig::default();
    cfg.resolve.alias.insert(String::new(), PathBuf::from("./lib"));
    assert!(SchemaValidator.validate(&cfg).is_err());
}

#[test]
fn fs_validator_catches_missing_alias_target() {
    let dir = TempDir::new().expect("tempdir");
    let cfg = SheafConfig::default();

    match FsValidator::new(dir.path()).validate(&cfg).unwrap_err() {
        ConfigError::AliasTargetNotFound { alias, path } => {
            assert_eq!(alias, "@");
            assert!(path.ends_with("src"));
        }
        other => panic!("expected AliasTargetNotFound, got {other:?}"),
    }
}

#[test]
fn fs_validator_succeeds_when_target_exists() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir(dir.path().join("src")).expect("create src dir");

    let cfg = SheafConfig {
        root: Some(dir.path().to_path_buf()),
        ..Default::default()
    };

    assert!(FsValidator::new(dir.path()).validate(&cfg).is_ok());
    assert!(validate_fs(&cfg).is_ok());
}
