use diagramkit_core::{ConfigError, EditorConfig};
use std::io::Write;

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[view]\nzoom_step = 1.5\n\n[labels]\npopup_gap = 12.0\n"
    )
    .unwrap();

    let config = EditorConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.view.zoom_step, 1.5);
    assert_eq!(config.labels.popup_gap, 12.0);
    assert_eq!(config.view.initial_zoom, 1.0);
}

#[test]
fn test_save_then_load_preserves_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("editor.toml");

    let mut config = EditorConfig::default();
    config.hit_test.handle_radius = 10.0;
    config.tools.return_to_default_after_place = false;
    config.save_to_file(&path).unwrap();

    let loaded = EditorConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = EditorConfig::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_negative_radius_rejected() {
    let err = EditorConfig::from_toml_str("[hit_test]\nhandle_radius = -1.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::ValueOutOfRange { .. }));
}
