use super::*;

#[test]
fn defaults_autoplay_without_loop() {
    let cfg = PlayerConfig::default();
    assert!(cfg.autoplay);
    assert!(!cfg.looping);
    assert_eq!(cfg.min_frame_delay(), Duration::ZERO);
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = PlayerConfig::from_json_str(r#"{ "looping": true }"#).unwrap();
    assert!(cfg.looping);
    assert!(cfg.autoplay);
}

#[test]
fn unknown_fields_are_config_errors() {
    let err = PlayerConfig::from_json_str(r#"{ "loop": true }"#).unwrap_err();
    assert!(matches!(err, FlipbookError::Config(_)));
}

#[test]
fn missing_file_is_wrapped_io_error() {
    let err = PlayerConfig::from_path(Path::new("target/does-not-exist/player.json")).unwrap_err();
    assert!(matches!(err, FlipbookError::Other(_)));
    assert!(err.to_string().contains("read player config"));
}
