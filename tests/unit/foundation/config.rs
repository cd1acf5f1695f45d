use super::*;

#[test]
fn defaults_cover_three_ratios() {
    let cfg = RenderConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.master_sizes["1:1"], CanvasSize { width: 1080, height: 1080 });
    assert_eq!(cfg.master_sizes["4:5"], CanvasSize { width: 1080, height: 1350 });
    assert_eq!(cfg.master_sizes["9:16"], CanvasSize { width: 1080, height: 1920 });
    assert_eq!(cfg.scrim_max_alpha, 200);
    assert_eq!(cfg.sizes().len(), 3);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg: RenderConfig = serde_json::from_str(r#"{"scrim_max_alpha": 150}"#).unwrap();
    assert_eq!(cfg.scrim_max_alpha, 150);
    assert_eq!(cfg.master_sizes.len(), 3);
    assert_eq!(cfg.cta_fill, "#ED8924");
}

#[test]
fn env_overrides_prepend_font_dir_and_set_threads() {
    let cfg = RenderConfig::default().with_overrides_from(|key| match key {
        FONT_DIR_ENV => Some("/opt/brand-fonts".to_string()),
        THREADS_ENV => Some("3".to_string()),
        _ => None,
    });
    assert_eq!(cfg.font_dirs[0], PathBuf::from("/opt/brand-fonts"));
    assert_eq!(cfg.threads, Some(3));
}

#[test]
fn junk_env_values_are_ignored() {
    let cfg = RenderConfig::default().with_overrides_from(|key| match key {
        FONT_DIR_ENV => Some("   ".to_string()),
        THREADS_ENV => Some("zero".to_string()),
        _ => None,
    });
    assert_eq!(cfg, RenderConfig::default());
}

#[test]
fn validate_rejects_empty_and_zero_sizes() {
    let mut cfg = RenderConfig::default();
    cfg.master_sizes.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = RenderConfig::default();
    cfg.master_sizes.insert("bad".to_string(), CanvasSize { width: 0, height: 10 });
    assert!(cfg.validate().is_err());
}

#[test]
fn from_path_reports_parse_errors() {
    let dir = std::env::temp_dir().join("kvcompose_config_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = RenderConfig::from_path(&path).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}
