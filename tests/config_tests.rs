use std::fs;

use image_session::config::Configuration;
use image_session::processing::FilterKind;
use image_session::scan::ExtensionCase;
use tempfile::tempdir;

#[test]
fn empty_config_uses_defaults() {
    let cfg: Configuration = serde_yaml::from_str("{}").unwrap();
    let cfg = cfg.validated().unwrap();
    assert_eq!(cfg.blur_kernel, 8);
    assert_eq!(cfg.morphology_iterations, 1);
    assert!((cfg.zoom_step - 1.2).abs() < f64::EPSILON);
    assert_eq!(cfg.extension_case, ExtensionCase::Sensitive);
    assert_eq!(cfg.box_blur(), FilterKind::BoxBlur { kernel: 8 });
}

#[test]
fn parse_kebab_case_config() {
    let yaml = r#"
blur-kernel: 5
morphology-iterations: 2
zoom-step: 1.5
extension-case: insensitive
"#;
    let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(cfg.box_blur(), FilterKind::BoxBlur { kernel: 5 });
    assert_eq!(cfg.erode(), FilterKind::Erode { iterations: 2 });
    assert_eq!(cfg.dilate(), FilterKind::Dilate { iterations: 2 });
    assert!((cfg.zoom_step - 1.5).abs() < f64::EPSILON);
    assert_eq!(cfg.extension_case, ExtensionCase::Insensitive);
}

#[test]
fn rejects_unknown_extension_case() {
    let res: Result<Configuration, _> = serde_yaml::from_str("extension-case: sometimes");
    assert!(res.is_err());
}

#[test]
fn validation_rejects_degenerate_values() {
    for yaml in [
        "blur-kernel: 0",
        "morphology-iterations: 0",
        "zoom-step: 0.0",
        "zoom-step: -2.0",
        "zoom-step: 1.0",
    ] {
        let cfg: Configuration = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.validated().is_err(), "{yaml} should be rejected");
    }
}

#[test]
fn loads_from_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("config.yaml");
    fs::write(&path, "blur-kernel: 3\n").unwrap();
    let cfg = Configuration::from_yaml_file(&path).unwrap();
    assert_eq!(cfg.blur_kernel, 3);

    let missing = Configuration::from_yaml_file(tmp.path().join("none.yaml"));
    assert!(missing.is_err());
}
