use slam_core::config::{CONFIG_FILE_NAME, CONFIG_TEMPLATE};
use slam_core::{FailurePolicy, SlamConfig, TemplateVersion};
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn load_returns_defaults_when_no_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = SlamConfig::load(tmp.path()).unwrap();

    assert_eq!(config.templates.version, TemplateVersion::V2);
    assert!(config.build.image.is_none());
    assert!(config.build.base_image.is_none());
    assert!(config.scaffold.check_prerequisites);
    assert!(config.scaffold.setup_image);
    assert!(config.scaffold.create_bucket);
    assert_eq!(config.deploy.on_failure, FailurePolicy::Abort);
    assert_eq!(config.deploy.capabilities, "CAPABILITY_IAM");
    assert!(config.deploy.region.is_none());
    assert!(config.process.timeout().is_none());
}

#[test]
fn load_parses_full_config() {
    let tmp = TempDir::new().unwrap();
    let toml = r#"
[templates]
version = "v1"

[build]
image = "shared-swift-builder"
base_image = "swift:5.4-amazonlinux2"

[scaffold]
check_prerequisites = false
setup_image = false
create_bucket = false

[deploy]
on_failure = "continue"
capabilities = "CAPABILITY_NAMED_IAM"
region = "eu-west-1"

[process]
timeout_secs = 600
"#;
    std::fs::write(tmp.path().join(CONFIG_FILE_NAME), toml).unwrap();

    let config = SlamConfig::load(tmp.path()).unwrap();

    assert_eq!(config.templates.version, TemplateVersion::V1);
    assert_eq!(config.build.image.as_deref(), Some("shared-swift-builder"));
    assert_eq!(
        config.build.base_image.as_deref(),
        Some("swift:5.4-amazonlinux2")
    );
    assert!(!config.scaffold.check_prerequisites);
    assert!(!config.scaffold.setup_image);
    assert!(!config.scaffold.create_bucket);
    assert_eq!(config.deploy.on_failure, FailurePolicy::Continue);
    assert_eq!(config.deploy.capabilities, "CAPABILITY_NAMED_IAM");
    assert_eq!(config.deploy.region.as_deref(), Some("eu-west-1"));
    assert_eq!(config.process.timeout(), Some(Duration::from_secs(600)));
}

#[test]
fn partial_sections_keep_defaults() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(CONFIG_FILE_NAME),
        "[scaffold]\ncreate_bucket = false\n",
    )
    .unwrap();

    let config = SlamConfig::load(tmp.path()).unwrap();

    assert!(config.scaffold.check_prerequisites);
    assert!(config.scaffold.setup_image);
    assert!(!config.scaffold.create_bucket);
    assert_eq!(config.deploy.capabilities, "CAPABILITY_IAM");
}

#[test]
fn invalid_policy_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join(CONFIG_FILE_NAME),
        "[deploy]\non_failure = \"retry\"\n",
    )
    .unwrap();

    let err = SlamConfig::load(tmp.path()).unwrap_err();
    assert!(matches!(err, slam_core::Error::ConfigParse { .. }));
}

#[test]
fn generated_template_parses_to_defaults() {
    let config: SlamConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();
    assert_eq!(config.templates.version, TemplateVersion::V2);
    assert_eq!(config.deploy.on_failure, FailurePolicy::Abort);
    assert!(config.scaffold.check_prerequisites);
}
