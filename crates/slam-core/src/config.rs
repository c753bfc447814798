use std::time::Duration;

use serde::{Deserialize, Serialize};

/// File name of the optional per-project configuration.
pub const CONFIG_FILE_NAME: &str = "slam.toml";

/// slam.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlamConfig {
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub build: BuildConfig,
    #[serde(default)]
    pub scaffold: ScaffoldConfig,
    #[serde(default)]
    pub deploy: DeployConfig,
    #[serde(default)]
    pub process: ProcessConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Which generation of scaffolding templates to emit
    #[serde(default)]
    pub version: TemplateVersion,
}

/// Generations of the generated project layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVersion {
    /// Handler echoing a plain string payload.
    V1,
    /// Handler answering API Gateway HTTP API (v2) requests.
    #[default]
    V2,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Builder image tag (defaults to `<lowercase project name>-builder`)
    pub image: Option<String>,
    /// FROM image of the generated Dockerfile (defaults per template version)
    pub base_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaffoldConfig {
    /// Check for docker, aws, and sam before creating anything
    #[serde(default = "default_true")]
    pub check_prerequisites: bool,
    /// Build the builder image once the project is created
    #[serde(default = "default_true")]
    pub setup_image: bool,
    /// Create the deployment bucket once the project is created
    #[serde(default = "default_true")]
    pub create_bucket: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// What to do when `sam deploy` fails for a reason other than "no changes"
    #[serde(default)]
    pub on_failure: FailurePolicy,
    /// IAM capability acknowledged on deploy
    #[serde(default = "default_capabilities")]
    pub capabilities: String,
    /// AWS region passed to sam and aws (defaults to the CLI profile's region)
    pub region: Option<String>,
}

/// Reaction to a non-tolerated deploy failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the command with the deploy error.
    #[default]
    Abort,
    /// Report the error and still query the stack outputs.
    Continue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Upper bound for any single external command, in seconds
    pub timeout_secs: Option<u64>,
}

impl ProcessConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            check_prerequisites: true,
            setup_image: true,
            create_bucket: true,
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            on_failure: FailurePolicy::default(),
            capabilities: default_capabilities(),
            region: None,
        }
    }
}

impl SlamConfig {
    /// Load from slam.toml at the given path, or return defaults if not found.
    pub fn load(project_dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}

/// Commented starting point written by `slam new`.
pub const CONFIG_TEMPLATE: &str = r#"[templates]
# version = "v2"

[build]
# image = "my-builder"
# base_image = "swift:5.3-amazonlinux2"

[scaffold]
# check_prerequisites = true
# setup_image = true
# create_bucket = true

[deploy]
# on_failure = "abort"
# capabilities = "CAPABILITY_IAM"
# region = "us-east-1"

[process]
# timeout_secs = 900
"#;

fn default_true() -> bool {
    true
}

fn default_capabilities() -> String {
    "CAPABILITY_IAM".to_owned()
}
