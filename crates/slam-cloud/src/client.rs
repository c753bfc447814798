use crate::error::ToolError;
use crate::runner::{Invocation, ProcessRunner, RealRunner};
use crate::tolerate;
use serde::Deserialize;
use slam_core::{BuildImageHandle, DeploymentStack, ProjectContext};

/// Path of the project directory inside build containers.
pub const CONTAINER_WORKDIR: &str = "/src";

/// Path of the SAM template, relative to the project directory.
pub const SAM_TEMPLATE_PATH: &str = "./scripts/sam.yml";

/// A CLI `slam new` needs before it touches the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredTool {
    pub program: &'static str,
    pub install_tip: &'static str,
}

/// Checked in order; the first absent tool aborts `slam new`.
pub const REQUIRED_TOOLS: &[RequiredTool] = &[
    RequiredTool {
        program: "aws",
        install_tip: "brew install awscli",
    },
    RequiredTool {
        program: "docker",
        install_tip: "https://docs.docker.com/get-docker/",
    },
    RequiredTool {
        program: "sam",
        install_tip: "brew tap aws/tap && brew install aws-sam-cli",
    },
];

/// swift / docker / aws / sam operations, parameterized over the runner for testability.
pub struct Toolchain<R: ProcessRunner = RealRunner> {
    runner: R,
}

impl Toolchain<RealRunner> {
    pub fn new() -> Self {
        Self {
            runner: RealRunner::new(),
        }
    }
}

impl Default for Toolchain<RealRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> Toolchain<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    // ── Preflight ──

    /// Check `tool` with `--version`.
    ///
    /// A "not found" outcome just means absent. Any other failure is logged
    /// with its diagnostic and also counts as absent.
    pub async fn is_available(&self, ctx: &ProjectContext, tool: &RequiredTool) -> bool {
        let check = Invocation::new(tool.program, ["--version"], ctx.dir());
        match self.runner.exec(&check).await {
            Ok(version) => {
                tracing::debug!(tool = tool.program, version = version.trim(), "found");
                true
            }
            Err(e) if tolerate::is_not_found(&e) => {
                tracing::debug!(tool = tool.program, "not installed");
                false
            }
            Err(e) => {
                tracing::warn!(tool = tool.program, error = %e, "version check failed");
                false
            }
        }
    }

    pub async fn check_prerequisites(&self, ctx: &ProjectContext) -> Result<(), PreflightError> {
        for tool in REQUIRED_TOOLS {
            if !self.is_available(ctx, tool).await {
                return Err(PreflightError::Missing {
                    tool: tool.program,
                    tip: tool.install_tip,
                });
            }
        }
        Ok(())
    }

    // ── Swift package manager (host) ──

    pub async fn init_package(&self, ctx: &ProjectContext) -> Result<(), PackageManagerError> {
        self.runner
            .exec_streaming(&Invocation::new(
                "swift",
                ["package", "init", "--type", "executable"],
                ctx.dir(),
            ))
            .await
            .map_err(|e| PackageManagerError::Init { source: e })
    }

    pub async fn build_debug(&self, ctx: &ProjectContext) -> Result<(), PackageManagerError> {
        self.runner
            .exec_streaming(&Invocation::new("swift", ["build", "-c", "debug"], ctx.dir()))
            .await
            .map_err(|e| PackageManagerError::DebugBuild { source: e })
    }

    // ── Container ──

    /// `docker build -t <image> .` from the project's Dockerfile.
    pub async fn build_image(
        &self,
        ctx: &ProjectContext,
        image: &BuildImageHandle,
    ) -> Result<(), ContainerError> {
        self.runner
            .exec_streaming(&Invocation::new(
                "docker",
                ["build", "-t", image.as_str(), "."],
                ctx.dir(),
            ))
            .await
            .map_err(|e| ContainerError::ImageBuild {
                image: image.to_string(),
                source: e,
            })
    }

    /// Release build of the project's product inside the builder image.
    pub async fn compile_release(
        &self,
        ctx: &ProjectContext,
        image: &BuildImageHandle,
    ) -> Result<(), ContainerError> {
        let invocation = container_run(
            ctx,
            image,
            &["swift", "build", "--product", ctx.name(), "-c", "release"],
        )?;
        self.runner
            .exec_streaming(&invocation)
            .await
            .map_err(|e| ContainerError::Compile {
                product: ctx.name().to_owned(),
                source: e,
            })
    }

    /// Run `scripts/package.sh <name>` inside the builder image. The archive
    /// itself is not inspected; only the exit status counts.
    pub async fn package_archive(
        &self,
        ctx: &ProjectContext,
        image: &BuildImageHandle,
    ) -> Result<(), ContainerError> {
        let invocation = container_run(ctx, image, &["scripts/package.sh", ctx.name()])?;
        self.runner
            .exec_streaming(&invocation)
            .await
            .map_err(|e| ContainerError::Package {
                executable: ctx.name().to_owned(),
                source: e,
            })
    }

    // ── S3 ──

    /// Create the deployment bucket unless the caller already owns it.
    pub async fn ensure_bucket(
        &self,
        ctx: &ProjectContext,
        stack: &DeploymentStack,
        region: Option<&str>,
    ) -> Result<BucketStatus, BucketError> {
        let mut args = vec![
            "s3".to_owned(),
            "mb".to_owned(),
            format!("s3://{}", stack.bucket_name),
        ];
        push_region(&mut args, region);

        match self
            .runner
            .exec(&Invocation::new("aws", args, ctx.dir()))
            .await
        {
            Ok(_) => Ok(BucketStatus::Created),
            Err(e) if tolerate::is_bucket_already_owned(&e) => {
                tracing::debug!(bucket = %stack.bucket_name, "bucket already owned, reusing it");
                Ok(BucketStatus::AlreadyOwned)
            }
            Err(e) => Err(BucketError::Create {
                bucket: stack.bucket_name.clone(),
                source: e,
            }),
        }
    }

    // ── SAM ──

    pub async fn sam_deploy(
        &self,
        ctx: &ProjectContext,
        stack: &DeploymentStack,
        capabilities: &str,
        region: Option<&str>,
    ) -> Result<DeployStatus, DeployError> {
        let mut args: Vec<String> = [
            "deploy",
            "--template",
            SAM_TEMPLATE_PATH,
            "--stack-name",
            stack.stack_name.as_str(),
            "--s3-bucket",
            stack.bucket_name.as_str(),
            "--capabilities",
            capabilities,
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
        push_region(&mut args, region);

        match self
            .runner
            .exec(&Invocation::new("sam", args, ctx.dir()))
            .await
        {
            Ok(output) => Ok(DeployStatus::Deployed(output)),
            Err(e) if tolerate::is_no_changes_to_deploy(&e) => {
                tracing::debug!(stack = %stack.stack_name, "stack is up to date");
                Ok(DeployStatus::NoChanges)
            }
            Err(e) => Err(DeployError::Deploy {
                stack: stack.stack_name.clone(),
                source: e,
            }),
        }
    }

    // ── CloudFormation ──

    pub async fn describe_stack_outputs(
        &self,
        ctx: &ProjectContext,
        stack: &DeploymentStack,
        region: Option<&str>,
    ) -> Result<Vec<StackOutput>, DeployError> {
        let mut args: Vec<String> = [
            "cloudformation",
            "describe-stacks",
            "--stack-name",
            stack.stack_name.as_str(),
            "--query",
            "Stacks[0].Outputs",
            "--output",
            "json",
        ]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
        push_region(&mut args, region);

        let output = self
            .runner
            .exec(&Invocation::new("aws", args, ctx.dir()))
            .await
            .map_err(|e| DeployError::Describe {
                stack: stack.stack_name.clone(),
                source: e,
            })?;

        parse_stack_outputs(&output).map_err(|e| DeployError::ParseOutputs {
            stack: stack.stack_name.clone(),
            source: e,
        })
    }
}

// ── Helpers ──

fn container_run(
    ctx: &ProjectContext,
    image: &BuildImageHandle,
    command: &[&str],
) -> Result<Invocation, ContainerError> {
    let dir = ctx
        .dir()
        .to_str()
        .ok_or_else(|| ContainerError::InvalidPath(ctx.dir().to_path_buf()))?;

    let mut args = vec![
        "run".to_owned(),
        "--rm".to_owned(),
        "--volume".to_owned(),
        format!("{dir}/:{CONTAINER_WORKDIR}"),
        "--workdir".to_owned(),
        CONTAINER_WORKDIR.to_owned(),
        image.as_str().to_owned(),
    ];
    args.extend(command.iter().map(|s| (*s).to_owned()));

    Ok(Invocation::new("docker", args, ctx.dir()))
}

fn push_region(args: &mut Vec<String>, region: Option<&str>) {
    if let Some(region) = region {
        args.push("--region".to_owned());
        args.push(region.to_owned());
    }
}

/// Parse `describe-stacks --query Stacks[0].Outputs --output json`, which
/// prints `null` for a stack without outputs.
pub fn parse_stack_outputs(json: &str) -> Result<Vec<StackOutput>, serde_json::Error> {
    let outputs: Option<Vec<StackOutput>> = serde_json::from_str(json.trim())?;
    Ok(outputs.unwrap_or_default())
}

// ── Result types ──

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StackOutput {
    #[serde(rename = "OutputKey")]
    pub key: String,
    #[serde(rename = "OutputValue")]
    pub value: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

impl StackOutput {
    /// The output a user calls: the first whose key ends in `Endpoint` or `Url`.
    pub fn endpoint(outputs: &[StackOutput]) -> Option<&StackOutput> {
        outputs
            .iter()
            .find(|o| o.key.ends_with("Endpoint") || o.key.ends_with("Url"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketStatus {
    Created,
    AlreadyOwned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployStatus {
    /// A change set was executed; carries the SAM CLI output.
    Deployed(String),
    NoChanges,
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum PreflightError {
    #[error("'{tool}' is required to deploy AWS Lambda functions. You can install it with '{tip}'")]
    Missing {
        tool: &'static str,
        tip: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PackageManagerError {
    #[error("swift package init failed")]
    Init { source: ToolError },

    #[error("local debug build failed")]
    DebugBuild { source: ToolError },
}

#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("project path is not valid UTF-8: {0}")]
    InvalidPath(std::path::PathBuf),

    #[error("failed to build image '{image}'")]
    ImageBuild { image: String, source: ToolError },

    #[error("failed to compile '{product}' in the builder container")]
    Compile { product: String, source: ToolError },

    #[error("failed to package '{executable}' in the builder container")]
    Package { executable: String, source: ToolError },
}

#[derive(Debug, thiserror::Error)]
pub enum BucketError {
    #[error("failed to create deployment bucket '{bucket}'")]
    Create { bucket: String, source: ToolError },
}

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("sam deploy of stack '{stack}' failed")]
    Deploy { stack: String, source: ToolError },

    #[error("failed to describe stack '{stack}'")]
    Describe { stack: String, source: ToolError },

    #[error("unexpected describe-stacks output for '{stack}'")]
    ParseOutputs {
        stack: String,
        source: serde_json::Error,
    },
}
