use std::fmt;
use std::path::{Path, PathBuf};

/// Suffix appended to the lowercased project name to form the deployment bucket.
pub const BUCKET_SUFFIX: &str = "-samclisourcebucket";

/// Suffix appended to the lowercased project name to form the builder image tag.
pub const IMAGE_SUFFIX: &str = "-builder";

/// The project a slam invocation operates on.
///
/// Resolved once at startup from the working directory and passed by
/// reference to every stage. The project name is the final path segment
/// and never changes for the lifetime of the invocation.
///
/// # Examples
///
/// ```
/// use slam_core::ProjectContext;
///
/// let ctx = ProjectContext::resolve("/users/dev/MyFunc").unwrap();
/// assert_eq!(ctx.name(), "MyFunc");
/// assert_eq!(ctx.deployment_stack().bucket_name, "myfunc-samclisourcebucket");
/// assert_eq!(ctx.default_image().as_str(), "myfunc-builder");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    dir: PathBuf,
    name: String,
}

impl ProjectContext {
    /// Resolve the context for the process's current working directory.
    pub fn from_current_dir() -> crate::Result<Self> {
        let dir = std::env::current_dir().map_err(|e| crate::Error::CurrentDir { source: e })?;
        Self::resolve(dir)
    }

    /// Resolve the context for the absolute path `dir` without touching the
    /// filesystem. Relative paths are rejected.
    pub fn resolve(dir: impl Into<PathBuf>) -> crate::Result<Self> {
        let dir = dir.into();
        if !dir.is_absolute() {
            return Err(crate::Error::InvalidWorkingDirectory { path: dir });
        }
        let name = dir
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| crate::Error::InvalidWorkingDirectory { path: dir.clone() })?;

        Ok(Self { dir, name })
    }

    /// Absolute path of the project directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Project name, also the Swift product and executable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builder image tag derived from the project name.
    pub fn default_image(&self) -> BuildImageHandle {
        BuildImageHandle::new(format!("{}{IMAGE_SUFFIX}", self.name.to_lowercase()))
    }

    pub fn deployment_stack(&self) -> DeploymentStack {
        DeploymentStack::for_project(&self.name)
    }

    /// Where `scripts/package.sh` leaves the deployable zip.
    pub fn archive_path(&self) -> PathBuf {
        self.dir
            .join(".build")
            .join("lambda")
            .join(&self.name)
            .join("lambda.zip")
    }

    /// Test file generated by `swift package init`, relative to the project dir.
    pub fn test_stub_path(&self) -> PathBuf {
        let file_name = format!("{}Tests.swift", self.name.replace('-', "_"));
        PathBuf::from("Tests")
            .join(format!("{}Tests", self.name))
            .join(file_name)
    }

    /// Local debug executable, relative to the project dir.
    pub fn debug_binary_path(&self) -> PathBuf {
        PathBuf::from(".build").join("debug").join(&self.name)
    }
}

/// Tag of the container image holding the Swift toolchain used to compile
/// and package the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildImageHandle {
    image: String,
}

impl BuildImageHandle {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.image
    }
}

impl fmt::Display for BuildImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.image)
    }
}

/// The SAM stack a project deploys to and the S3 bucket SAM uploads through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentStack {
    /// Identifies the deployed unit; redeploys update it in place.
    pub stack_name: String,
    /// Must exist before every deploy.
    pub bucket_name: String,
}

impl DeploymentStack {
    pub fn for_project(project_name: &str) -> Self {
        Self {
            stack_name: project_name.to_owned(),
            bucket_name: format!("{}{BUCKET_SUFFIX}", project_name.to_lowercase()),
        }
    }
}
