//! External tool plumbing for slam.
//!
//! Every side effect outside the filesystem goes through a [`ProcessRunner`]:
//! [`RealRunner`] in production, a mockall mock or the `RecordingRunner`
//! (behind the `testing` feature) in tests. [`Toolchain`] builds the concrete
//! swift / docker / aws / sam command lines and classifies their failures with
//! the predicates in [`tolerate`].

pub mod client;
pub mod error;
#[cfg(any(test, feature = "testing"))]
pub mod recording;
pub mod runner;
pub mod tolerate;

pub use client::{
    BucketError, BucketStatus, ContainerError, DeployError, DeployStatus, PackageManagerError,
    PreflightError, RequiredTool, StackOutput, Toolchain, REQUIRED_TOOLS,
};
pub use error::ToolError;
#[cfg(any(test, feature = "testing"))]
pub use recording::{RecordingRunner, Reply};
pub use runner::{Invocation, ProcessRunner, RealRunner};
