//! Core types and configuration for slam.
//!
//! This crate defines the per-invocation [`ProjectContext`] and the names
//! derived from it ([`BuildImageHandle`], [`DeploymentStack`]), the
//! `slam.toml` schema ([`SlamConfig`]), the injectable [`InputSource`] used
//! for interactive prompts, and shared error types.

pub mod config;
pub mod context;
pub mod error;
pub mod input;

pub use config::{
    BuildConfig, DeployConfig, FailurePolicy, ProcessConfig, ScaffoldConfig, SlamConfig,
    TemplateConfig, TemplateVersion,
};
pub use context::{BuildImageHandle, DeploymentStack, ProjectContext};
pub use error::{Error, Result};
pub use input::{InputSource, ScriptedInput, StdinInput};
