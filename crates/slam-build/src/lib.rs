//! File generation for slam projects.
//!
//! # Generated layout
//!
//! ```text
//! <project>/
//!   Package.swift              GeneratedFile::Manifest
//!   Dockerfile                 GeneratedFile::ContainerFile
//!   scripts/package.sh         GeneratedFile::PackageScript (mode 755)
//!   scripts/sam.yml            GeneratedFile::DeploymentTemplate
//!   Sources/<project>/main.swift   GeneratedFile::MainSource
//!   event.json                 GeneratedFile::SampleEvent
//! ```
//!
//! Contents come from a [`TemplateProvider`]; [`SwiftLambdaTemplates`] is the
//! built-in provider, versioned by [`slam_core::TemplateVersion`].
//! Writes are delete-then-write and never fail because a target is missing.

pub mod scaffold;
pub mod templates;

pub use scaffold::ScaffoldError;
pub use templates::{GeneratedFile, SwiftLambdaTemplates, TemplateProvider};
