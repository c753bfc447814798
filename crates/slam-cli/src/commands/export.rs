use slam_cloud::{ProcessRunner, Toolchain};
use slam_core::{ProjectContext, SlamConfig};
use std::path::PathBuf;

/// `build`, then `package` with the image it produced, then print the
/// archive path.
pub async fn export<R: ProcessRunner>(
    ctx: &ProjectContext,
    config: &SlamConfig,
    tools: &Toolchain<R>,
) -> anyhow::Result<PathBuf> {
    let image = super::build(ctx, config, tools).await?;
    let archive = super::package(ctx, tools, &image).await?;

    println!();
    println!("{}", archive.display());
    Ok(archive)
}
