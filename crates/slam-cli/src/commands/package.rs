use slam_cloud::{ProcessRunner, Toolchain};
use slam_core::{BuildImageHandle, ProjectContext};
use std::path::PathBuf;

/// Run `scripts/package.sh` in the builder image. The image is used as is,
/// never rebuilt.
///
/// Returns where the script leaves the archive; its contents are not checked.
pub async fn package<R: ProcessRunner>(
    ctx: &ProjectContext,
    tools: &Toolchain<R>,
    image: &BuildImageHandle,
) -> anyhow::Result<PathBuf> {
    println!("Packaging '{}' in '{image}'...", ctx.name());
    tools.package_archive(ctx, image).await?;
    Ok(ctx.archive_path())
}
