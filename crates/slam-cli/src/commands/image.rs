use slam_cloud::{ProcessRunner, Toolchain};
use slam_core::{BuildImageHandle, InputSource, ProjectContext, SlamConfig};

pub(crate) const IMAGE_PROMPT: &str = "Builder image name";

/// Pick the builder image tag.
///
/// An explicit name wins, then an answer from `input`, then `build.image`
/// from slam.toml, then the tag derived from the project name.
pub fn resolve_image(
    ctx: &ProjectContext,
    config: &SlamConfig,
    explicit: Option<&str>,
    input: Option<&mut dyn InputSource>,
) -> anyhow::Result<BuildImageHandle> {
    if let Some(name) = explicit {
        return Ok(BuildImageHandle::new(name));
    }
    if let Some(input) = input {
        return Ok(BuildImageHandle::new(input.ask(IMAGE_PROMPT)?));
    }
    Ok(config
        .build
        .image
        .as_deref()
        .map(BuildImageHandle::new)
        .unwrap_or_else(|| ctx.default_image()))
}

/// Build and tag the builder image from the project's Dockerfile.
pub async fn setup_image<R: ProcessRunner>(
    ctx: &ProjectContext,
    tools: &Toolchain<R>,
    image: &BuildImageHandle,
) -> anyhow::Result<()> {
    println!("Building image '{image}'...");
    tools.build_image(ctx, image).await?;
    println!("Image '{image}' is ready");
    Ok(())
}
