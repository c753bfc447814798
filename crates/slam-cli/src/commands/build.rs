use slam_cloud::{ProcessRunner, Toolchain};
use slam_core::{BuildImageHandle, ProjectContext, SlamConfig};

/// Set up the builder image, then compile the release product inside it.
///
/// Returns the image used, for packaging.
pub async fn build<R: ProcessRunner>(
    ctx: &ProjectContext,
    config: &SlamConfig,
    tools: &Toolchain<R>,
) -> anyhow::Result<BuildImageHandle> {
    let image = super::resolve_image(ctx, config, None, None)?;
    super::setup_image(ctx, tools, &image).await?;

    println!("Compiling '{}' (release) in '{image}'...", ctx.name());
    tools.compile_release(ctx, &image).await?;

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use slam_cloud::{RecordingRunner, Reply};

    #[tokio::test]
    async fn builds_image_then_compiles_in_it() {
        let (_tmp, ctx) = testing::project();
        let tools = testing::tools(RecordingRunner::new());

        let image = build(&ctx, &testing::config(), &tools).await.unwrap();

        assert_eq!(image.as_str(), "myfunc-builder");
        let mount = format!("{}/:/src", ctx.dir().display());
        assert_eq!(
            tools.runner().command_lines(),
            vec![
                "docker build -t myfunc-builder .".to_owned(),
                format!(
                    "docker run --rm --volume {mount} --workdir /src myfunc-builder \
                     swift build --product MyFunc -c release"
                ),
            ]
        );
    }

    #[tokio::test]
    async fn failed_image_build_never_compiles() {
        let (_tmp, ctx) = testing::project();
        let tools = testing::tools(RecordingRunner::new().on(
            "docker",
            Some("build"),
            Reply::fail("failed to solve"),
        ));

        let result = build(&ctx, &testing::config(), &tools).await;

        assert!(result.is_err());
        assert_eq!(tools.runner().count("docker", "build"), 1);
        assert_eq!(tools.runner().count("docker", "run"), 0);
    }

    #[tokio::test]
    async fn compile_failure_propagates() {
        let (_tmp, ctx) = testing::project();
        let tools = testing::tools(RecordingRunner::new().on(
            "docker",
            Some("run"),
            Reply::fail("error: no such product 'MyFunc'"),
        ));

        let err = build(&ctx, &testing::config(), &tools).await.unwrap_err();
        assert!(err.to_string().contains("MyFunc"));
    }

    #[tokio::test]
    async fn configured_image_is_built_and_used() {
        let (_tmp, ctx) = testing::project();
        let tools = testing::tools(RecordingRunner::new());
        let mut config = testing::config();
        config.build.image = Some("team-builder".to_owned());

        build(&ctx, &config, &tools).await.unwrap();

        assert_eq!(tools.runner().count("docker", "team-builder"), 2);
    }
}
