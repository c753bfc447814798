use slam_cloud::{ProcessRunner, Toolchain};
use slam_core::ProjectContext;

/// Port the generated handler listens on when run as a local server.
const LOCAL_PORT: u16 = 7000;

/// Debug build, then print how to run the function locally and call it.
/// Nothing is started here.
pub async fn invoke<R: ProcessRunner>(
    ctx: &ProjectContext,
    tools: &Toolchain<R>,
) -> anyhow::Result<()> {
    println!("Building '{}' (debug)...", ctx.name());
    tools.build_debug(ctx).await?;

    println!("{}", instructions(ctx));
    Ok(())
}

fn instructions(ctx: &ProjectContext) -> String {
    format!(
        "\nStart the function as a local server:\n\n  \
         LOCAL_LAMBDA_SERVER_ENABLED=true {binary}\n\n\
         Stop it with Ctrl-C. From another terminal, send the sample event:\n\n  \
         curl -v -X POST --data-binary @./event.json http://localhost:{LOCAL_PORT}/invoke\n",
        binary = ctx.debug_binary_path().display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing;
    use slam_cloud::{RecordingRunner, Reply};

    #[tokio::test]
    async fn runs_debug_build_only() {
        let (_tmp, ctx) = testing::project();
        let tools = testing::tools(RecordingRunner::new());

        invoke(&ctx, &tools).await.unwrap();

        assert_eq!(tools.runner().command_lines(), vec!["swift build -c debug"]);
    }

    #[tokio::test]
    async fn debug_build_failure_propagates() {
        let (_tmp, ctx) = testing::project();
        let tools = testing::tools(RecordingRunner::new().on(
            "swift",
            Some("debug"),
            Reply::fail("error: could not find Package.swift"),
        ));

        assert!(invoke(&ctx, &tools).await.is_err());
    }

    #[test]
    fn instructions_name_binary_and_request() {
        let (_tmp, ctx) = testing::project();
        let text = instructions(&ctx);

        assert!(text.contains("LOCAL_LAMBDA_SERVER_ENABLED=true .build/debug/MyFunc"));
        assert!(text.contains("Ctrl-C"));
        assert!(text.contains(
            "curl -v -X POST --data-binary @./event.json http://localhost:7000/invoke"
        ));
    }
}
