mod commands;

use clap::{Parser, Subcommand};
use slam_build::SwiftLambdaTemplates;
use slam_cloud::{RealRunner, Toolchain};
use slam_core::{FailurePolicy, InputSource, ProjectContext, SlamConfig, StdinInput};
use std::ffi::OsString;

#[derive(Parser)]
#[command(
    name = "slam",
    about = "Scaffold, build, and deploy Swift AWS Lambda functions",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Turn the current (empty) directory into a Swift Lambda project
    New,
    /// Build the builder image from the project's Dockerfile
    SetupImage {
        /// Image tag (defaults to slam.toml's build.image, then `<name>-builder`)
        name: Option<String>,
        /// Ask for the image tag on the terminal
        #[arg(long, short = 'i')]
        interactive: bool,
    },
    /// Compile the release binary inside the builder image
    Build,
    /// Package the compiled binary into lambda.zip
    Package,
    /// Build, package, and print the archive path
    Export,
    /// Deploy the packaged function with SAM and print its endpoint
    Deploy {
        /// Describe the stack even if `sam deploy` fails
        #[arg(long)]
        continue_on_error: bool,
    },
    /// Build for local debugging and print how to call the function
    Invoke,
    /// Show usage
    Help,
}

/// What one command line asks for.
#[derive(Debug, PartialEq, Eq)]
enum Route {
    Help,
    Version,
    Run(Commands),
}

/// Map argv to a route. Anything clap rejects shows the usage text.
fn route<I, T>(args: I) -> Route
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(Cli {
            command: Commands::Help,
        }) => Route::Help,
        Ok(cli) => Route::Run(cli.command),
        Err(e) if e.kind() == clap::error::ErrorKind::DisplayVersion => Route::Version,
        Err(e) => {
            tracing::debug!(kind = ?e.kind(), "unrecognized command line, showing usage");
            Route::Help
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let command = match route(std::env::args_os()) {
        Route::Help => {
            commands::help();
            return Ok(());
        }
        Route::Version => {
            println!("slam {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Route::Run(command) => command,
    };

    let ctx = ProjectContext::from_current_dir()?;
    let config = SlamConfig::load(ctx.dir())?;
    let tools = Toolchain::with_runner(RealRunner::with_timeout(config.process.timeout()));
    tracing::debug!(project = ctx.name(), dir = %ctx.dir().display(), "resolved project");

    match command {
        Commands::New => {
            let templates = SwiftLambdaTemplates::from_config(&config);
            commands::new_project(&ctx, &config, &tools, &templates).await?;
        }
        Commands::SetupImage { name, interactive } => {
            let mut stdin = StdinInput;
            let input: Option<&mut dyn InputSource> = if interactive {
                Some(&mut stdin)
            } else {
                None
            };
            let image = commands::resolve_image(&ctx, &config, name.as_deref(), input)?;
            commands::setup_image(&ctx, &tools, &image).await?;
        }
        Commands::Build => {
            commands::build(&ctx, &config, &tools).await?;
        }
        Commands::Package => {
            let image = commands::resolve_image(&ctx, &config, None, None)?;
            commands::package(&ctx, &tools, &image).await?;
        }
        Commands::Export => {
            commands::export(&ctx, &config, &tools).await?;
        }
        Commands::Deploy { continue_on_error } => {
            let policy = if continue_on_error {
                FailurePolicy::Continue
            } else {
                config.deploy.on_failure
            };
            commands::deploy(&ctx, &config, &tools, policy).await?;
        }
        Commands::Invoke => commands::invoke(&ctx, &tools).await?,
        Commands::Help => commands::help(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn routed(args: &[&str]) -> Route {
        route(std::iter::once("slam").chain(args.iter().copied()))
    }

    #[test]
    fn verbs_route_to_their_stage() {
        assert_eq!(routed(&["new"]), Route::Run(Commands::New));
        assert_eq!(routed(&["build"]), Route::Run(Commands::Build));
        assert_eq!(routed(&["package"]), Route::Run(Commands::Package));
        assert_eq!(routed(&["export"]), Route::Run(Commands::Export));
        assert_eq!(routed(&["invoke"]), Route::Run(Commands::Invoke));
        assert_eq!(
            routed(&["deploy"]),
            Route::Run(Commands::Deploy {
                continue_on_error: false
            })
        );
    }

    #[test]
    fn setup_image_takes_optional_name_and_prompt_flag() {
        assert_eq!(
            routed(&["setup-image"]),
            Route::Run(Commands::SetupImage {
                name: None,
                interactive: false
            })
        );
        assert_eq!(
            routed(&["setup-image", "custom-builder"]),
            Route::Run(Commands::SetupImage {
                name: Some("custom-builder".to_owned()),
                interactive: false
            })
        );
        assert_eq!(
            routed(&["setup-image", "-i"]),
            Route::Run(Commands::SetupImage {
                name: None,
                interactive: true
            })
        );
    }

    #[test]
    fn deploy_accepts_continue_on_error() {
        assert_eq!(
            routed(&["deploy", "--continue-on-error"]),
            Route::Run(Commands::Deploy {
                continue_on_error: true
            })
        );
    }

    #[test]
    fn help_forms_route_to_help() {
        for args in [
            &[][..],
            &["help"],
            &["-h"],
            &["--help"],
            &["build", "--help"],
            &["deploy", "--bogus"],
            &["setup-image", "a", "b"],
        ] {
            assert_eq!(routed(args), Route::Help, "args: {args:?}");
        }
    }

    #[test]
    fn version_flag_routes_to_version() {
        assert_eq!(routed(&["--version"]), Route::Version);
    }

    proptest! {
        #[test]
        fn unknown_verbs_route_to_help(verb in "[a-z][a-z0-9-]{0,15}") {
            let known = [
                "new", "setup-image", "build", "package", "export", "deploy", "invoke", "help",
            ];
            prop_assume!(!known.contains(&verb.as_str()));
            prop_assert_eq!(routed(&[verb.as_str()]), Route::Help);
        }
    }
}
