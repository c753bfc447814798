use slam_build::{GeneratedFile, TemplateProvider, scaffold};
use slam_cloud::{BucketStatus, ProcessRunner, Toolchain};
use slam_core::config::{CONFIG_FILE_NAME, CONFIG_TEMPLATE};
use slam_core::{ProjectContext, SlamConfig};

/// Scaffold a Swift Lambda project in the current directory.
///
/// Steps run in order and the first failure stops the command. When
/// prerequisites are checked, nothing is written unless they all pass.
pub async fn new_project<R: ProcessRunner>(
    ctx: &ProjectContext,
    config: &SlamConfig,
    tools: &Toolchain<R>,
    templates: &impl TemplateProvider,
) -> anyhow::Result<()> {
    let name = ctx.name();

    if config.scaffold.check_prerequisites {
        println!("Checking prerequisites...");
        tools.check_prerequisites(ctx).await?;
    }

    println!("Creating Swift package '{name}'...");
    tools.init_package(ctx).await?;

    for path in scaffold::write_project_files(ctx.dir(), name, templates)? {
        println!("  wrote {}", path.display());
    }

    if scaffold::remove_if_exists(&ctx.dir().join(ctx.test_stub_path()))? {
        println!("  removed {}", ctx.test_stub_path().display());
    }

    let event = scaffold::write_generated(ctx.dir(), name, GeneratedFile::SampleEvent, templates)?;
    println!("  wrote {}", event.display());

    let config_path = ctx.dir().join(CONFIG_FILE_NAME);
    if scaffold::write_if_absent(&config_path, CONFIG_TEMPLATE)? {
        println!("  wrote {CONFIG_FILE_NAME}");
    }

    if config.scaffold.create_bucket {
        let stack = ctx.deployment_stack();
        match tools
            .ensure_bucket(ctx, &stack, config.deploy.region.as_deref())
            .await?
        {
            BucketStatus::Created => println!("Created bucket '{}'", stack.bucket_name),
            BucketStatus::AlreadyOwned => println!("Using bucket '{}'", stack.bucket_name),
        }
    }

    if config.scaffold.setup_image {
        let image = super::resolve_image(ctx, config, None, None)?;
        super::setup_image(ctx, tools, &image).await?;
    }

    println!();
    println!("Created project '{name}'");
    println!();
    println!("  slam export            # build and package lambda.zip");
    println!("  slam deploy            # deploy with SAM");
    println!("  slam invoke            # run locally");

    Ok(())
}
