use slam_cloud::{BucketStatus, DeployStatus, ProcessRunner, StackOutput, Toolchain};
use slam_core::{FailurePolicy, ProjectContext, SlamConfig};

/// Ensure the bucket, deploy the stack, then describe it and print the endpoint.
///
/// "No changes to deploy" counts as success. Any other deploy failure aborts
/// under [`FailurePolicy::Abort`]; under [`FailurePolicy::Continue`] it is
/// reported and the stack is described anyway.
pub async fn deploy<R: ProcessRunner>(
    ctx: &ProjectContext,
    config: &SlamConfig,
    tools: &Toolchain<R>,
    policy: FailurePolicy,
) -> anyhow::Result<Vec<StackOutput>> {
    let stack = ctx.deployment_stack();
    let region = config.deploy.region.as_deref();

    match tools.ensure_bucket(ctx, &stack, region).await? {
        BucketStatus::Created => println!("Created bucket '{}'", stack.bucket_name),
        BucketStatus::AlreadyOwned => println!("Using bucket '{}'", stack.bucket_name),
    }

    println!("Deploying stack '{}'...", stack.stack_name);
    match tools
        .sam_deploy(ctx, &stack, &config.deploy.capabilities, region)
        .await
    {
        Ok(DeployStatus::Deployed(output)) => print!("{output}"),
        Ok(DeployStatus::NoChanges) => {
            println!("No changes to deploy, stack '{}' is up to date", stack.stack_name);
        }
        Err(e) => match policy {
            FailurePolicy::Abort => return Err(e.into()),
            FailurePolicy::Continue => {
                let detail = format!("{:#}", anyhow::Error::new(e));
                tracing::warn!(stack = %stack.stack_name, error = %detail, "deploy failed, continuing");
            }
        },
    }

    let outputs = tools.describe_stack_outputs(ctx, &stack, region).await?;
    match StackOutput::endpoint(&outputs) {
        Some(endpoint) => {
            println!();
            println!("Endpoint: {}", endpoint.value);
        }
        None => {
            for output in &outputs {
                println!("{}: {}", output.key, output.value);
            }
        }
    }

    Ok(outputs)
}
