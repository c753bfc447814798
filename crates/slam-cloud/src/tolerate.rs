//! Toleration rules: failures that are really successes.
//!
//! The AWS and SAM CLIs report these conditions only as text on stderr, so
//! the predicates match substrings of [`ToolError::stderr`]. A change in CLI
//! wording breaks them; the tests pin the phrases they rely on.

use crate::error::ToolError;

/// The checked program is absent, either because it could not be spawned or
/// because a wrapper reported "not found".
pub fn is_not_found(err: &ToolError) -> bool {
    match err {
        ToolError::NotFound { .. } => true,
        ToolError::CommandFailed { stderr, .. } => stderr.contains("not found"),
        _ => false,
    }
}

/// `aws s3 mb` on a bucket the caller already owns.
///
/// `BucketAlreadyExists` (owned by another account) is not tolerated.
pub fn is_bucket_already_owned(err: &ToolError) -> bool {
    err.stderr().is_some_and(|stderr| {
        stderr.contains("BucketAlreadyOwnedByYou")
            || stderr.to_lowercase().contains("already owned by you")
    })
}

/// `sam deploy` with a template and artifact identical to the deployed stack.
pub fn is_no_changes_to_deploy(err: &ToolError) -> bool {
    err.stderr()
        .is_some_and(|stderr| stderr.contains("No changes to deploy"))
}
