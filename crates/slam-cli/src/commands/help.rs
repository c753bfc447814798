pub(crate) const USAGE: &str = "\
slam - Swift AWS Lambda maker

Usage: slam <command>

Commands:
  new                     Turn the current (empty) directory into a Swift Lambda project
  setup-image [NAME] [-i] Build the builder image from the project's Dockerfile
  build                   Build the image, then compile the release binary inside it
  package                 Package the compiled binary into .build/lambda/<name>/lambda.zip
  export                  build + package, then print the archive path
  deploy                  Ensure the S3 bucket, run sam deploy, print the endpoint
                          (--continue-on-error describes the stack even if sam deploy fails)
  invoke                  Debug build plus instructions for calling the function locally
  help                    Show this message

Project settings are read from slam.toml in the current directory.
Set RUST_LOG=debug to see every external command slam runs.
";

pub fn help() {
    print!("{USAGE}");
}
