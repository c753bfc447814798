use slam_core::{SlamConfig, TemplateVersion};
use std::path::PathBuf;

/// A file `slam new` writes into the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedFile {
    Manifest,
    ContainerFile,
    PackageScript,
    MainSource,
    DeploymentTemplate,
    SampleEvent,
}

impl GeneratedFile {
    /// Files overwritten right after `swift package init`, in write order.
    pub const PROJECT_FILES: [Self; 5] = [
        Self::Manifest,
        Self::ContainerFile,
        Self::PackageScript,
        Self::MainSource,
        Self::DeploymentTemplate,
    ];

    /// Location relative to the project directory.
    pub fn relative_path(self, project_name: &str) -> PathBuf {
        match self {
            Self::Manifest => PathBuf::from("Package.swift"),
            Self::ContainerFile => PathBuf::from("Dockerfile"),
            Self::PackageScript => PathBuf::from("scripts/package.sh"),
            Self::MainSource => PathBuf::from("Sources").join(project_name).join("main.swift"),
            Self::DeploymentTemplate => PathBuf::from("scripts/sam.yml"),
            Self::SampleEvent => PathBuf::from("event.json"),
        }
    }

    pub fn is_executable(self) -> bool {
        matches!(self, Self::PackageScript)
    }
}

/// Supplies the text of every generated file.
pub trait TemplateProvider {
    fn render(&self, file: GeneratedFile, project_name: &str) -> String;
}

/// Templates for a Swift AWS Lambda built on swift-aws-lambda-runtime and
/// deployed with SAM.
#[derive(Debug, Clone)]
pub struct SwiftLambdaTemplates {
    version: TemplateVersion,
    base_image: String,
}

impl SwiftLambdaTemplates {
    pub fn new(version: TemplateVersion, base_image: Option<&str>) -> Self {
        let base_image = base_image
            .map(str::to_owned)
            .unwrap_or_else(|| default_base_image(version).to_owned());
        Self {
            version,
            base_image,
        }
    }

    pub fn from_config(config: &SlamConfig) -> Self {
        Self::new(
            config.templates.version,
            config.build.base_image.as_deref(),
        )
    }

    pub fn version(&self) -> TemplateVersion {
        self.version
    }

    fn manifest(&self, name: &str) -> String {
        format!(
            r#"// swift-tools-version:5.3

import PackageDescription

let package = Package(
    name: "{name}",
    platforms: [.macOS(.v10_13)],
    products: [
        .executable(
            name: "{name}",
            targets: ["{name}"]),
    ],
    dependencies: [
        .package(url: "https://github.com/swift-server/swift-aws-lambda-runtime.git", .upToNextMajor(from: "0.3.0"))
    ],
    targets: [
        .target(
            name: "{name}",
            dependencies: [
                .product(name: "AWSLambdaRuntime", package: "swift-aws-lambda-runtime"),
                .product(name: "AWSLambdaEvents", package: "swift-aws-lambda-runtime")
            ]),
        .testTarget(
            name: "{name}Tests",
            dependencies: ["{name}"]),
    ]
)
"#
        )
    }

    fn container_file(&self) -> String {
        format!(
            r#"FROM {base}
RUN yum -y install git \
    libuuid-devel \
    libicu-devel \
    libedit-devel \
    libxml2-devel \
    sqlite-devel \
    python-devel \
    ncurses-devel \
    curl-devel \
    openssl-devel \
    tzdata \
    libtool \
    jq \
    tar \
    zip
"#,
            base = self.base_image
        )
    }

    fn main_source(&self) -> &'static str {
        match self.version {
            TemplateVersion::V1 => MAIN_V1,
            TemplateVersion::V2 => MAIN_V2,
        }
    }

    fn deployment_template(&self, name: &str) -> String {
        let id = logical_id(name);
        let header = format!(
            r#"AWSTemplateFormatVersion: '2010-09-09'
Transform: AWS::Serverless-2016-10-31
Description: {name} deployed by slam

Resources:
  {id}Function:
    Type: AWS::Serverless::Function
    Properties:
      Handler: Provided
      Runtime: provided.al2
      CodeUri: ../.build/lambda/{name}/lambda.zip
      MemorySize: 256
      Timeout: 10
"#
        );

        let tail = match self.version {
            TemplateVersion::V1 => format!(
                r#"
Outputs:
  {id}FunctionArn:
    Description: ARN of the {name} function
    Value: !GetAtt {id}Function.Arn
"#
            ),
            TemplateVersion::V2 => format!(
                r#"      Events:
        HttpApiEvent:
          Type: HttpApi

Outputs:
  {id}Endpoint:
    Description: HTTP API endpoint invoking {name}
    Value: !Sub "https://${{ServerlessHttpApi}}.execute-api.${{AWS::Region}}.amazonaws.com"
"#
            ),
        };

        header + &tail
    }

    fn sample_event(&self) -> &'static str {
        match self.version {
            TemplateVersion::V1 => "\"World\"\n",
            TemplateVersion::V2 => HTTP_API_EVENT,
        }
    }
}

impl TemplateProvider for SwiftLambdaTemplates {
    fn render(&self, file: GeneratedFile, project_name: &str) -> String {
        match file {
            GeneratedFile::Manifest => self.manifest(project_name),
            GeneratedFile::ContainerFile => self.container_file(),
            GeneratedFile::PackageScript => PACKAGE_SCRIPT.to_owned(),
            GeneratedFile::MainSource => self.main_source().to_owned(),
            GeneratedFile::DeploymentTemplate => self.deployment_template(project_name),
            GeneratedFile::SampleEvent => self.sample_event().to_owned(),
        }
    }
}

fn default_base_image(version: TemplateVersion) -> &'static str {
    match version {
        TemplateVersion::V1 => "swiftlang/swift:nightly-5.3-amazonlinux2",
        TemplateVersion::V2 => "swift:5.3-amazonlinux2",
    }
}

/// CloudFormation logical IDs are alphanumeric only.
fn logical_id(project_name: &str) -> String {
    let id: String = project_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if id.is_empty() { "Lambda".to_owned() } else { id }
}

// Called by the container as `scripts/package.sh <executable>`; stages the
// release binary with its shared libraries and zips them behind `bootstrap`.
const PACKAGE_SCRIPT: &str = r#"#!/bin/bash

set -eu

executable=$1

target=.build/lambda/$executable
rm -rf "$target"
mkdir -p "$target"
cp ".build/release/$executable" "$target/"
cp -Pv /usr/lib/swift/linux/lib*so* "$target"
cd "$target"
ln -s "$executable" "bootstrap"
zip --symlinks lambda.zip *
"#;

const MAIN_V1: &str = r#"import AWSLambdaEvents
import AWSLambdaRuntime
import Foundation

Lambda.run { (context, payload: String, completion: @escaping (Result<String, Error>) -> Void) in
    completion(.success("Hello, \(payload)"))
}
"#;

const MAIN_V2: &str = r#"import AWSLambdaEvents
import AWSLambdaRuntime

// Support API Gateway's HTTP API
public typealias HttpApiRequest = APIGateway.V2.Request
public typealias HttpApiResponse = APIGateway.V2.Response

// set LOCAL_LAMBDA_SERVER_ENABLED to "true" to start a local server
// simulator for debugging

Lambda.run { (context: Lambda.Context, request: HttpApiRequest, callback: @escaping (Result<HttpApiResponse, Error>) -> Void) in
    callback(.success(HttpApiResponse(statusCode: .ok, body: "Hello World")))
}
"#;

const HTTP_API_EVENT: &str = r#"{
  "version": "2.0",
  "routeKey": "$default",
  "rawPath": "/",
  "rawQueryString": "",
  "headers": {
    "accept": "*/*",
    "content-length": "15",
    "content-type": "application/json",
    "host": "localhost:7000",
    "user-agent": "curl/7.64.1"
  },
  "requestContext": {
    "accountId": "123456789012",
    "apiId": "local",
    "domainName": "localhost",
    "domainPrefix": "localhost",
    "http": {
      "method": "POST",
      "path": "/",
      "protocol": "HTTP/1.1",
      "sourceIp": "127.0.0.1",
      "userAgent": "curl/7.64.1"
    },
    "requestId": "local-request",
    "routeKey": "$default",
    "stage": "$default",
    "time": "07/Jan/2021:10:00:00 +0000",
    "timeEpoch": 1610013600000
  },
  "body": "{\"name\":\"slam\"}",
  "isBase64Encoded": false
}
"#;
