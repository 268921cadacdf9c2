use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Static application config. Every field has a default so a partial
/// config file is valid.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct MlflowConfig {
    #[serde(default = "default_mlflow_port")]
    pub mlflow_port: u16,
    #[serde(default = "default_mlflow_nodeport")]
    pub mlflow_nodeport: u16,
    #[serde(default = "default_enable_mlflow_nodeport")]
    pub enable_mlflow_nodeport: bool,
    /// S3 bucket that backs the artifact store. Rejected at load time when
    /// it is not a valid bucket name.
    #[serde(default = "default_artifact_root")]
    #[schemars(with = "String")]
    pub default_artifact_root: BucketName,
    /// pip-style requirements handed to pod-defaults subscribers.
    #[serde(default = "default_requirements")]
    pub requirements: Vec<String>,
}

impl Default for MlflowConfig {
    fn default() -> Self {
        Self {
            mlflow_port: default_mlflow_port(),
            mlflow_nodeport: default_mlflow_nodeport(),
            enable_mlflow_nodeport: default_enable_mlflow_nodeport(),
            default_artifact_root: default_artifact_root(),
            requirements: default_requirements(),
        }
    }
}

fn default_mlflow_port() -> u16 {
    5000
}

fn default_mlflow_nodeport() -> u16 {
    31380
}

fn default_enable_mlflow_nodeport() -> bool {
    true
}

fn default_artifact_root() -> BucketName {
    BucketName("mlflow".to_string())
}

fn default_requirements() -> Vec<String> {
    vec!["mlflow".into(), "boto3".into(), "pymysql".into()]
}

/// S3 bucket naming rules: 3-63 characters of lowercase letters, digits,
/// dots and hyphens, starting and ending alphanumeric, no consecutive dots,
/// not an IPv4 address, and none of the reserved `xn--` / `-s3alias` affixes.
pub fn is_valid_bucket_name(name: &str) -> bool {
    let len_ok = (3..=63).contains(&name.len());
    let chars_ok = name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-');
    let edges_ok = matches!(
        (name.chars().next(), name.chars().last()),
        (Some(first), Some(last)) if first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric()
    );

    len_ok
        && chars_ok
        && edges_ok
        && !name.contains("..")
        && name.parse::<Ipv4Addr>().is_err()
        && !name.starts_with("xn--")
        && !name.ends_with("-s3alias")
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid S3 bucket name `{0}`")]
pub struct InvalidBucketName(pub String);

/// An S3 bucket name that passed [`is_valid_bucket_name`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct BucketName(String);

impl BucketName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidBucketName> {
        let name = name.into();
        if is_valid_bucket_name(&name) {
            Ok(Self(name))
        } else {
            Err(InvalidBucketName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BucketName {
    type Error = InvalidBucketName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<BucketName> for String {
    fn from(bucket: BucketName) -> Self {
        bucket.0
    }
}

impl fmt::Display for BucketName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
