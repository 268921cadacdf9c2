use k8s_openapi::api::core::v1::{ContainerPort, Secret, Service};
use mlflow_model::{ImageResource, Inputs, ObjectStorageData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::common;
use crate::secret::{DB_SECRET, MINIO_SECRET, SecretSet};
use crate::service;

pub const POD_SPEC_VERSION: u32 = 3;
pub const CONTAINER_NAME: &str = "mlflow";
pub const SECRETS_CHECKSUM_ANNOTATION: &str = "mlflow-operator/secrets-checksum";

/// Env binding names the admission webhook and the server image expect.
pub const DB_SECRET_ENV: &str = "db-secret";
pub const AWS_SECRET_ENV: &str = "aws-secret";
pub const AWS_DEFAULT_REGION: &str = "us-east-1";
/// Literal env var carrying the server's own in-cluster URL.
pub const SERVER_URL_ENV: &str = "MLFLOW_SERVER_URL";

/// Pod spec document handed to the workload runtime.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSpecDocument {
    pub version: u32,
    pub containers: Vec<ContainerSpec>,
    pub kubernetes_resources: KubernetesResources,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSpec {
    pub name: String,
    pub image_details: ImageDetails,
    pub ports: Vec<ContainerPort>,
    pub args: Vec<String>,
    pub env_config: BTreeMap<String, EnvValue>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    pub image_path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub username: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl From<&ImageResource> for ImageDetails {
    fn from(image: &ImageResource) -> Self {
        Self {
            image_path: image.registry_path.clone(),
            username: image.username.clone(),
            password: image.password.clone(),
        }
    }
}

/// An `envConfig` entry: either a literal value or every key of a Secret,
/// referenced by name.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum EnvValue {
    Secret { secret: SecretRef },
    Literal(String),
}

impl EnvValue {
    pub fn secret(name: impl Into<String>) -> Self {
        Self::Secret {
            secret: SecretRef { name: name.into() },
        }
    }

    /// Name of the referenced Secret, if this is a Secret binding.
    pub fn secret_name(&self) -> Option<&str> {
        match self {
            Self::Secret { secret } => Some(secret.name.as_str()),
            Self::Literal(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SecretRef {
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesResources {
    pub secrets: Vec<Secret>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<Service>,
    #[serde(default)]
    pub pod: PodResources,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodResources {
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl PodSpecDocument {
    pub fn container(&self, name: &str) -> Option<&ContainerSpec> {
        self.containers.iter().find(|c| c.name == name)
    }

    pub fn secret(&self, name: &str) -> Option<&Secret> {
        self.kubernetes_resources
            .secrets
            .iter()
            .find(|s| s.metadata.name.as_deref() == Some(name))
    }
}

/// Compute a SHA-256 checksum over all Secret data so that credential
/// changes roll the pod. Every field is length-prefixed, so moving bytes
/// between adjacent fields changes the digest.
pub fn secrets_checksum(secrets: &[Secret]) -> String {
    use sha2::{Digest, Sha256};

    fn field(hasher: &mut Sha256, bytes: &[u8]) {
        hasher.update((bytes.len() as u64).to_le_bytes());
        hasher.update(bytes);
    }

    let mut hasher = Sha256::new();
    for secret in secrets {
        field(
            &mut hasher,
            secret.metadata.name.as_deref().unwrap_or_default().as_bytes(),
        );
        let data = secret.data.as_ref();
        hasher.update((data.map_or(0, |d| d.len()) as u64).to_le_bytes());
        for (key, value) in data.into_iter().flatten() {
            field(&mut hasher, key.as_bytes());
            field(&mut hasher, &value.0);
        }
    }
    format!("{:x}", hasher.finalize())
}

pub fn build(
    inputs: &Inputs,
    image: &ImageResource,
    secrets: &SecretSet,
    object_storage: Option<&ObjectStorageData>,
) -> PodSpecDocument {
    let port = inputs.config.mlflow_port;

    let mut env_config = BTreeMap::from([
        (
            DB_SECRET_ENV.to_string(),
            EnvValue::secret(common::child_name(inputs, DB_SECRET)),
        ),
        (
            "AWS_DEFAULT_REGION".to_string(),
            EnvValue::Literal(AWS_DEFAULT_REGION.into()),
        ),
        (
            SERVER_URL_ENV.to_string(),
            EnvValue::Literal(common::tracking_server_url(inputs)),
        ),
    ]);

    if secrets.minio.is_some() {
        env_config.insert(
            AWS_SECRET_ENV.into(),
            EnvValue::secret(common::child_name(inputs, MINIO_SECRET)),
        );
    }

    if let Some(os) = object_storage {
        env_config.insert(
            "MLFLOW_S3_ENDPOINT_URL".into(),
            EnvValue::Literal(os.qualified_endpoint()),
        );
    }

    let container = ContainerSpec {
        name: CONTAINER_NAME.into(),
        image_details: ImageDetails::from(image),
        ports: vec![ContainerPort {
            name: Some("http".into()),
            container_port: i32::from(port),
            ..Default::default()
        }],
        args: vec![
            "--host".into(),
            "0.0.0.0".into(),
            "--port".into(),
            port.to_string(),
            "--backend-store-uri".into(),
            "$(MLFLOW_TRACKING_URI)".into(),
            "--default-artifact-root".into(),
            format!("s3://{}/", inputs.config.default_artifact_root),
        ],
        env_config,
    };

    let secrets = secrets.to_vec();
    let annotations = BTreeMap::from([(
        SECRETS_CHECKSUM_ANNOTATION.to_string(),
        secrets_checksum(&secrets),
    )]);

    PodSpecDocument {
        version: POD_SPEC_VERSION,
        containers: vec![container],
        kubernetes_resources: KubernetesResources {
            secrets,
            services: service::build_external(inputs).into_iter().collect(),
            pod: PodResources { annotations },
        },
    }
}
