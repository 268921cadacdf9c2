use serde::{Deserialize, Serialize};

/// Payload of a `v1` object-storage envelope (MinIO or compatible).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ObjectStorageData {
    pub access_key: String,
    pub secret_key: String,
    pub service: String,
    pub port: u16,
    #[serde(default)]
    pub namespace: Option<String>,
    /// Advertised by the provider; endpoints are always rendered over plain HTTP.
    #[serde(default)]
    pub secure: bool,
}

impl ObjectStorageData {
    /// Endpoint as seen from pods in the same model.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.service, self.port)
    }

    /// Namespace-qualified endpoint used by the MLflow server itself.
    pub fn qualified_endpoint(&self) -> String {
        match self.namespace.as_deref().filter(|ns| !ns.is_empty()) {
            Some(ns) => format!("http://{}.{}:{}", self.service, ns, self.port),
            None => self.endpoint(),
        }
    }
}
