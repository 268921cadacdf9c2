use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// OCI image resource attached to the application.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
pub struct ImageResource {
    #[serde(rename = "registrypath")]
    pub registry_path: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl ImageResource {
    pub fn new(registry_path: impl Into<String>) -> Self {
        Self {
            registry_path: registry_path.into(),
            ..Default::default()
        }
    }

    /// An image without a registry path cannot be pulled.
    pub fn is_complete(&self) -> bool {
        !self.registry_path.trim().is_empty()
    }
}
