use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::MlflowConfig;
use crate::image::ImageResource;
use crate::relation::Relation;

/// Everything a reconciliation reads, captured as one snapshot.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inputs {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Model (namespace) the application is deployed into.
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub unit_ordinal: u32,
    #[serde(default)]
    pub leader: bool,
    #[serde(default)]
    pub image: Option<ImageResource>,
    #[serde(default)]
    pub relations: Relations,
    #[serde(default)]
    pub config: MlflowConfig,
}

impl Default for Inputs {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            model_name: default_model_name(),
            unit_ordinal: 0,
            leader: false,
            image: None,
            relations: Relations::default(),
            config: MlflowConfig::default(),
        }
    }
}

impl Inputs {
    /// This unit's name, e.g. `mlflow-server/0`.
    pub fn unit_name(&self) -> String {
        format!("{}/{}", self.app_name, self.unit_ordinal)
    }
}

/// Relations grouped by endpoint name.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct Relations {
    #[serde(default)]
    pub db: Vec<Relation>,
    #[serde(default)]
    pub object_storage: Vec<Relation>,
    #[serde(default)]
    pub ingress: Vec<Relation>,
    #[serde(default)]
    pub pod_defaults: Vec<Relation>,
}

fn default_app_name() -> String {
    "mlflow-server".to_string()
}

fn default_model_name() -> String {
    "kubeflow".to_string()
}
